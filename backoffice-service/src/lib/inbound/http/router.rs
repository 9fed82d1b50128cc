use std::sync::Arc;
use std::time::Duration;

use ::auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::auth;
use super::handlers::clients;
use super::handlers::devices;
use super::handlers::health;
use super::handlers::icd_cie;
use super::handlers::medicines;
use super::handlers::roles;
use super::handlers::users;
use super::middleware::authenticate as auth_middleware;
use super::middleware::capture_device_info;
use crate::domain::client::ports::ClientServicePort;
use crate::domain::device::ports::DeviceServicePort;
use crate::domain::icd::ports::IcdServicePort;
use crate::domain::medicine::ports::MedicineServicePort;
use crate::domain::role::ports::RoleServicePort;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<dyn SessionServicePort>,
    pub user_service: Arc<dyn UserServicePort>,
    pub role_service: Arc<dyn RoleServicePort>,
    pub device_service: Arc<dyn DeviceServicePort>,
    pub medicine_service: Arc<dyn MedicineServicePort>,
    pub icd_service: Arc<dyn IcdServicePort>,
    pub client_service: Arc<dyn ClientServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/access-token/refresh", post(auth::refresh_access_token));

    let protected_routes = Router::new()
        .route("/api/health-check-auth", get(health::health_check_auth))
        // Users
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route("/api/users/search-paginated", get(users::search_users))
        .route("/api/users/search-by-property", get(users::user_coincidences))
        .route(
            "/api/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/api/users/:id/devices", get(devices::list_user_devices))
        // Roles
        .route("/api/roles", get(roles::list_roles).post(roles::create_role))
        .route("/api/roles/search-paginated", get(roles::search_roles))
        .route("/api/roles/search-by-property", get(roles::role_coincidences))
        .route(
            "/api/roles/:id",
            get(roles::get_role)
                .put(roles::update_role)
                .delete(roles::delete_role),
        )
        // Devices
        .route(
            "/api/device",
            get(devices::current_device).route_layer(middleware::from_fn(capture_device_info)),
        )
        .route(
            "/api/devices",
            get(devices::list_devices).post(devices::create_device),
        )
        .route("/api/devices/search-paginated", get(devices::search_devices))
        .route(
            "/api/devices/search-by-property",
            get(devices::device_coincidences),
        )
        .route(
            "/api/devices/:id",
            get(devices::get_device)
                .put(devices::update_device)
                .delete(devices::delete_device),
        )
        // Medicines
        .route(
            "/api/medicines",
            get(medicines::list_medicines).post(medicines::create_medicine),
        )
        .route(
            "/api/medicines/search-paginated",
            get(medicines::search_medicines),
        )
        .route(
            "/api/medicines/search-by-property",
            get(medicines::medicine_coincidences),
        )
        .route(
            "/api/medicines/:id",
            get(medicines::get_medicine)
                .put(medicines::update_medicine)
                .delete(medicines::delete_medicine),
        )
        // ICD codes
        .route(
            "/api/icd-cie",
            get(icd_cie::list_icd_codes).post(icd_cie::create_icd_code),
        )
        .route("/api/icd-cie/search-paginated", get(icd_cie::search_icd_codes))
        .route(
            "/api/icd-cie/search-by-property",
            get(icd_cie::icd_coincidences),
        )
        .route(
            "/api/icd-cie/:id",
            get(icd_cie::get_icd_code)
                .put(icd_cie::update_icd_code)
                .delete(icd_cie::delete_icd_code),
        )
        // Clients, sub-clients and programs
        .route(
            "/api/clients",
            get(clients::list_clients).post(clients::create_client),
        )
        .route("/api/clients/search-paginated", get(clients::search_clients))
        .route(
            "/api/clients/search-by-property",
            get(clients::client_coincidences),
        )
        .route(
            "/api/clients/:id",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        )
        .route("/api/clients/:id/sub-clients", post(clients::add_sub_client))
        .route("/api/sub-clients/:id", delete(clients::delete_sub_client))
        .route("/api/sub-clients/:id/programs", post(clients::add_program))
        .route("/api/programs/:id", delete(clients::delete_program))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
