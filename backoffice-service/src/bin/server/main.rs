use std::net::SocketAddr;
use std::sync::Arc;

use auth::Authenticator;
use backoffice_service::config::Config;
use backoffice_service::domain::client::service::ClientService;
use backoffice_service::domain::device::service::DeviceService;
use backoffice_service::domain::icd::service::IcdService;
use backoffice_service::domain::medicine::service::MedicineService;
use backoffice_service::domain::role::service::RoleService;
use backoffice_service::domain::session::service::SessionService;
use backoffice_service::domain::user::service::UserService;
use backoffice_service::inbound::http::router::create_router;
use backoffice_service::inbound::http::router::AppState;
use backoffice_service::repositories::bootstrap::seed_initial_user;
use backoffice_service::repositories::PostgresClientRepository;
use backoffice_service::repositories::PostgresDeviceRepository;
use backoffice_service::repositories::PostgresIcdRepository;
use backoffice_service::repositories::PostgresMedicineRepository;
use backoffice_service::repositories::PostgresRoleRepository;
use backoffice_service::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backoffice_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "backoffice-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        issuer = %config.jwt.issuer,
        access_token_ttl_minutes = config.jwt.access_token_ttl_minutes,
        refresh_token_ttl_minutes = config.jwt.refresh_token_ttl_minutes,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(config.jwt.token_settings())?);

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let outcome = seed_initial_user(&pg_pool, &authenticator, &config.bootstrap).await?;
    tracing::info!(outcome = ?outcome, "Initial user bootstrap finished");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let role_repository = Arc::new(PostgresRoleRepository::new(pg_pool.clone()));
    let device_repository = Arc::new(PostgresDeviceRepository::new(pg_pool.clone()));
    let medicine_repository = Arc::new(PostgresMedicineRepository::new(pg_pool.clone()));
    let icd_repository = Arc::new(PostgresIcdRepository::new(pg_pool.clone()));
    let client_repository = Arc::new(PostgresClientRepository::new(pg_pool));

    let state = AppState {
        session_service: Arc::new(SessionService::new(
            Arc::clone(&user_repository),
            Arc::clone(&authenticator),
        )),
        user_service: Arc::new(UserService::new(
            Arc::clone(&user_repository),
            Arc::clone(&role_repository),
        )),
        role_service: Arc::new(RoleService::new(role_repository)),
        device_service: Arc::new(DeviceService::new(device_repository, user_repository)),
        medicine_service: Arc::new(MedicineService::new(medicine_repository)),
        icd_service: Arc::new(IcdService::new(icd_repository)),
        client_service: Arc::new(ClientService::new(client_repository)),
        authenticator,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let app = create_router(state).into_make_service_with_connect_info::<SocketAddr>();
    if let Err(e) = axum::serve(http_listener, app).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
