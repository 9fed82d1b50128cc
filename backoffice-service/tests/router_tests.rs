use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenIssuer;
use auth::TokenKind;
use auth::TokenSettings;
use axum::body::Body;
use axum::http::header;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use backoffice_service::domain::client::models::Client;
use backoffice_service::domain::client::models::ClientId;
use backoffice_service::domain::client::models::CreateClientCommand;
use backoffice_service::domain::client::models::CreateProgramCommand;
use backoffice_service::domain::client::models::CreateSubClientCommand;
use backoffice_service::domain::client::models::Program;
use backoffice_service::domain::client::models::ProgramId;
use backoffice_service::domain::client::models::SubClient;
use backoffice_service::domain::client::models::SubClientId;
use backoffice_service::domain::client::models::UpdateClientCommand;
use backoffice_service::domain::client::ports::ClientServicePort;
use backoffice_service::domain::device::models::CreateDeviceCommand;
use backoffice_service::domain::device::models::Device;
use backoffice_service::domain::device::models::DeviceId;
use backoffice_service::domain::device::models::UpdateDeviceCommand;
use backoffice_service::domain::device::ports::DeviceServicePort;
use backoffice_service::domain::errors::DomainError;
use backoffice_service::domain::icd::models::CreateIcdCodeCommand;
use backoffice_service::domain::icd::models::IcdCode;
use backoffice_service::domain::icd::models::IcdCodeId;
use backoffice_service::domain::icd::models::UpdateIcdCodeCommand;
use backoffice_service::domain::icd::ports::IcdServicePort;
use backoffice_service::domain::medicine::models::CreateMedicineCommand;
use backoffice_service::domain::medicine::models::Medicine;
use backoffice_service::domain::medicine::models::MedicineId;
use backoffice_service::domain::medicine::models::UpdateMedicineCommand;
use backoffice_service::domain::medicine::ports::MedicineServicePort;
use backoffice_service::domain::role::models::CreateRoleCommand;
use backoffice_service::domain::role::models::Role;
use backoffice_service::domain::role::models::RoleId;
use backoffice_service::domain::role::models::RoleName;
use backoffice_service::domain::role::models::UpdateRoleCommand;
use backoffice_service::domain::role::ports::RoleServicePort;
use backoffice_service::domain::search::CoincidenceQuery;
use backoffice_service::domain::search::Page;
use backoffice_service::domain::search::Pagination;
use backoffice_service::domain::search::SearchQuery;
use backoffice_service::domain::session::models::LoginCommand;
use backoffice_service::domain::session::models::RefreshedSession;
use backoffice_service::domain::session::models::Session;
use backoffice_service::domain::session::ports::SessionServicePort;
use backoffice_service::domain::user::models::CreateUserCommand;
use backoffice_service::domain::user::models::EmailAddress;
use backoffice_service::domain::user::models::UpdateUserCommand;
use backoffice_service::domain::user::models::User;
use backoffice_service::domain::user::models::UserId;
use backoffice_service::domain::user::models::Username;
use backoffice_service::domain::user::ports::UserServicePort;
use backoffice_service::inbound::http::router::create_router;
use backoffice_service::inbound::http::router::AppState;
use chrono::Utc;
use http_body_util::BodyExt;
use mockall::mock;
use serde_json::json;
use serde_json::Value;
use tower::ServiceExt;

mock! {
    pub SessionService {}

    #[async_trait]
    impl SessionServicePort for SessionService {
        async fn login(&self, command: LoginCommand) -> Result<Session, DomainError>;
        async fn refresh(&self, refresh_token: &str) -> Result<RefreshedSession, DomainError>;
    }
}

mock! {
    pub UserService {}

    #[async_trait]
    impl UserServicePort for UserService {
        async fn list_users(&self) -> Result<Vec<User>, DomainError>;
        async fn get_user(&self, id: UserId) -> Result<User, DomainError>;
        async fn create_user(&self, command: CreateUserCommand) -> Result<User, DomainError>;
        async fn update_user(&self, id: UserId, command: UpdateUserCommand) -> Result<User, DomainError>;
        async fn delete_user(&self, id: UserId) -> Result<(), DomainError>;
        async fn search_users(&self, query: SearchQuery) -> Result<Page<User>, DomainError>;
        async fn user_coincidences(&self, query: CoincidenceQuery) -> Result<Vec<String>, DomainError>;
    }
}

mock! {
    pub RoleService {}

    #[async_trait]
    impl RoleServicePort for RoleService {
        async fn list_roles(&self) -> Result<Vec<Role>, DomainError>;
        async fn get_role(&self, id: RoleId) -> Result<Role, DomainError>;
        async fn create_role(&self, command: CreateRoleCommand) -> Result<Role, DomainError>;
        async fn update_role(&self, id: RoleId, command: UpdateRoleCommand) -> Result<Role, DomainError>;
        async fn delete_role(&self, id: RoleId) -> Result<(), DomainError>;
        async fn search_roles(&self, query: SearchQuery) -> Result<Page<Role>, DomainError>;
        async fn role_coincidences(&self, query: CoincidenceQuery) -> Result<Vec<String>, DomainError>;
    }
}

mock! {
    pub DeviceService {}

    #[async_trait]
    impl DeviceServicePort for DeviceService {
        async fn list_devices(&self) -> Result<Vec<Device>, DomainError>;
        async fn list_user_devices(&self, user_id: UserId) -> Result<Vec<Device>, DomainError>;
        async fn get_device(&self, id: DeviceId) -> Result<Device, DomainError>;
        async fn create_device(&self, command: CreateDeviceCommand) -> Result<Device, DomainError>;
        async fn update_device(&self, id: DeviceId, command: UpdateDeviceCommand) -> Result<Device, DomainError>;
        async fn delete_device(&self, id: DeviceId) -> Result<(), DomainError>;
        async fn search_devices(&self, query: SearchQuery) -> Result<Page<Device>, DomainError>;
        async fn device_coincidences(&self, query: CoincidenceQuery) -> Result<Vec<String>, DomainError>;
    }
}

mock! {
    pub MedicineService {}

    #[async_trait]
    impl MedicineServicePort for MedicineService {
        async fn list_medicines(&self) -> Result<Vec<Medicine>, DomainError>;
        async fn get_medicine(&self, id: MedicineId) -> Result<Medicine, DomainError>;
        async fn create_medicine(&self, command: CreateMedicineCommand) -> Result<Medicine, DomainError>;
        async fn update_medicine(&self, id: MedicineId, command: UpdateMedicineCommand) -> Result<Medicine, DomainError>;
        async fn delete_medicine(&self, id: MedicineId) -> Result<(), DomainError>;
        async fn search_medicines(&self, query: SearchQuery) -> Result<Page<Medicine>, DomainError>;
        async fn medicine_coincidences(&self, query: CoincidenceQuery) -> Result<Vec<String>, DomainError>;
    }
}

mock! {
    pub IcdService {}

    #[async_trait]
    impl IcdServicePort for IcdService {
        async fn list_icd_codes(&self) -> Result<Vec<IcdCode>, DomainError>;
        async fn get_icd_code(&self, id: IcdCodeId) -> Result<IcdCode, DomainError>;
        async fn create_icd_code(&self, command: CreateIcdCodeCommand) -> Result<IcdCode, DomainError>;
        async fn update_icd_code(&self, id: IcdCodeId, command: UpdateIcdCodeCommand) -> Result<IcdCode, DomainError>;
        async fn delete_icd_code(&self, id: IcdCodeId) -> Result<(), DomainError>;
        async fn search_icd_codes(&self, query: SearchQuery) -> Result<Page<IcdCode>, DomainError>;
        async fn icd_coincidences(&self, query: CoincidenceQuery) -> Result<Vec<String>, DomainError>;
    }
}

mock! {
    pub ClientService {}

    #[async_trait]
    impl ClientServicePort for ClientService {
        async fn list_clients(&self) -> Result<Vec<Client>, DomainError>;
        async fn get_client(&self, id: ClientId) -> Result<Client, DomainError>;
        async fn create_client(&self, command: CreateClientCommand) -> Result<Client, DomainError>;
        async fn update_client(&self, id: ClientId, command: UpdateClientCommand) -> Result<Client, DomainError>;
        async fn delete_client(&self, id: ClientId) -> Result<(), DomainError>;
        async fn search_clients(&self, query: SearchQuery) -> Result<Page<Client>, DomainError>;
        async fn client_coincidences(&self, query: CoincidenceQuery) -> Result<Vec<String>, DomainError>;
        async fn add_sub_client(&self, client_id: ClientId, command: CreateSubClientCommand) -> Result<SubClient, DomainError>;
        async fn delete_sub_client(&self, id: SubClientId) -> Result<(), DomainError>;
        async fn add_program(&self, sub_client_id: SubClientId, command: CreateProgramCommand) -> Result<Program, DomainError>;
        async fn delete_program(&self, id: ProgramId) -> Result<(), DomainError>;
    }
}

fn token_settings() -> TokenSettings {
    TokenSettings {
        issuer: "backoffice".to_string(),
        access_secret: "router_test_access_secret_32_bytes!!".to_string(),
        refresh_secret: "router_test_refresh_secret_32_bytes!".to_string(),
        access_ttl: chrono::Duration::minutes(15),
        refresh_ttl: chrono::Duration::days(7),
    }
}

fn access_token(user_id: i64) -> String {
    TokenIssuer::new(token_settings())
        .unwrap()
        .issue(user_id, TokenKind::Access)
        .unwrap()
}

fn refresh_token(user_id: i64) -> String {
    TokenIssuer::new(token_settings())
        .unwrap()
        .issue(user_id, TokenKind::Refresh)
        .unwrap()
}

fn sample_role() -> Role {
    Role {
        id: RoleId(1),
        name: RoleName::new("admin".to_string()).unwrap(),
        description: "Full access".to_string(),
        enabled: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn sample_user() -> User {
    User {
        id: UserId(1),
        username: Username::new("admin".to_string()).unwrap(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: EmailAddress::new("test@example.com".to_string()).unwrap(),
        password_hash: "$argon2id$stored".to_string(),
        job_position: "Operations".to_string(),
        role: sample_role(),
        enabled: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// One mock per service port; tests set expectations on the ones they hit.
struct Mocks {
    sessions: MockSessionService,
    users: MockUserService,
    roles: MockRoleService,
    devices: MockDeviceService,
    medicines: MockMedicineService,
    icd: MockIcdService,
    clients: MockClientService,
}

impl Mocks {
    fn new() -> Self {
        Self {
            sessions: MockSessionService::new(),
            users: MockUserService::new(),
            roles: MockRoleService::new(),
            devices: MockDeviceService::new(),
            medicines: MockMedicineService::new(),
            icd: MockIcdService::new(),
            clients: MockClientService::new(),
        }
    }

    fn into_router(self) -> Router {
        create_router(AppState {
            session_service: Arc::new(self.sessions),
            user_service: Arc::new(self.users),
            role_service: Arc::new(self.roles),
            device_service: Arc::new(self.devices),
            medicine_service: Arc::new(self.medicines),
            icd_service: Arc::new(self.icd),
            client_service: Arc::new(self.clients),
            authenticator: Arc::new(Authenticator::new(token_settings()).unwrap()),
        })
    }
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

fn get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: String) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body)).unwrap()
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let router = Mocks::new().into_router();

    let request = Request::builder()
        .uri("/api/roles")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["statusCode"], 401);
    assert_eq!(body["data"]["message"], "Missing Authorization header");
}

#[tokio::test]
async fn test_refresh_token_is_not_an_access_token() {
    let router = Mocks::new().into_router();

    let (status, _) = send(router, get("/api/roles", &refresh_token(1))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_check_echoes_subject() {
    let router = Mocks::new().into_router();

    let (status, body) = send(router, get("/api/health-check-auth", &access_token(42))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["userId"], 42);
}

#[tokio::test]
async fn test_login_returns_tokens_and_profile() {
    let mut mocks = Mocks::new();
    mocks
        .sessions
        .expect_login()
        .withf(|command| {
            command.email.as_str() == "test@example.com" && command.password.expose() == "pass123"
        })
        .times(1)
        .returning(|_| {
            Ok(Session {
                access_token: "access".to_string(),
                refresh_token: "refresh".to_string(),
                user: sample_user(),
            })
        });

    let request = json_request(
        "POST",
        "/login",
        None,
        json!({ "email": "test@example.com", "password": "pass123" }).to_string(),
    );
    let (status, body) = send(mocks.into_router(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["accessToken"], "access");
    assert_eq!(body["data"]["refreshToken"], "refresh");
    assert_eq!(body["data"]["userId"], 1);
    assert_eq!(body["data"]["firstName"], "Ada");
    assert!(body["data"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_login_failures_map_to_status() {
    let mut mocks = Mocks::new();
    let mut seq = mockall::Sequence::new();
    mocks
        .sessions
        .expect_login()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Err(DomainError::NotAuthenticated("Invalid email or password".to_string())));
    mocks
        .sessions
        .expect_login()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Err(DomainError::NotAuthorized("User account is disabled".to_string())));
    let router = mocks.into_router();

    let body = json!({ "email": "test@example.com", "password": "wrong" }).to_string();

    let (status, response) = send(
        router.clone(),
        json_request("POST", "/login", None, body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(response["data"]["message"], "Invalid email or password");

    let (status, _) = send(router, json_request("POST", "/login", None, body)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_login_rejects_malformed_email_before_service() {
    let router = Mocks::new().into_router();

    let request = json_request(
        "POST",
        "/login",
        None,
        json!({ "email": "not-an-email", "password": "pass123" }).to_string(),
    );
    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusCode"], 400);
}

#[tokio::test]
async fn test_refresh_requires_token_field() {
    let router = Mocks::new().into_router();

    let request = json_request(
        "POST",
        "/access-token/refresh",
        None,
        json!({ "refreshToken": "" }).to_string(),
    );
    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["message"], "refreshToken is required");
}

#[tokio::test]
async fn test_refresh_returns_new_access_token() {
    let mut mocks = Mocks::new();
    mocks
        .sessions
        .expect_refresh()
        .withf(|token| token.to_string() == "opaque-refresh")
        .times(1)
        .returning(|_| {
            Ok(RefreshedSession {
                access_token: "new-access".to_string(),
                user: sample_user(),
            })
        });

    let request = json_request(
        "POST",
        "/access-token/refresh",
        None,
        json!({ "refreshToken": "opaque-refresh" }).to_string(),
    );
    let (status, body) = send(mocks.into_router(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["accessToken"], "new-access");
    assert_eq!(body["data"]["email"], "test@example.com");
}

#[tokio::test]
async fn test_internal_errors_are_masked() {
    let mut mocks = Mocks::new();
    mocks
        .roles
        .expect_get_role()
        .times(1)
        .returning(|_| Err(DomainError::Repository("connection reset by peer".to_string())));

    let (status, body) = send(mocks.into_router(), get("/api/roles/3", &access_token(1))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["data"]["message"],
        "We are working to improve the flow of this request."
    );
}

#[tokio::test]
async fn test_missing_entity_is_not_found() {
    let mut mocks = Mocks::new();
    mocks
        .roles
        .expect_get_role()
        .withf(|id| *id == RoleId(9))
        .times(1)
        .returning(|id| Err(DomainError::not_found("Role", id)));

    let (status, body) = send(mocks.into_router(), get("/api/roles/9", &access_token(1))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["message"], "Role not found: 9");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let router = Mocks::new().into_router();

    let request = json_request(
        "POST",
        "/api/roles",
        Some(&access_token(1)),
        "{\"name\": ".to_string(),
    );
    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"]["message"].is_string());
}

#[tokio::test]
async fn test_create_role_returns_created() {
    let mut mocks = Mocks::new();
    mocks
        .roles
        .expect_create_role()
        .withf(|command| command.name.as_str() == "auditor" && command.enabled)
        .times(1)
        .returning(|command| {
            Ok(Role {
                id: RoleId(2),
                name: command.name,
                description: command.description,
                enabled: command.enabled,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        });

    let request = json_request(
        "POST",
        "/api/roles",
        Some(&access_token(1)),
        json!({ "name": "auditor", "description": "Read only" }).to_string(),
    );
    let (status, body) = send(mocks.into_router(), request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["data"]["id"], 2);
    assert_eq!(body["data"]["description"], "Read only");
}

#[tokio::test]
async fn test_search_params_reach_service() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_search_users()
        .withf(|query| {
            query.pagination == Pagination::new(2, 5)
                && query.likes.len() == 1
                && query.likes[0].column == "username"
                && query.likes[0].text == "ad"
                && query.matches.len() == 1
                && query.matches[0].column == "email"
                && query.matches[0].values == vec!["a@x.com", "b@x.com"]
        })
        .times(1)
        .returning(|query| Ok(Page::new(vec![sample_user()], 11, query.pagination)));

    let uri = "/api/users/search-paginated?page=2&limit=5&username_like=ad\
               &email_match=a%40x.com&email_match=b%40x.com&password_hash_like=x";
    let (status, body) = send(mocks.into_router(), get(uri, &access_token(1))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["currentPage"], 2);
    assert_eq!(body["data"]["pageSize"], 5);
    assert_eq!(body["data"]["totalRecords"], 11);
    assert_eq!(body["data"]["totalPages"], 3);
    assert_eq!(body["data"]["records"][0]["role"]["name"], "admin");
}

#[tokio::test]
async fn test_coincidences_reject_unknown_property() {
    let router = Mocks::new().into_router();

    let uri = "/api/medicines/search-by-property?property=password&search_text=a";
    let (status, body) = send(router, get(uri, &access_token(1))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["message"], "Property 'password' cannot be searched");
}

#[tokio::test]
async fn test_coincidences_return_values() {
    let mut mocks = Mocks::new();
    mocks
        .medicines
        .expect_medicine_coincidences()
        .withf(|query| query.column == "laboratory" && query.search_text == "ac")
        .times(1)
        .returning(|_| Ok(vec!["Acme".to_string(), "Bacon Labs".to_string()]));

    let uri = "/api/medicines/search-by-property?property=laboratory&search_text=ac";
    let (status, body) = send(mocks.into_router(), get(uri, &access_token(1))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!(["Acme", "Bacon Labs"]));
}

#[tokio::test]
async fn test_invalid_medicine_type_is_bad_request() {
    let router = Mocks::new().into_router();

    let request = json_request(
        "POST",
        "/api/medicines",
        Some(&access_token(1)),
        json!({ "eanCode": "7501", "description": "Paracetamol", "type": "syrup" }).to_string(),
    );
    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["data"]["message"],
        "Invalid type 'syrup': allowed values are injection, tablet, capsule"
    );
}

#[tokio::test]
async fn test_role_in_use_is_conflict() {
    let mut mocks = Mocks::new();
    mocks.roles.expect_delete_role().times(1).returning(|id| {
        Err(DomainError::Conflict(format!(
            "Role {} is still assigned to users",
            id
        )))
    });

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/roles/1")
        .header(header::AUTHORIZATION, format!("Bearer {}", access_token(1)))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(mocks.into_router(), request).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["data"]["message"], "Role 1 is still assigned to users");
}

#[tokio::test]
async fn test_delete_sub_client_confirms() {
    let mut mocks = Mocks::new();
    mocks
        .clients
        .expect_delete_sub_client()
        .withf(|id| *id == SubClientId(3))
        .times(1)
        .returning(|_| Ok(()));

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/sub-clients/3")
        .header(header::AUTHORIZATION, format!("Bearer {}", access_token(1)))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(mocks.into_router(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], "Sub-client deleted successfully");
}

#[tokio::test]
async fn test_add_program_under_missing_sub_client() {
    let mut mocks = Mocks::new();
    mocks
        .clients
        .expect_add_program()
        .times(1)
        .returning(|id, _| Err(DomainError::not_found("Sub-client", id)));

    let request = json_request(
        "POST",
        "/api/sub-clients/77/programs",
        Some(&access_token(1)),
        json!({ "name": "Diabetes care" }).to_string(),
    );
    let (status, body) = send(mocks.into_router(), request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["message"], "Sub-client not found: 77");
}

#[tokio::test]
async fn test_non_numeric_id_is_enveloped_bad_request() {
    let router = Mocks::new().into_router();

    let (status, body) = send(router, get("/api/medicines/abc", &access_token(1))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusCode"], 400);
    assert!(body["data"]["message"].is_string());
}

#[tokio::test]
async fn test_current_device_reads_request_headers() {
    let router = Mocks::new().into_router();
    let request = Request::builder()
        .uri("/api/device")
        .header(header::AUTHORIZATION, format!("Bearer {}", access_token(1)))
        .header(
            header::USER_AGENT,
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        )
        .header(header::ACCEPT_LANGUAGE, "es-MX")
        .header("x-forwarded-for", "203.0.113.5")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["ip_address"], "203.0.113.5");
    assert_eq!(body["data"]["device_type"], "desktop");
    assert_eq!(body["data"]["browser"], "Chrome");
    assert_eq!(body["data"]["os"], "Windows 10");
    assert_eq!(body["data"]["language"], "es-MX");
}

#[tokio::test]
async fn test_current_device_requires_token() {
    let router = Mocks::new().into_router();
    let request = Request::builder()
        .uri("/api/device")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(router, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
