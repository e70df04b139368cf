use axum::{
    body::{to_bytes, Body},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        HeaderMap, Request, StatusCode,
    },
    Router,
};
use async_trait::async_trait;
use employee_desk::app::employee::model::{Employee, EmployeeField};
use employee_desk::app::employee::repository::{EmployeeStore, StoreError};
use employee_desk::app::employee::validation::Ssn;
use employee_desk::infrastructure::memory::MemoryEmployeeStore;
use employee_desk::{create_routes, AppState};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

const PASSWORD: &str = "Test-Pass-123";

fn app() -> Router {
    app_with_state().0
}

fn app_with_state() -> (Router, AppState) {
    let store = Arc::new(MemoryEmployeeStore::with_sample_data());
    let state = AppState::new(store, PASSWORD, Duration::from_secs(600));
    (create_routes(state.clone(), Duration::from_secs(5)), state)
}

/// 模拟数据库不可达
struct UnreachableStore;

#[async_trait]
impl EmployeeStore for UnreachableStore {
    async fn fetch_by_ssn(&self, _ssn: &Ssn) -> Result<Option<Employee>, StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn update_field(
        &self,
        _ssn: &Ssn,
        _field: EmployeeField,
        _value: &str,
    ) -> Result<u64, StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }
}

fn unreachable_app() -> Router {
    let state = AppState::new(Arc::new(UnreachableStore), PASSWORD, Duration::from_secs(600));
    create_routes(state, Duration::from_secs(5))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, String) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

fn session_cookie(headers: &HeaderMap) -> String {
    headers
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .expect("response should set a session cookie")
        .to_string()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn api(method: &str, uri: &str, token: Option<&str>, json: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
    }
    match json {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn login(app: &Router) -> String {
    let (status, headers, body) =
        send(app, post_form("/login", None, &format!("password={}", PASSWORD))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Password verified. You may proceed."));
    session_cookie(&headers)
}

#[tokio::test]
async fn test_home_shows_login_form_and_sets_cookie() {
    let app = app();
    let (status, headers, body) = send(&app, get("/", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Employee Management System"));
    assert!(body.contains("type=\"password\""));
    assert!(!body.contains("Logout"));
    assert!(session_cookie(&headers).starts_with("employee_desk_session="));
}

#[tokio::test]
async fn test_forms_require_login() {
    let app = app();
    for uri in ["/employees/view", "/employees/update", "/transfers"] {
        let (status, headers, _) = send(&app, get(uri, None)).await;
        assert_eq!(status, StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(headers.get(LOCATION).unwrap(), "/");
    }
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let app = app();
    let (_, headers, _) = send(&app, get("/", None)).await;
    let cookie = session_cookie(&headers);

    for attempt in ["test-pass-123", "Test-Pass-123 ", ""] {
        let body = format!("password={}", attempt.replace(' ', "+"));
        let (status, _, page) = send(&app, post_form("/login", Some(&cookie), &body)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(page.contains("Incorrect password. Please try again."));
    }

    let (status, _, _) = send(&app, get("/employees/view", Some(&cookie))).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_view_employee_details() {
    let app = app();
    let cookie = login(&app).await;

    let (status, _, body) = send(
        &app,
        post_form("/employees/view", Some(&cookie), "ssn=123456789"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Employee Details for John Smith"));
    assert!(body.contains("<dd>123-45-6789</dd>"));
    assert!(body.contains("<dd>$1500.00</dd>"));
    assert!(body.contains("Logout"));
}

#[tokio::test]
async fn test_view_missing_and_malformed_ssn() {
    let app = app();
    let cookie = login(&app).await;

    let (status, _, body) = send(
        &app,
        post_form("/employees/view", Some(&cookie), "ssn=999999999"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("No employee found with SSN: 999-99-9999"));

    let (status, _, body) = send(
        &app,
        post_form("/employees/view", Some(&cookie), "ssn=12-345-6789"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Invalid SSN format."));
}

#[tokio::test]
async fn test_view_rejects_padded_ssn() {
    let app = app();
    let cookie = login(&app).await;

    for body in ["ssn=+123456789", "ssn=123-45-6789%09"] {
        let (status, _, page) =
            send(&app, post_form("/employees/view", Some(&cookie), body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert!(page.contains("Invalid SSN format."));
    }
}

#[tokio::test]
async fn test_update_email_flow() {
    let app = app();
    let cookie = login(&app).await;

    let (status, _, body) = send(
        &app,
        post_form(
            "/employees/update",
            Some(&cookie),
            "ssn=123456789&field=email&value=not-an-email",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Invalid email format. Update failed."));

    let (status, _, body) = send(
        &app,
        post_form(
            "/employees/update",
            Some(&cookie),
            "ssn=123456789&field=email&value=john%40corp.example.com",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Email updated successfully."));

    let (_, _, body) = send(
        &app,
        post_form("/employees/view", Some(&cookie), "ssn=123-45-6789"),
    )
    .await;
    assert!(body.contains("<dd>john@corp.example.com</dd>"));
}

#[tokio::test]
async fn test_update_rejects_unknown_column() {
    let app = app();
    let cookie = login(&app).await;

    let (status, _, body) = send(
        &app,
        post_form(
            "/employees/update",
            Some(&cookie),
            "ssn=123456789&field=balance&value=1000000",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("No valid column selected for update."));
}

#[tokio::test]
async fn test_update_form_remembers_ssn_until_logout() {
    let app = app();
    let cookie = login(&app).await;

    send(
        &app,
        post_form(
            "/employees/update",
            Some(&cookie),
            "ssn=987-65-4321&field=city&value=Austin",
        ),
    )
    .await;

    let (_, _, body) = send(&app, get("/employees/update", Some(&cookie))).await;
    assert!(body.contains("value=\"987-65-4321\""));

    let (status, headers, _) = send(&app, post_form("/logout", Some(&cookie), "")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers.get(LOCATION).unwrap(), "/");

    let (status, _, _) = send(&app, get("/employees/update", Some(&cookie))).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (_, _, body) = send(&app, get("/", Some(&cookie))).await;
    assert!(body.contains("type=\"password\""));
}

#[tokio::test]
async fn test_transfer_messages() {
    let app = app();
    let cookie = login(&app).await;

    let (status, _, body) = send(
        &app,
        post_form(
            "/transfers",
            Some(&cookie),
            "from_ssn=123456789&to_ssn=987-65-4321&amount=250",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Transferred $250 from 123-45-6789 to 987-65-4321."));

    let (status, _, body) = send(
        &app,
        post_form(
            "/transfers",
            Some(&cookie),
            "from_ssn=123456789&to_ssn=987-65-4321&amount=0",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Please enter an amount greater than 0."));

    let (status, _, body) = send(
        &app,
        post_form(
            "/transfers",
            Some(&cookie),
            "from_ssn=123&to_ssn=987-65-4321&amount=10",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Invalid SSN format."));
}

#[tokio::test]
async fn test_api_requires_bearer_password() {
    let app = app();

    let (status, _, _) = send(&app, api("GET", "/api/employees/123456789", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = send(
        &app,
        api("GET", "/api/employees/123456789", Some("wrong"), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_api_employee_round() {
    let app = app();

    let (status, _, body) = send(
        &app,
        api("GET", "/api/employees/987654321", Some(PASSWORD), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["ssn"], "987-65-4321");
    assert_eq!(json["data"]["first_name"], "Maria");

    let (status, _, body) = send(
        &app,
        api(
            "PUT",
            "/api/employees/987-65-4321",
            Some(PASSWORD),
            Some(r#"{"field":"city","value":"Dallas"}"#),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["message"], "City updated successfully.");
    assert_eq!(json["data"]["rows_affected"], 1);

    let (status, _, body) = send(
        &app,
        api("GET", "/api/employees/000-00-0000", Some(PASSWORD), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["message"], "No employee found with SSN: 000-00-0000");
}

#[tokio::test]
async fn test_api_transfer() {
    let app = app();

    let (status, _, body) = send(
        &app,
        api(
            "POST",
            "/api/transfers",
            Some(PASSWORD),
            Some(r#"{"from":"123456789","to":"555123456","amount":"12.5"}"#),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        json["message"],
        "Transferred $12.5 from 123-45-6789 to 555-12-3456."
    );

    let (status, _, _) = send(
        &app,
        api(
            "POST",
            "/api/transfers",
            Some(PASSWORD),
            Some(r#"{"from":"123456789","to":"555123456","amount":"-3"}"#),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_api_bad_bodies_get_json_errors() {
    let app = app();

    let (status, headers, body) = send(
        &app,
        api(
            "POST",
            "/api/transfers",
            Some(PASSWORD),
            Some(r#"{"from":"123456789","to":"555123456","amount":"ten"}"#),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["message"], "Please enter a valid amount.");
    assert_eq!(json["code"], 400);

    let (status, _, body) = send(
        &app,
        api(
            "PUT",
            "/api/employees/123456789",
            Some(PASSWORD),
            Some(r#"{"field":"balance","value":"1000000"}"#),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["message"], "No valid column selected for update.");

    let (status, headers, body) = send(
        &app,
        api("POST", "/api/transfers", Some(PASSWORD), Some("{not json")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_api_transfer_accepts_numeric_amount() {
    let app = app();
    let (status, _, body) = send(
        &app,
        api(
            "POST",
            "/api/transfers",
            Some(PASSWORD),
            Some(r#"{"from":"123456789","to":"555123456","amount":40}"#),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        json["message"],
        "Transferred $40 from 123-45-6789 to 555-12-3456."
    );
}

#[tokio::test]
async fn test_sessions_are_stored_only_after_login() {
    let (app, state) = app_with_state();

    for _ in 0..200 {
        let (status, headers, _) = send(&app, get("/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(headers.get(SET_COOKIE).is_none());
    }
    for _ in 0..20 {
        send(&app, get("/", None)).await;
        send(&app, api("GET", "/api/employees/123456789", Some(PASSWORD), None)).await;
        send(&app, api("GET", "/api/employees/123456789", None, None)).await;
    }
    assert!(state.sessions.is_empty());

    let cookie = login(&app).await;
    assert_eq!(state.sessions.len(), 1);

    send(&app, post_form("/logout", Some(&cookie), "")).await;
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, _, body) = send(&app, get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["database"], "connected");
}

#[tokio::test]
async fn test_database_errors_are_shown_inline() {
    let app = unreachable_app();
    let cookie = login(&app).await;

    let (status, _, body) = send(
        &app,
        post_form("/employees/view", Some(&cookie), "ssn=123456789"),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("alert-error"));
    assert!(body.contains("Error: connection refused"));

    // 转账不访问数据库
    let (status, _, body) = send(
        &app,
        post_form(
            "/transfers",
            Some(&cookie),
            "from_ssn=123456789&to_ssn=987654321&amount=5",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Transferred $5 from 123-45-6789 to 987-65-4321."));

    let (status, _, body) = send(&app, get("/health", None)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["database"], "unreachable");
}
