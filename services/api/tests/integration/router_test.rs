use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use propelty_api::router::build_router;
use propelty_domain::password::PasswordPolicy;
use propelty_api::settings::Settings;
use propelty_api::state::AppState;
use propelty_testing::auth::MockSession;
use propelty_testing::env::TestEnv;

/// A server whose stores are never reachable; only paths that stop before I/O succeed.
fn server(env: TestEnv) -> TestServer {
    let settings = Settings::load(&env).unwrap();
    let redis = deadpool_redis::Config::from_url(&settings.redis.url)
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .unwrap();
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        redis,
        settings: Arc::new(settings),
        password_policy: Arc::new(PasswordPolicy::default()),
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn should_answer_liveness_check() {
    let response = server(TestEnv::default()).get("/healthz").await;
    response.assert_status_ok();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn should_report_not_ready_without_database() {
    let response = server(TestEnv::default()).get("/readyz").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_require_session_for_me() {
    let response = server(TestEnv::default()).get("/api/users/me").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["kind"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn should_report_internal_error_when_session_store_is_down() {
    let (name, value) = MockSession::user("abc123").header();
    let response = server(TestEnv::default().with("REDIS_URL", "redis://127.0.0.1:1"))
        .get("/api/users/me")
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INTERNAL");
}

#[tokio::test]
async fn should_validate_sign_up_before_touching_database() {
    let response = server(TestEnv::default())
        .post("/auth/sign-up")
        .json(&json!({ "email": "not-an-email", "password": "violet-harbor-42" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_EMAIL");
}

#[tokio::test]
async fn should_hide_debug_settings_unless_debug() {
    let response = server(TestEnv::default()).get("/__debug__/settings").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_serve_redacted_settings_in_debug() {
    let response = server(TestEnv::default().with("DEBUG", "1"))
        .get("/__debug__/settings")
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["debug"], true);
    assert_eq!(body["secret_key"], "********");
    assert_eq!(body["session_cookie"]["name"], "propelty-session-id");
}

#[tokio::test]
async fn should_mirror_origin_when_no_origins_configured() {
    let response = server(TestEnv::default())
        .get("/healthz")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("https://app.example.com"),
        )
        .await;
    let headers = response.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        "https://app.example.com"
    );
    assert_eq!(
        headers.get("access-control-allow-credentials").unwrap(),
        "true"
    );
}

#[tokio::test]
async fn should_only_allow_configured_origins() {
    let server = server(TestEnv::default().with("CORS_ALLOWED_ORIGINS", "https://app.example.com"));

    let allowed = server
        .get("/healthz")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("https://app.example.com"),
        )
        .await;
    assert_eq!(
        allowed.headers().get("access-control-allow-origin").unwrap(),
        "https://app.example.com"
    );

    let denied = server
        .get("/healthz")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("https://evil.example.net"),
        )
        .await;
    assert!(!denied.headers().contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn should_deny_framing() {
    let response = server(TestEnv::default()).get("/healthz").await;
    assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
}

#[tokio::test]
async fn should_gzip_when_client_accepts_it() {
    let response = server(TestEnv::default().with("DEBUG", "1"))
        .get("/__debug__/settings")
        .add_header(
            HeaderName::from_static("accept-encoding"),
            HeaderValue::from_static("gzip"),
        )
        .await;
    response.assert_status_ok();
    assert_eq!(response.headers().get("content-encoding").unwrap(), "gzip");
}

#[tokio::test]
async fn should_resend_session_cookie_when_saving_every_request() {
    let (name, value) = MockSession::user("abc123").header();
    let response = server(TestEnv::default().with("SESSION_SAVE_EVERY_REQUEST", "1"))
        .get("/healthz")
        .add_header(name, value)
        .await;
    response.assert_status_ok();
    let cookie = response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    assert!(cookie.starts_with("propelty-session-id=abc123"));
    assert!(cookie.contains("Max-Age=604800"));
}

#[tokio::test]
async fn should_not_resend_session_cookie_by_default() {
    let (name, value) = MockSession::user("abc123").header();
    let response = server(TestEnv::default())
        .get("/healthz")
        .add_header(name, value)
        .await;
    response.assert_status_ok();
    assert!(!response.headers().contains_key("set-cookie"));
}

#[tokio::test]
async fn should_not_resend_session_cookie_on_failure() {
    let (name, value) = MockSession::user("abc123").header();
    let response = server(
        TestEnv::default()
            .with("SESSION_SAVE_EVERY_REQUEST", "1")
            .with("REDIS_URL", "redis://127.0.0.1:1"),
    )
    .get("/api/users/me")
    .add_header(name, value)
    .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!response.headers().contains_key("set-cookie"));
}

#[tokio::test]
async fn should_ignore_user_cookie_on_admin_routes() {
    let (name, value) = MockSession::user("abc123").header();
    let server = server(TestEnv::default());

    let list = server
        .get("/api/admin/users")
        .add_header(name.clone(), value.clone())
        .await;
    list.assert_status(StatusCode::UNAUTHORIZED);

    let sign_out = server
        .post("/auth/admin/sign-out")
        .add_header(name, value)
        .await;
    sign_out.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = sign_out.json();
    assert_eq!(body["kind"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn should_look_up_admin_cookie_in_session_store() {
    let (name, value) = MockSession::admin("xyz").header();
    let response = server(TestEnv::default().with("REDIS_URL", "redis://127.0.0.1:1"))
        .get("/api/admin/users")
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn should_reject_oversized_sign_up_field() {
    let response = server(TestEnv::default())
        .post("/auth/sign-up")
        .json(&json!({
            "email": "alice@example.com",
            "password": "violet-harbor-42",
            "display_name": "x".repeat(300),
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_INPUT");
}
