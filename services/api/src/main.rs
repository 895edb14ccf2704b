use std::net::SocketAddr;
use std::sync::Arc;

use sea_orm::Database;
use tracing::info;

use propelty_domain::password::PasswordPolicy;

use propelty_api::router::build_router;
use propelty_api::settings::Settings;
use propelty_api::state::AppState;
use propelty_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    let settings = Settings::from_env().expect("invalid configuration");
    init_tracing(settings.debug);

    let db = Database::connect(&settings.database_url)
        .await
        .expect("failed to connect to database");

    let redis_cfg = deadpool_redis::Config::from_url(&settings.redis.url);
    let redis = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .expect("failed to create Redis pool");

    let mut password_policy = PasswordPolicy::default();
    if let Some(path) = &settings.common_passwords_file {
        let list = std::fs::read_to_string(path).expect("failed to read common passwords file");
        password_policy = password_policy.with_common_list(&list);
        info!(
            path = %path,
            entries = password_policy.extra_common_len(),
            "loaded common passwords"
        );
    }

    let addr = format!("0.0.0.0:{}", settings.api_port);
    let state = AppState {
        db,
        redis,
        settings: Arc::new(settings),
        password_policy: Arc::new(password_policy),
    };

    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("api service listening on {addr}");
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("server error");
}
