use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, Method, header},
    middleware::from_fn_with_state,
    routing::{get, patch, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use propelty_core::health::healthz;
use propelty_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    auth::{admin_sign_in, admin_sign_out, sign_in, sign_out, sign_up},
    debug::debug_settings,
    health::readyz,
    user::{get_me, list_users, update_me},
};
use crate::middleware::refresh_session_cookies;
use crate::settings::{API_KEY_HEADER, CorsSettings};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = build_cors(&state.settings.cors);
    let body_limit = state.settings.file_size_limit;

    let mut router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/sign-up", post(sign_up))
        .route("/auth/sign-in", post(sign_in))
        .route("/auth/sign-out", post(sign_out))
        .route("/auth/admin/sign-in", post(admin_sign_in))
        .route("/auth/admin/sign-out", post(admin_sign_out))
        // Users
        .route("/api/users/me", get(get_me))
        .route("/api/users/me", patch(update_me))
        .route("/api/admin/users", get(list_users));

    if state.settings.debug {
        router = router.route("/__debug__/settings", get(debug_settings));
    }

    router
        .layer(from_fn_with_state(state.clone(), refresh_session_cookies))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(cors)
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
}

/// Credentialed CORS. With no configured origins the request origin is mirrored back,
/// since a wildcard origin cannot be combined with credentials.
fn build_cors(settings: &CorsSettings) -> CorsLayer {
    let origin = if settings.allow_all() {
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = settings
            .allowed_origins
            .iter()
            .filter_map(|s| {
                s.parse::<HeaderValue>()
                    .map_err(|e| warn!(origin = %s, error = %e, "ignoring bad CORS origin"))
                    .ok()
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::DELETE,
            Method::GET,
            Method::OPTIONS,
            Method::PATCH,
            Method::POST,
            Method::PUT,
        ])
        .allow_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::USER_AGENT,
            HeaderName::from_static("x-csrftoken"),
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static(API_KEY_HEADER),
        ])
        .allow_credentials(true)
}
