use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::http::header::SET_COOKIE;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use propelty_auth_types::cookie::{CookiePolicy, session_cookie, session_key};

use crate::state::AppState;

/// Re-send the session cookies with a full `Max-Age` on every successful response, so the
/// browser expiry slides along with the Redis TTL. Only active with
/// `SESSION_SAVE_EVERY_REQUEST`; handlers that set the cookie themselves win.
pub async fn refresh_session_cookies(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !state.settings.session_save_every_request {
        return next.run(request).await;
    }

    let jar = CookieJar::from_headers(request.headers());
    let policies = [
        &state.settings.session_cookie,
        &state.settings.admin_session_cookie,
    ];
    let held: Vec<(&CookiePolicy, String)> = policies
        .into_iter()
        .filter_map(|policy| session_key(&jar, policy).map(|key| (policy, key)))
        .collect();

    let mut response = next.run(request).await;
    if !response.status().is_success() {
        return response;
    }
    for (policy, key) in held {
        if sets_cookie(&response, policy.name) {
            continue;
        }
        if let Ok(value) = HeaderValue::from_str(&session_cookie(policy, key).to_string()) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    response
}

fn sets_cookie(response: &Response, name: &str) -> bool {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.strip_prefix(name).is_some_and(|rest| rest.starts_with('=')))
}
