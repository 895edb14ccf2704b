use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum_extra::extract::CookieJar;
use tracing::warn;

use propelty_auth_types::cookie::session_key;
use propelty_domain::id::UserId;

use crate::domain::types::ClientMeta;
use crate::error::ApiServiceError;
use crate::state::AppState;

/// The signed-in user behind the session cookie.
///
/// Rejects with 401 `UNAUTHENTICATED` when the cookie is absent or the session has expired.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub user_id: UserId,
    pub session_key: String,
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = ApiServiceError;

    // Pull everything out of `parts` and `state` up front so the returned future is 'static.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let jar = CookieJar::from_headers(&parts.headers);
        let key = session_key(&jar, &state.settings.session_cookie);
        let usecase = state.resolve_session();

        async move {
            let session = usecase.execute(key).await?;
            Ok(Self {
                user_id: session.user_id,
                session_key: session.key,
            })
        }
    }
}

/// Same as [`CurrentSession`] for the admin cookie and its own session namespace.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub user_id: UserId,
    pub session_key: String,
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiServiceError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let jar = CookieJar::from_headers(&parts.headers);
        let key = session_key(&jar, &state.settings.admin_session_cookie);
        let usecase = state.resolve_admin_session();

        async move {
            let session = usecase.execute(key).await?;
            Ok(Self {
                user_id: session.user_id,
                session_key: session.key,
            })
        }
    }
}

impl<S> FromRequestParts<S> for ClientMeta
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());
        let meta = ClientMeta {
            ip: client_ip(&parts.headers, peer),
            user_agent: parts
                .headers
                .get(USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_owned(),
        };
        async move { Ok(meta) }
    }
}

/// First hop of `X-Forwarded-For`, then `X-Real-IP`, then the socket peer.
fn client_ip(headers: &HeaderMap, peer: Option<String>) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    if let Some(ip) = forwarded {
        if ip.parse::<std::net::IpAddr>().is_ok() {
            return ip.to_owned();
        }
        warn!(value = ip, "ignoring malformed x-forwarded-for");
    }

    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| v.parse::<std::net::IpAddr>().is_ok())
        .map(str::to_owned)
        .or(peer)
        .unwrap_or_default()
}
