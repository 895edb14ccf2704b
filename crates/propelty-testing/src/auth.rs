//! Session cookie helpers for integration tests.
//!
//! Handlers authenticate through a session cookie. `MockSession` renders the `Cookie`
//! header a browser would send so tests can hit protected routes directly.

use axum::http::{HeaderName, HeaderValue, header::COOKIE};

use propelty_auth_types::cookie::{ADMIN_SESSION_COOKIE_NAME, SESSION_COOKIE_NAME};

/// A session key plus the cookie it is carried in.
pub struct MockSession {
    pub cookie_name: &'static str,
    pub key: String,
}

impl MockSession {
    pub fn user(key: impl Into<String>) -> Self {
        Self {
            cookie_name: SESSION_COOKIE_NAME,
            key: key.into(),
        }
    }

    pub fn admin(key: impl Into<String>) -> Self {
        Self {
            cookie_name: ADMIN_SESSION_COOKIE_NAME,
            key: key.into(),
        }
    }

    /// `Cookie: <name>=<key>`.
    pub fn header(&self) -> (HeaderName, HeaderValue) {
        let value = HeaderValue::from_str(&format!("{}={}", self.cookie_name, self.key))
            .expect("session key must be a valid header value");
        (COOKIE, value)
    }
}
