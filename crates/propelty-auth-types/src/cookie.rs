//! Cookie builders for the user and admin session cookies.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the regular user session.
pub const SESSION_COOKIE_NAME: &str = "propelty-session-id";

/// Cookie name for the admin session.
pub const ADMIN_SESSION_COOKIE_NAME: &str = "propelty-admin-session-id";

/// Default user session lifetime in seconds (7 days).
pub const SESSION_COOKIE_AGE: i64 = 604800;

/// Default admin session lifetime in seconds (1 hour).
pub const ADMIN_SESSION_COOKIE_AGE: i64 = 3600;

/// Attributes applied to a session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookiePolicy {
    pub name: &'static str,
    pub max_age_secs: i64,
    pub domain: Option<String>,
    pub secure: bool,
    pub http_only: bool,
}

impl CookiePolicy {
    fn build(&self, value: String, max_age: Duration) -> Cookie<'static> {
        let mut builder = Cookie::build((self.name, value))
            .path("/")
            .max_age(max_age)
            .http_only(self.http_only)
            .secure(self.secure)
            .same_site(SameSite::Lax);
        if let Some(domain) = &self.domain {
            builder = builder.domain(domain.clone());
        }
        builder.build()
    }
}

/// A live session cookie, for layers that write `Set-Cookie` without a jar.
pub fn session_cookie(policy: &CookiePolicy, value: String) -> Cookie<'static> {
    policy.build(value, Duration::seconds(policy.max_age_secs))
}

/// Set the session cookie described by `policy` on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use propelty_auth_types::cookie::{set_session_cookie, CookiePolicy, SESSION_COOKIE_NAME};
///
/// let policy = CookiePolicy {
///     name: SESSION_COOKIE_NAME,
///     max_age_secs: 604800,
///     domain: Some("example.com".to_string()),
///     secure: true,
///     http_only: true,
/// };
/// let jar = set_session_cookie(CookieJar::new(), &policy, "abc".to_string());
/// let cookie = jar.get(SESSION_COOKIE_NAME).unwrap();
/// assert_eq!(cookie.value(), "abc");
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("example.com"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(604800)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_session_cookie(jar: CookieJar, policy: &CookiePolicy, value: String) -> CookieJar {
    jar.add(session_cookie(policy, value))
}

/// Expire the session cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use propelty_auth_types::cookie::{
///     clear_session_cookie, set_session_cookie, CookiePolicy, ADMIN_SESSION_COOKIE_NAME,
/// };
///
/// let policy = CookiePolicy {
///     name: ADMIN_SESSION_COOKIE_NAME,
///     max_age_secs: 3600,
///     domain: None,
///     secure: false,
///     http_only: true,
/// };
/// let jar = set_session_cookie(CookieJar::new(), &policy, "abc".to_string());
/// let jar = clear_session_cookie(jar, &policy);
/// let cookie = jar.get(ADMIN_SESSION_COOKIE_NAME).unwrap();
/// assert_eq!(cookie.value(), "");
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_session_cookie(jar: CookieJar, policy: &CookiePolicy) -> CookieJar {
    jar.add(policy.build(String::new(), Duration::ZERO))
}

/// Read the session key from the jar. Empty values count as absent.
pub fn session_key(jar: &CookieJar, policy: &CookiePolicy) -> Option<String> {
    jar.get(policy.name)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty())
}
