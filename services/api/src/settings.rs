use propelty_auth_types::cookie::{
    ADMIN_SESSION_COOKIE_AGE, ADMIN_SESSION_COOKIE_NAME, CookiePolicy, SESSION_COOKIE_AGE,
    SESSION_COOKIE_NAME,
};
use propelty_core::config::{
    ConfigError, EnvSource, ProcessEnv, flag, optional, parse_or, required,
};
use rand::RngExt;
use url::Url;

/// Seconds a password-reset link stays valid.
pub const PASSWORD_RESET_TIMEOUT_SECS: i64 = 3600;

/// Server-side time zone for stored timestamps.
pub const TIME_ZONE: &str = "UTC";

/// Extra request header accepted by CORS on top of the default set.
pub const API_KEY_HEADER: &str = "x-api-key";

pub const DEFAULT_API_PORT: u16 = 8000;
pub const DEFAULT_POSTGRES_PORT: u16 = 5432;
pub const DEFAULT_FILE_SIZE_LIMIT: usize = 5_242_880;
pub const DEFAULT_HARD_DELETE_AFTER_DAYS: i64 = 60;
/// CA bundle handed to broker clients on `rediss` URLs unless `SSL_CERT_FILE` overrides it.
pub const DEFAULT_CA_BUNDLE: &str = "/etc/ssl/certs/ca-certificates.crt";

const SECRET_KEY_LEN: usize = 50;
const SECRET_KEY_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*(-_=+)";

/// Redis connection and the broker URL derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisSettings {
    pub url: String,
    /// True when the URL uses the `rediss` scheme.
    pub ssl: bool,
    /// Broker URL for background workers. SSL URLs skip peer verification and name a CA bundle.
    pub broker_url: String,
}

/// Cross-origin policy. An empty origin list allows every origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
    /// True when origins are pinned and none of them is plain `http:`.
    pub secure_origins: bool,
}

impl CorsSettings {
    pub fn allow_all(&self) -> bool {
        self.allowed_origins.is_empty()
    }
}

/// CSRF cookie attributes and trusted origins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfSettings {
    pub trusted_origins: Vec<String>,
    pub cookie_secure: bool,
    pub cookie_http_only: bool,
    pub cookie_domain: Option<String>,
}

/// Public base URLs of the sibling front-ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseUrls {
    pub admin: Option<String>,
    pub space: Option<String>,
    pub app: Option<String>,
}

/// API service settings loaded once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub secret_key: String,
    pub debug: bool,
    /// TCP port for the HTTP server. Env var: `API_PORT`.
    pub api_port: u16,
    pub database_url: String,
    pub redis: RedisSettings,
    pub cors: CorsSettings,
    pub csrf: CsrfSettings,
    pub session_cookie: CookiePolicy,
    pub admin_session_cookie: CookiePolicy,
    /// Refresh the session TTL on every authenticated request.
    pub session_save_every_request: bool,
    pub base_urls: BaseUrls,
    /// Maximum upload and request body size in bytes.
    pub file_size_limit: usize,
    pub use_minio: bool,
    pub hard_delete_after_days: i64,
    pub skip_env_var: bool,
    /// Newline-separated passwords rejected on top of the built-in list.
    pub common_passwords_file: Option<String>,
}

impl Settings {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(&ProcessEnv)
    }

    pub fn load(env: &impl EnvSource) -> Result<Self, ConfigError> {
        let cors = cors_settings(env);
        let cookie_domain = optional(env, "COOKIE_DOMAIN");

        let session_cookie = CookiePolicy {
            name: SESSION_COOKIE_NAME,
            max_age_secs: parse_or(env, "SESSION_COOKIE_AGE", SESSION_COOKIE_AGE)?,
            domain: cookie_domain.clone(),
            secure: cors.secure_origins,
            http_only: true,
        };
        let admin_session_cookie = CookiePolicy {
            name: ADMIN_SESSION_COOKIE_NAME,
            max_age_secs: parse_or(env, "ADMIN_SESSION_COOKIE_AGE", ADMIN_SESSION_COOKIE_AGE)?,
            ..session_cookie.clone()
        };
        let csrf = CsrfSettings {
            trusted_origins: cors.allowed_origins.clone(),
            cookie_secure: cors.secure_origins,
            cookie_http_only: true,
            cookie_domain,
        };

        Ok(Self {
            secret_key: optional(env, "SECRET_KEY").unwrap_or_else(generate_secret_key),
            debug: parse_or::<i64>(env, "DEBUG", 0)? != 0,
            api_port: parse_or(env, "API_PORT", DEFAULT_API_PORT)?,
            database_url: database_url(env)?,
            redis: redis_settings(env)?,
            cors,
            csrf,
            session_cookie,
            admin_session_cookie,
            session_save_every_request: flag(env, "SESSION_SAVE_EVERY_REQUEST", "0"),
            base_urls: BaseUrls {
                admin: optional(env, "ADMIN_BASE_URL"),
                space: optional(env, "SPACE_BASE_URL"),
                app: optional(env, "APP_BASE_URL"),
            },
            file_size_limit: parse_or(env, "FILE_SIZE_LIMIT", DEFAULT_FILE_SIZE_LIMIT)?,
            use_minio: parse_or::<i64>(env, "USE_MINIO", 0)? == 1,
            hard_delete_after_days: parse_or(
                env,
                "HARD_DELETE_AFTER_DAYS",
                DEFAULT_HARD_DELETE_AFTER_DAYS,
            )?,
            skip_env_var: flag(env, "SKIP_ENV_VAR", "1"),
            common_passwords_file: optional(env, "COMMON_PASSWORDS_FILE"),
        })
    }

    /// Settings as JSON with credentials masked, for the debug endpoint.
    pub fn redacted(&self) -> serde_json::Value {
        serde_json::json!({
            "debug": self.debug,
            "api_port": self.api_port,
            "secret_key": "********",
            "database_url": redact_url(&self.database_url),
            "redis": {
                "url": redact_url(&self.redis.url),
                "ssl": self.redis.ssl,
                "broker_url": redact_url(&self.redis.broker_url),
            },
            "cors": {
                "allow_all_origins": self.cors.allow_all(),
                "allowed_origins": self.cors.allowed_origins,
                "secure_origins": self.cors.secure_origins,
            },
            "csrf": {
                "trusted_origins": self.csrf.trusted_origins,
                "cookie_secure": self.csrf.cookie_secure,
                "cookie_http_only": self.csrf.cookie_http_only,
                "cookie_domain": self.csrf.cookie_domain,
            },
            "session_cookie": cookie_json(&self.session_cookie),
            "admin_session_cookie": cookie_json(&self.admin_session_cookie),
            "session_save_every_request": self.session_save_every_request,
            "base_urls": {
                "admin": self.base_urls.admin,
                "space": self.base_urls.space,
                "app": self.base_urls.app,
            },
            "file_size_limit": self.file_size_limit,
            "use_minio": self.use_minio,
            "hard_delete_after_days": self.hard_delete_after_days,
            "skip_env_var": self.skip_env_var,
            "common_passwords_file": self.common_passwords_file,
            "password_reset_timeout": PASSWORD_RESET_TIMEOUT_SECS,
            "time_zone": TIME_ZONE,
        })
    }
}

fn cookie_json(policy: &CookiePolicy) -> serde_json::Value {
    serde_json::json!({
        "name": policy.name,
        "age": policy.max_age_secs,
        "domain": policy.domain,
        "secure": policy.secure,
        "http_only": policy.http_only,
    })
}

fn generate_secret_key() -> String {
    let mut rng = rand::rng();
    (0..SECRET_KEY_LEN)
        .map(|_| SECRET_KEY_CHARS[rng.random_range(0..SECRET_KEY_CHARS.len())] as char)
        .collect()
}

/// `DATABASE_URL` when set, otherwise a Postgres URL composed from `POSTGRES_*`.
fn database_url(env: &impl EnvSource) -> Result<String, ConfigError> {
    if let Some(url) = optional(env, "DATABASE_URL") {
        return Ok(url);
    }
    let host = required(env, "POSTGRES_HOST")?;
    let port = parse_or(env, "POSTGRES_PORT", DEFAULT_POSTGRES_PORT)?;
    let mut url = Url::parse(&format!("postgres://{host}:{port}")).map_err(|_| {
        ConfigError::Invalid {
            key: "POSTGRES_HOST",
            value: host.clone(),
        }
    })?;
    if let Some(user) = optional(env, "POSTGRES_USER") {
        url.set_username(&user).map_err(|_| ConfigError::Invalid {
            key: "POSTGRES_USER",
            value: user.clone(),
        })?;
    }
    if let Some(password) = optional(env, "POSTGRES_PASSWORD") {
        url.set_password(Some(&password))
            .map_err(|_| ConfigError::Invalid {
                key: "POSTGRES_PASSWORD",
                value: "********".to_owned(),
            })?;
    }
    if let Some(db) = optional(env, "POSTGRES_DB") {
        url.set_path(&db);
    }
    Ok(url.to_string())
}

fn redis_settings(env: &impl EnvSource) -> Result<RedisSettings, ConfigError> {
    let url = required(env, "REDIS_URL")?;
    let ssl = url.contains("rediss");
    let broker_url = if ssl {
        let sep = if url.contains('?') { '&' } else { '?' };
        let ca_certs =
            optional(env, "SSL_CERT_FILE").unwrap_or_else(|| DEFAULT_CA_BUNDLE.to_owned());
        format!("{url}{sep}ssl_cert_reqs=CERT_NONE&ssl_ca_certs={ca_certs}")
    } else {
        url.clone()
    };
    Ok(RedisSettings {
        url,
        ssl,
        broker_url,
    })
}

fn cors_settings(env: &impl EnvSource) -> CorsSettings {
    let allowed_origins: Vec<String> = env
        .var("CORS_ALLOWED_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_owned)
        .collect();
    let secure_origins =
        !allowed_origins.is_empty() && !allowed_origins.iter().any(|o| o.contains("http:"));
    CorsSettings {
        allowed_origins,
        secure_origins,
    }
}

/// Mask the password component of a URL, if any.
fn redact_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) if url.password().is_some() => {
            let _ = url.set_password(Some("********"));
            url.to_string()
        }
        Ok(url) => url.to_string(),
        Err(_) => "<unparsable>".to_owned(),
    }
}
