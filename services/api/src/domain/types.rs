use std::fmt;

use chrono::{DateTime, Utc};

use propelty_domain::id::UserId;
use propelty_domain::token::generate_token;
use propelty_domain::user::{
    DEFAULT_LOGIN_MEDIUM, DEFAULT_TIMEZONE, derive_display_name, normalize_email,
};

/// User account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Argon2 PHC string.
    pub password: String,
    pub last_login: Option<DateTime<Utc>>,
    pub mobile_number: Option<String>,
    pub email: Option<String>,

    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
    pub cover_image: Option<String>,

    pub date_joined: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_location: String,
    pub created_location: String,

    pub is_superuser: bool,
    pub is_managed: bool,
    pub is_password_expired: bool,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_email_verified: bool,
    pub is_password_autoset: bool,

    pub token: String,

    pub last_active: Option<DateTime<Utc>>,
    pub last_login_time: Option<DateTime<Utc>>,
    pub last_logout_time: Option<DateTime<Utc>>,
    pub last_login_ip: String,
    pub last_logout_ip: String,
    pub last_login_medium: String,
    pub last_login_uagent: String,
    pub token_updated_at: Option<DateTime<Utc>>,

    pub is_bot: bool,
    pub user_timezone: String,
}

/// Where a request came from, recorded on login and logout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientMeta {
    pub ip: String,
    pub user_agent: String,
}

impl User {
    /// A fresh, active account with every other field at its default.
    pub fn new(
        username: String,
        email: Option<String>,
        password: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::generate(),
            username,
            password,
            last_login: None,
            mobile_number: None,
            email,
            display_name: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            avatar: String::new(),
            cover_image: None,
            date_joined: now,
            created_at: now,
            updated_at: now,
            last_location: String::new(),
            created_location: String::new(),
            is_superuser: false,
            is_managed: false,
            is_password_expired: false,
            is_active: true,
            is_staff: false,
            is_email_verified: false,
            is_password_autoset: false,
            token: String::new(),
            last_active: Some(now),
            last_login_time: None,
            last_logout_time: None,
            last_login_ip: String::new(),
            last_logout_ip: String::new(),
            last_login_medium: DEFAULT_LOGIN_MEDIUM.to_owned(),
            last_login_uagent: String::new(),
            token_updated_at: None,
            is_bot: false,
            user_timezone: DEFAULT_TIMEZONE.to_owned(),
        }
    }

    /// Normalize the record before it is written. Run on every insert and update.
    ///
    /// The token is regenerated whenever `token_updated_at` is already set, so once a
    /// token has been issued every later save rotates it again.
    pub fn prepare_save(&mut self, now: DateTime<Utc>) {
        if let Some(email) = self.email.as_mut() {
            *email = normalize_email(email);
        }

        if self.token_updated_at.is_some() {
            self.token = generate_token();
            self.token_updated_at = Some(now);
        }

        if self.display_name.is_empty() {
            self.display_name = derive_display_name(self.email.as_deref());
        }

        if self.is_superuser {
            self.is_staff = true;
        }

        self.updated_at = now;
    }

    /// Ask the next save to issue a new token.
    pub fn request_token_rotation(&mut self, now: DateTime<Utc>) {
        self.token_updated_at = Some(now);
    }

    pub fn record_login(&mut self, meta: &ClientMeta, now: DateTime<Utc>) {
        self.last_login = Some(now);
        self.last_login_time = Some(now);
        self.last_active = Some(now);
        self.last_login_ip = meta.ip.clone();
        self.last_login_uagent = meta.user_agent.clone();
        self.last_login_medium = DEFAULT_LOGIN_MEDIUM.to_owned();
    }

    pub fn record_logout(&mut self, meta: &ClientMeta, now: DateTime<Utc>) {
        self.last_logout_time = Some(now);
        self.last_logout_ip = meta.ip.clone();
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} <{}>",
            self.username,
            self.email.as_deref().unwrap_or_default()
        )
    }
}
