use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use propelty_domain::id::UserId;
use propelty_domain::password::{PasswordPolicy, UserAttributes};
use propelty_domain::token::generate_token;
use propelty_domain::user::normalize_email;

use super::{hash_blocking, known_timezone, verify_blocking};
use crate::domain::repository::{PasswordHasher, SessionStore, UserRepository};
use crate::domain::types::{ClientMeta, User};
use crate::error::ApiServiceError;

// ── SignUp ───────────────────────────────────────────────────────────────────

#[derive(Validate)]
pub struct SignUpInput {
    #[validate(email, length(max = 255))]
    pub email: String,
    pub password: String,
    #[validate(length(max = 128))]
    pub username: Option<String>,
    #[validate(length(max = 255))]
    pub first_name: Option<String>,
    #[validate(length(max = 255))]
    pub last_name: Option<String>,
    #[validate(length(max = 255))]
    pub display_name: Option<String>,
    #[validate(custom(function = "known_timezone"))]
    pub user_timezone: Option<String>,
}

pub struct SignUpUseCase<R: UserRepository, H: PasswordHasher> {
    pub repo: R,
    pub hasher: H,
    pub policy: Arc<PasswordPolicy>,
}

impl<R: UserRepository, H: PasswordHasher> SignUpUseCase<R, H> {
    pub async fn execute(&self, mut input: SignUpInput) -> Result<User, ApiServiceError> {
        input.email = normalize_email(&input.email);
        input.validate()?;

        let username = input
            .username
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());
        let first_name = input.first_name.unwrap_or_default();
        let last_name = input.last_name.unwrap_or_default();

        self.policy
            .validate(
                &input.password,
                &UserAttributes {
                    username: &username,
                    first_name: &first_name,
                    last_name: &last_name,
                    email: &input.email,
                },
            )
            .map_err(ApiServiceError::InvalidPassword)?;

        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(ApiServiceError::UserAlreadyExists);
        }

        let now = Utc::now();
        let password = hash_blocking(&self.hasher, &input.password).await?;
        let mut user = User::new(username, Some(input.email), password, now);
        user.first_name = first_name;
        user.last_name = last_name;
        user.display_name = input.display_name.unwrap_or_default();
        if let Some(tz) = input.user_timezone {
            user.user_timezone = tz;
        }
        user.prepare_save(now);

        self.repo.create(&user).await?;
        info!(user_id = %user.id, "user signed up");
        Ok(user)
    }
}

// ── SignIn ───────────────────────────────────────────────────────────────────

pub struct SignInInput {
    pub email: String,
    pub password: String,
    pub meta: ClientMeta,
    /// Session cookie the client already holds; dropped on success.
    pub previous_session: Option<String>,
}

pub struct SignInOutput {
    pub user: User,
    pub session_key: String,
}

pub struct SignInUseCase<R: UserRepository, H: PasswordHasher, S: SessionStore> {
    pub users: R,
    pub hasher: H,
    pub sessions: S,
    pub session_ttl_secs: i64,
    /// Admin sign-in: only staff accounts may open a session.
    pub require_staff: bool,
}

impl<R, H, S> SignInUseCase<R, H, S>
where
    R: UserRepository,
    H: PasswordHasher,
    S: SessionStore,
{
    pub async fn execute(&self, input: SignInInput) -> Result<SignInOutput, ApiServiceError> {
        let email = normalize_email(&input.email);
        let Some(mut user) = self.users.find_by_email(&email).await? else {
            // Same hashing cost as a real account.
            hash_blocking(&self.hasher, &input.password).await?;
            return Err(ApiServiceError::InvalidCredentials);
        };

        if !verify_blocking(&self.hasher, &input.password, &user.password).await? {
            return Err(ApiServiceError::InvalidCredentials);
        }
        if !user.is_active {
            return Err(ApiServiceError::AccountDeactivated);
        }
        if self.require_staff && !user.is_staff {
            return Err(ApiServiceError::Forbidden);
        }

        let now = Utc::now();
        user.record_login(&input.meta, now);
        user.request_token_rotation(now);
        user.prepare_save(now);
        self.users.update(&user).await?;

        if let Some(ref previous) = input.previous_session {
            self.sessions.delete(previous).await?;
        }
        let session_key = generate_token();
        self.sessions
            .create(&session_key, user.id, self.session_ttl_secs)
            .await?;

        info!(user_id = %user.id, admin = self.require_staff, "user signed in");
        Ok(SignInOutput { user, session_key })
    }
}

// ── SignOut ──────────────────────────────────────────────────────────────────

pub struct SignOutUseCase<R: UserRepository, S: SessionStore> {
    pub users: R,
    pub sessions: S,
}

impl<R: UserRepository, S: SessionStore> SignOutUseCase<R, S> {
    pub async fn execute(
        &self,
        user_id: UserId,
        session_key: &str,
        meta: &ClientMeta,
    ) -> Result<(), ApiServiceError> {
        // The session goes away even if the account has since been removed.
        if let Some(mut user) = self.users.find_by_id(user_id).await? {
            let now = Utc::now();
            user.record_logout(meta, now);
            user.prepare_save(now);
            self.users.update(&user).await?;
        }
        self.sessions.delete(session_key).await?;
        info!(user_id = %user_id, "user signed out");
        Ok(())
    }
}
