#![allow(async_fn_in_trait)]

use propelty_domain::id::UserId;

use crate::domain::types::User;
use crate::error::ApiServiceError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, ApiServiceError>;

    /// Look up by an already-normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiServiceError>;

    /// Insert a new account. Returns `UserAlreadyExists` on a unique violation.
    async fn create(&self, user: &User) -> Result<(), ApiServiceError>;

    /// Overwrite every column of an existing account.
    async fn update(&self, user: &User) -> Result<(), ApiServiceError>;

    /// Accounts newest first.
    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<User>, ApiServiceError>;
}

/// Server-side sessions keyed by the opaque cookie value.
pub trait SessionStore: Send + Sync {
    async fn create(&self, key: &str, user_id: UserId, ttl_secs: i64)
    -> Result<(), ApiServiceError>;

    async fn find(&self, key: &str) -> Result<Option<UserId>, ApiServiceError>;

    /// Reset the TTL of an existing session.
    async fn touch(&self, key: &str, ttl_secs: i64) -> Result<(), ApiServiceError>;

    async fn delete(&self, key: &str) -> Result<(), ApiServiceError>;
}

/// One-way password hashing. Cloned into blocking tasks.
pub trait PasswordHasher: Clone + Send + Sync + 'static {
    fn hash(&self, password: &str) -> Result<String, ApiServiceError>;

    /// `false` for a mismatch or an unusable stored hash.
    fn verify(&self, password: &str, hash: &str) -> bool;
}
