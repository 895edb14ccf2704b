pub mod auth;
pub mod session;
pub mod user;

use propelty_domain::user::is_valid_timezone;
use validator::{ValidateUrl, ValidationError};

use crate::domain::repository::PasswordHasher;
use crate::error::ApiServiceError;

fn known_timezone(tz: &str) -> Result<(), ValidationError> {
    if is_valid_timezone(tz) {
        return Ok(());
    }
    Err(ValidationError::new("unknown_timezone"))
}

/// Empty clears the field; anything else must be an absolute URL.
fn cover_image_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.validate_url() {
        return Ok(());
    }
    Err(ValidationError::new("url"))
}

/// Argon2 is CPU-bound; keep it off the async workers.
async fn hash_blocking<H: PasswordHasher>(
    hasher: &H,
    password: &str,
) -> Result<String, ApiServiceError> {
    let hasher = hasher.clone();
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| ApiServiceError::Internal(anyhow::anyhow!("hash task: {e}")))?
}

async fn verify_blocking<H: PasswordHasher>(
    hasher: &H,
    password: &str,
    hash: &str,
) -> Result<bool, ApiServiceError> {
    let hasher = hasher.clone();
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
        .await
        .map_err(|e| ApiServiceError::Internal(anyhow::anyhow!("verify task: {e}")))
}
