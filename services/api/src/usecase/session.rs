use propelty_domain::id::UserId;

use crate::domain::repository::SessionStore;
use crate::error::ApiServiceError;

/// A live session resolved from its cookie value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub key: String,
}

pub struct ResolveSessionUseCase<S: SessionStore> {
    pub sessions: S,
    pub ttl_secs: i64,
    /// Push the expiry forward on every authenticated request.
    pub sliding: bool,
}

impl<S: SessionStore> ResolveSessionUseCase<S> {
    pub async fn execute(&self, key: Option<String>) -> Result<Session, ApiServiceError> {
        let key = key
            .filter(|k| !k.is_empty())
            .ok_or(ApiServiceError::Unauthenticated)?;
        let user_id = self
            .sessions
            .find(&key)
            .await?
            .ok_or(ApiServiceError::Unauthenticated)?;
        if self.sliding {
            self.sessions.touch(&key, self.ttl_secs).await?;
        }
        Ok(Session { user_id, key })
    }
}
