use deadpool_redis::Pool;
use deadpool_redis::redis::{AsyncCommands, RedisError};

use propelty_domain::id::UserId;

use crate::domain::repository::SessionStore;
use crate::error::ApiServiceError;

/// Key prefix for regular user sessions.
pub const SESSION_PREFIX: &str = "session";

/// Key prefix for admin sessions.
pub const ADMIN_SESSION_PREFIX: &str = "admin_session";

#[derive(Clone)]
pub struct RedisSessionStore {
    pub pool: Pool,
    pub prefix: &'static str,
}

fn session_key(prefix: &str, key: &str) -> String {
    format!("{prefix}:{key}")
}

fn internal(e: RedisError) -> ApiServiceError {
    ApiServiceError::Internal(e.into())
}

impl RedisSessionStore {
    async fn conn(&self) -> Result<deadpool_redis::Connection, ApiServiceError> {
        self.pool
            .get()
            .await
            .map_err(|e| ApiServiceError::Internal(e.into()))
    }
}

impl SessionStore for RedisSessionStore {
    async fn create(
        &self,
        key: &str,
        user_id: UserId,
        ttl_secs: i64,
    ) -> Result<(), ApiServiceError> {
        let mut conn = self.conn().await?;
        let (): () = conn
            .set_ex(
                session_key(self.prefix, key),
                user_id.to_string(),
                ttl_secs.max(1) as u64,
            )
            .await
            .map_err(internal)?;
        Ok(())
    }

    async fn find(&self, key: &str) -> Result<Option<UserId>, ApiServiceError> {
        let mut conn = self.conn().await?;
        let value: Option<String> = conn
            .get(session_key(self.prefix, key))
            .await
            .map_err(internal)?;
        // A value that does not parse is treated as no session.
        Ok(value.and_then(|v| v.parse().ok()))
    }

    async fn touch(&self, key: &str, ttl_secs: i64) -> Result<(), ApiServiceError> {
        let mut conn = self.conn().await?;
        let (): () = conn
            .expire(session_key(self.prefix, key), ttl_secs.max(1))
            .await
            .map_err(internal)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), ApiServiceError> {
        let mut conn = self.conn().await?;
        let (): () = conn
            .del(session_key(self.prefix, key))
            .await
            .map_err(internal)?;
        Ok(())
    }
}

/// `PING` the server; used by `/readyz`.
pub async fn ping(pool: &Pool) -> anyhow::Result<()> {
    let mut conn = pool.get().await?;
    let _: String = deadpool_redis::redis::cmd("PING")
        .query_async(&mut conn)
        .await?;
    Ok(())
}
