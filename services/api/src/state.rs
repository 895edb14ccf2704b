use std::sync::Arc;

use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use propelty_domain::password::PasswordPolicy;

use crate::infra::cache::{ADMIN_SESSION_PREFIX, RedisSessionStore, SESSION_PREFIX};
use crate::infra::db::DbUserRepository;
use crate::infra::hasher::Argon2Hasher;
use crate::settings::Settings;
use crate::usecase::session::ResolveSessionUseCase;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub settings: Arc<Settings>,
    pub password_policy: Arc<PasswordPolicy>,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn session_store(&self) -> RedisSessionStore {
        RedisSessionStore {
            pool: self.redis.clone(),
            prefix: SESSION_PREFIX,
        }
    }

    pub fn admin_session_store(&self) -> RedisSessionStore {
        RedisSessionStore {
            pool: self.redis.clone(),
            prefix: ADMIN_SESSION_PREFIX,
        }
    }

    pub fn hasher(&self) -> Argon2Hasher {
        Argon2Hasher
    }

    pub fn resolve_session(&self) -> ResolveSessionUseCase<RedisSessionStore> {
        ResolveSessionUseCase {
            sessions: self.session_store(),
            ttl_secs: self.settings.session_cookie.max_age_secs,
            sliding: self.settings.session_save_every_request,
        }
    }

    pub fn resolve_admin_session(&self) -> ResolveSessionUseCase<RedisSessionStore> {
        ResolveSessionUseCase {
            sessions: self.admin_session_store(),
            ttl_secs: self.settings.admin_session_cookie.max_age_secs,
            sliding: self.settings.session_save_every_request,
        }
    }
}
