use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use propelty_api::domain::repository::{PasswordHasher, SessionStore, UserRepository};
use propelty_api::domain::types::{ClientMeta, User};
use propelty_api::error::ApiServiceError;
use propelty_domain::id::UserId;

pub const TEST_PASSWORD: &str = "violet-harbor-42";

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn get(&self, id: UserId) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, ApiServiceError> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), ApiServiceError> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.username == user.username || (u.email.is_some() && u.email == user.email))
        {
            return Err(ApiServiceError::UserAlreadyExists);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), ApiServiceError> {
        let mut users = self.users.lock().unwrap();
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(ApiServiceError::UserNotFound)?;
        *slot = user.clone();
        Ok(())
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<User>, ApiServiceError> {
        let mut users = self.users.lock().unwrap().clone();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }
}

// ── MockSessionStore ─────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockSessionStore {
    /// key => (user id, ttl seconds)
    pub sessions: Arc<Mutex<HashMap<String, (UserId, i64)>>>,
}

impl MockSessionStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_session(key: &str, user_id: UserId, ttl_secs: i64) -> Self {
        let store = Self::default();
        store
            .sessions
            .lock()
            .unwrap()
            .insert(key.to_owned(), (user_id, ttl_secs));
        store
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn ttl(&self, key: &str) -> Option<i64> {
        self.sessions.lock().unwrap().get(key).map(|(_, ttl)| *ttl)
    }
}

impl SessionStore for MockSessionStore {
    async fn create(
        &self,
        key: &str,
        user_id: UserId,
        ttl_secs: i64,
    ) -> Result<(), ApiServiceError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(key.to_owned(), (user_id, ttl_secs));
        Ok(())
    }

    async fn find(&self, key: &str) -> Result<Option<UserId>, ApiServiceError> {
        Ok(self.sessions.lock().unwrap().get(key).map(|(id, _)| *id))
    }

    async fn touch(&self, key: &str, ttl_secs: i64) -> Result<(), ApiServiceError> {
        if let Some(entry) = self.sessions.lock().unwrap().get_mut(key) {
            entry.1 = ttl_secs;
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), ApiServiceError> {
        self.sessions.lock().unwrap().remove(key);
        Ok(())
    }
}

// ── PlainHasher ──────────────────────────────────────────────────────────────

/// Reversible stand-in so tests do not pay for Argon2.
#[derive(Clone, Copy, Default)]
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, ApiServiceError> {
        Ok(format!("plain${password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        hash.strip_prefix("plain$") == Some(password)
    }
}

// ── CountingHasher ───────────────────────────────────────────────────────────

/// [`PlainHasher`] that counts how often it hashes.
#[derive(Clone, Default)]
pub struct CountingHasher {
    pub hashes: Arc<AtomicUsize>,
}

impl CountingHasher {
    pub fn hash_count(&self) -> usize {
        self.hashes.load(Ordering::SeqCst)
    }
}

impl PasswordHasher for CountingHasher {
    fn hash(&self, password: &str) -> Result<String, ApiServiceError> {
        self.hashes.fetch_add(1, Ordering::SeqCst);
        PlainHasher.hash(password)
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        PlainHasher.verify(password, hash)
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user() -> User {
    let now = Utc::now();
    let mut user = User::new(
        "jdoe".to_owned(),
        Some("jane.doe@example.com".to_owned()),
        PlainHasher.hash(TEST_PASSWORD).unwrap(),
        now,
    );
    user.prepare_save(now);
    user
}

pub fn test_staff() -> User {
    let now = Utc::now();
    let mut user = User::new(
        "admin".to_owned(),
        Some("admin@example.com".to_owned()),
        PlainHasher.hash(TEST_PASSWORD).unwrap(),
        now,
    );
    user.is_superuser = true;
    user.prepare_save(now);
    user
}

pub fn test_meta() -> ClientMeta {
    ClientMeta {
        ip: "203.0.113.7".to_owned(),
        user_agent: "Mozilla/5.0 (X11; Linux x86_64)".to_owned(),
    }
}
