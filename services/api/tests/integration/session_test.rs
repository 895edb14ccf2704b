use propelty_api::error::ApiServiceError;
use propelty_api::usecase::session::ResolveSessionUseCase;

use crate::helpers::{MockSessionStore, test_user};

fn resolve(sessions: MockSessionStore, sliding: bool) -> ResolveSessionUseCase<MockSessionStore> {
    ResolveSessionUseCase {
        sessions,
        ttl_secs: 604800,
        sliding,
    }
}

#[tokio::test]
async fn should_resolve_live_session() {
    let user = test_user();
    let sessions = MockSessionStore::with_session("abc", user.id, 30);

    let session = resolve(sessions.clone(), false)
        .execute(Some("abc".to_owned()))
        .await
        .unwrap();

    assert_eq!(session.user_id, user.id);
    assert_eq!(session.key, "abc");
    assert_eq!(sessions.ttl("abc"), Some(30));
}

#[tokio::test]
async fn should_slide_expiry_when_enabled() {
    let user = test_user();
    let sessions = MockSessionStore::with_session("abc", user.id, 30);

    resolve(sessions.clone(), true)
        .execute(Some("abc".to_owned()))
        .await
        .unwrap();

    assert_eq!(sessions.ttl("abc"), Some(604800));
}

#[tokio::test]
async fn should_reject_missing_or_empty_cookie() {
    let usecase = resolve(MockSessionStore::empty(), true);
    assert!(matches!(
        usecase.execute(None).await,
        Err(ApiServiceError::Unauthenticated)
    ));
    assert!(matches!(
        usecase.execute(Some(String::new())).await,
        Err(ApiServiceError::Unauthenticated)
    ));
}

#[tokio::test]
async fn should_reject_expired_session() {
    let sessions = MockSessionStore::with_session("abc", test_user().id, 30);
    let result = resolve(sessions, true)
        .execute(Some("stale".to_owned()))
        .await;
    assert!(matches!(result, Err(ApiServiceError::Unauthenticated)));
}
