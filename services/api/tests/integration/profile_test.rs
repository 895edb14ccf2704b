use propelty_api::error::ApiServiceError;
use propelty_api::usecase::user::{GetUserUseCase, UpdateProfileInput, UpdateProfileUseCase};
use propelty_domain::id::UserId;

use crate::helpers::{MockUserRepo, test_user};

#[tokio::test]
async fn should_get_existing_user() {
    let user = test_user();
    let found = GetUserUseCase {
        repo: MockUserRepo::new(vec![user.clone()]),
    }
    .execute(user.id)
    .await
    .unwrap();
    assert_eq!(found, user);
}

#[tokio::test]
async fn should_return_not_found_for_unknown_id() {
    let result = GetUserUseCase {
        repo: MockUserRepo::new(vec![test_user()]),
    }
    .execute(UserId::generate())
    .await;
    assert!(matches!(result, Err(ApiServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_update_profile_fields() {
    let user = test_user();
    let repo = MockUserRepo::new(vec![user.clone()]);

    let updated = UpdateProfileUseCase { repo: repo.clone() }
        .execute(
            user.id,
            UpdateProfileInput {
                display_name: Some("JD".to_owned()),
                last_name: Some("Doe".to_owned()),
                mobile_number: Some("+15550100".to_owned()),
                user_timezone: Some("Europe/Berlin".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.display_name, "JD");
    assert_eq!(updated.last_name, "Doe");
    assert_eq!(updated.mobile_number.as_deref(), Some("+15550100"));
    assert_eq!(updated.user_timezone, "Europe/Berlin");
    assert!(updated.last_active >= user.last_active);
    assert!(updated.updated_at >= user.updated_at);
    // No token has been issued yet, so saving leaves it alone.
    assert_eq!(updated.token, "");
    assert_eq!(repo.get(user.id), Some(updated));
}

#[tokio::test]
async fn should_rotate_token_on_save_once_issued() {
    let mut user = test_user();
    user.request_token_rotation(chrono::Utc::now());
    user.prepare_save(chrono::Utc::now());
    let before = user.token.clone();
    let repo = MockUserRepo::new(vec![user.clone()]);

    let updated = UpdateProfileUseCase { repo }
        .execute(
            user.id,
            UpdateProfileInput {
                first_name: Some("Janet".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_ne!(updated.token, before);
    assert!(updated.token_updated_at >= user.token_updated_at);
}

#[tokio::test]
async fn should_reject_empty_update() {
    let user = test_user();
    let result = UpdateProfileUseCase {
        repo: MockUserRepo::new(vec![user.clone()]),
    }
    .execute(user.id, UpdateProfileInput::default())
    .await;
    assert!(matches!(result, Err(ApiServiceError::MissingData)));
}
