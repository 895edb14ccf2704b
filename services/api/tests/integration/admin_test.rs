use chrono::{Duration, Utc};

use propelty_api::error::ApiServiceError;
use propelty_api::usecase::user::ListUsersUseCase;
use propelty_domain::pagination::PageRequest;

use crate::helpers::{MockUserRepo, test_staff, test_user};

#[tokio::test]
async fn should_list_newest_accounts_first() {
    let mut staff = test_staff();
    staff.created_at = Utc::now() - Duration::days(30);
    let mut older = test_user();
    older.created_at = Utc::now() - Duration::days(2);
    let mut newer = test_user();
    newer.username = "newer".to_owned();
    newer.email = Some("newer@example.com".to_owned());
    newer.created_at = Utc::now() - Duration::days(1);

    let users = ListUsersUseCase {
        repo: MockUserRepo::new(vec![older.clone(), staff.clone(), newer.clone()]),
    }
    .execute(staff.id, PageRequest::default())
    .await
    .unwrap();

    let ids: Vec<_> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![newer.id, older.id, staff.id]);
}

#[tokio::test]
async fn should_page_through_accounts() {
    let staff = test_staff();
    let mut user = test_user();
    user.created_at = staff.created_at - Duration::hours(1);

    let usecase = ListUsersUseCase {
        repo: MockUserRepo::new(vec![user.clone(), staff.clone()]),
    };
    let second = usecase
        .execute(
            staff.id,
            PageRequest {
                per_page: 1,
                page: 2,
            },
        )
        .await
        .unwrap();

    assert_eq!(second.len(), 1);
    assert_eq!(second[0].id, user.id);
}

#[tokio::test]
async fn should_forbid_non_staff() {
    let user = test_user();
    let result = ListUsersUseCase {
        repo: MockUserRepo::new(vec![user.clone()]),
    }
    .execute(user.id, PageRequest::default())
    .await;
    assert!(matches!(result, Err(ApiServiceError::Forbidden)));
}
