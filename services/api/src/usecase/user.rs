use chrono::Utc;
use validator::Validate;

use propelty_domain::id::UserId;
use propelty_domain::pagination::PageRequest;

use super::{cover_image_url, known_timezone};
use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::ApiServiceError;

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, user_id: UserId) -> Result<User, ApiServiceError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(ApiServiceError::UserNotFound)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

#[derive(Default, Validate)]
pub struct UpdateProfileInput {
    #[validate(length(max = 255))]
    pub display_name: Option<String>,
    #[validate(length(max = 255))]
    pub first_name: Option<String>,
    #[validate(length(max = 255))]
    pub last_name: Option<String>,
    pub avatar: Option<String>,
    /// Empty string clears the cover image.
    #[validate(length(max = 800), custom(function = "cover_image_url"))]
    pub cover_image: Option<String>,
    /// Empty string clears the mobile number.
    #[validate(length(max = 255))]
    pub mobile_number: Option<String>,
    #[validate(custom(function = "known_timezone"))]
    pub user_timezone: Option<String>,
}

impl UpdateProfileInput {
    fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.avatar.is_none()
            && self.cover_image.is_none()
            && self.mobile_number.is_none()
            && self.user_timezone.is_none()
    }
}

pub struct UpdateProfileUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateProfileUseCase<R> {
    pub async fn execute(
        &self,
        user_id: UserId,
        input: UpdateProfileInput,
    ) -> Result<User, ApiServiceError> {
        if input.is_empty() {
            return Err(ApiServiceError::MissingData);
        }
        input.validate()?;

        let mut user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(ApiServiceError::UserNotFound)?;

        if let Some(v) = input.display_name {
            user.display_name = v;
        }
        if let Some(v) = input.first_name {
            user.first_name = v;
        }
        if let Some(v) = input.last_name {
            user.last_name = v;
        }
        if let Some(v) = input.avatar {
            user.avatar = v;
        }
        if let Some(v) = input.cover_image {
            user.cover_image = Some(v).filter(|s| !s.is_empty());
        }
        if let Some(v) = input.mobile_number {
            user.mobile_number = Some(v).filter(|s| !s.is_empty());
        }
        if let Some(v) = input.user_timezone {
            user.user_timezone = v;
        }

        let now = Utc::now();
        user.last_active = Some(now);
        user.prepare_save(now);
        self.repo.update(&user).await?;
        Ok(user)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    /// Staff only. Newest accounts first.
    pub async fn execute(
        &self,
        requester: UserId,
        page: PageRequest,
    ) -> Result<Vec<User>, ApiServiceError> {
        let requester = self
            .repo
            .find_by_id(requester)
            .await?
            .ok_or(ApiServiceError::Unauthenticated)?;
        if !requester.is_active || !requester.is_staff {
            return Err(ApiServiceError::Forbidden);
        }
        let page = page.clamped();
        self.repo.list(page.offset(), page.limit()).await
    }
}
