use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::User;
use crate::error::ApiServiceError;
use propelty_domain::pagination::PageRequest;

use crate::handlers::extract::{AdminSession, CurrentSession};
use crate::state::AppState;
use crate::usecase::user::{
    GetUserUseCase, ListUsersUseCase, UpdateProfileInput, UpdateProfileUseCase,
};

/// Public view of an account. Never carries the password hash or token.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
    pub cover_image: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_bot: bool,
    pub is_email_verified: bool,
    pub user_timezone: String,
    #[serde(serialize_with = "propelty_core::serde::to_rfc3339_ms")]
    pub date_joined: DateTime<Utc>,
    #[serde(serialize_with = "propelty_core::serde::to_rfc3339_ms_opt")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(serialize_with = "propelty_core::serde::to_rfc3339_ms_opt")]
    pub last_active: Option<DateTime<Utc>>,
    #[serde(serialize_with = "propelty_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "propelty_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
            mobile_number: user.mobile_number,
            display_name: user.display_name,
            first_name: user.first_name,
            last_name: user.last_name,
            avatar: user.avatar,
            cover_image: user.cover_image,
            is_active: user.is_active,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            is_bot: user.is_bot,
            is_email_verified: user.is_email_verified,
            user_timezone: user.user_timezone,
            date_joined: user.date_joined,
            last_login: user.last_login,
            last_active: user.last_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ── GET /api/users/me ────────────────────────────────────────────────────────

pub async fn get_me(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Json<UserResponse>, ApiServiceError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(session.user_id).await?;
    Ok(Json(user.into()))
}

// ── PATCH /api/users/me ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMeRequest {
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
    pub cover_image: Option<String>,
    pub mobile_number: Option<String>,
    pub user_timezone: Option<String>,
}

pub async fn update_me(
    State(state): State<AppState>,
    session: CurrentSession,
    Json(body): Json<UpdateMeRequest>,
) -> Result<Json<UserResponse>, ApiServiceError> {
    let usecase = UpdateProfileUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(
            session.user_id,
            UpdateProfileInput {
                display_name: body.display_name,
                first_name: body.first_name,
                last_name: body.last_name,
                avatar: body.avatar,
                cover_image: body.cover_image,
                mobile_number: body.mobile_number,
                user_timezone: body.user_timezone,
            },
        )
        .await?;
    Ok(Json(user.into()))
}

// ── GET /api/admin/users ─────────────────────────────────────────────────────

pub async fn list_users(
    State(state): State<AppState>,
    session: AdminSession,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<UserResponse>>, ApiServiceError> {
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users = usecase.execute(session.user_id, page).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
