use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, SqlErr,
};

use propelty_api_schema::users;
use propelty_domain::id::UserId;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::ApiServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, ApiServiceError> {
        let model = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), ApiServiceError> {
        match active_model_from_user(user).insert(&self.db).await {
            Ok(_) => Ok(()),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(ApiServiceError::UserAlreadyExists)
            }
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn update(&self, user: &User) -> Result<(), ApiServiceError> {
        match active_model_from_user(user).update(&self.db).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(ApiServiceError::UserNotFound),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(ApiServiceError::UserAlreadyExists)
            }
            Err(e) => Err(anyhow::Error::new(e).context("update user").into()),
        }
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<User>, ApiServiceError> {
        let models = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }
}

fn active_model_from_user(user: &User) -> users::ActiveModel {
    users::ActiveModel {
        id: Set(user.id.0),
        username: Set(user.username.clone()),
        password: Set(user.password.clone()),
        last_login: Set(user.last_login),
        mobile_number: Set(user.mobile_number.clone()),
        email: Set(user.email.clone()),
        display_name: Set(user.display_name.clone()),
        first_name: Set(user.first_name.clone()),
        last_name: Set(user.last_name.clone()),
        avatar: Set(user.avatar.clone()),
        cover_image: Set(user.cover_image.clone()),
        date_joined: Set(user.date_joined),
        created_at: Set(user.created_at),
        updated_at: Set(user.updated_at),
        last_location: Set(user.last_location.clone()),
        created_location: Set(user.created_location.clone()),
        is_superuser: Set(user.is_superuser),
        is_managed: Set(user.is_managed),
        is_password_expired: Set(user.is_password_expired),
        is_active: Set(user.is_active),
        is_staff: Set(user.is_staff),
        is_email_verified: Set(user.is_email_verified),
        is_password_autoset: Set(user.is_password_autoset),
        token: Set(user.token.clone()),
        last_active: Set(user.last_active),
        last_login_time: Set(user.last_login_time),
        last_logout_time: Set(user.last_logout_time),
        last_login_ip: Set(user.last_login_ip.clone()),
        last_logout_ip: Set(user.last_logout_ip.clone()),
        last_login_medium: Set(user.last_login_medium.clone()),
        last_login_uagent: Set(user.last_login_uagent.clone()),
        token_updated_at: Set(user.token_updated_at),
        is_bot: Set(user.is_bot),
        user_timezone: Set(user.user_timezone.clone()),
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: UserId(model.id),
        username: model.username,
        password: model.password,
        last_login: model.last_login,
        mobile_number: model.mobile_number,
        email: model.email,
        display_name: model.display_name,
        first_name: model.first_name,
        last_name: model.last_name,
        avatar: model.avatar,
        cover_image: model.cover_image,
        date_joined: model.date_joined,
        created_at: model.created_at,
        updated_at: model.updated_at,
        last_location: model.last_location,
        created_location: model.created_location,
        is_superuser: model.is_superuser,
        is_managed: model.is_managed,
        is_password_expired: model.is_password_expired,
        is_active: model.is_active,
        is_staff: model.is_staff,
        is_email_verified: model.is_email_verified,
        is_password_autoset: model.is_password_autoset,
        token: model.token,
        last_active: model.last_active,
        last_login_time: model.last_login_time,
        last_logout_time: model.last_logout_time,
        last_login_ip: model.last_login_ip,
        last_logout_ip: model.last_logout_ip,
        last_login_medium: model.last_login_medium,
        last_login_uagent: model.last_login_uagent,
        token_updated_at: model.token_updated_at,
        is_bot: model.is_bot,
        user_timezone: model.user_timezone,
    }
}
