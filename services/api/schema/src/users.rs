use sea_orm::entity::prelude::*;

/// User account record. Default listing order is newest first.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub password: String,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub mobile_number: Option<String>,
    #[sea_orm(unique)]
    pub email: Option<String>,

    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(column_type = "Text")]
    pub avatar: String,
    pub cover_image: Option<String>,

    pub date_joined: chrono::DateTime<chrono::Utc>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub last_location: String,
    pub created_location: String,

    pub is_superuser: bool,
    pub is_managed: bool,
    pub is_password_expired: bool,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_email_verified: bool,
    pub is_password_autoset: bool,

    pub token: String,

    pub last_active: Option<chrono::DateTime<chrono::Utc>>,
    pub last_login_time: Option<chrono::DateTime<chrono::Utc>>,
    pub last_logout_time: Option<chrono::DateTime<chrono::Utc>>,
    pub last_login_ip: String,
    pub last_logout_ip: String,
    pub last_login_medium: String,
    #[sea_orm(column_type = "Text")]
    pub last_login_uagent: String,
    pub token_updated_at: Option<chrono::DateTime<chrono::Utc>>,

    pub is_bot: bool,
    pub user_timezone: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
