use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(128)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string_len(128).not_null())
                    .col(ColumnDef::new(Users::LastLogin).timestamp_with_time_zone())
                    .col(ColumnDef::new(Users::MobileNumber).string_len(255))
                    .col(ColumnDef::new(Users::Email).string_len(255).unique_key())
                    .col(
                        ColumnDef::new(Users::DisplayName)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Users::FirstName)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Users::LastName)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Users::Avatar).text().not_null().default(""))
                    .col(ColumnDef::new(Users::CoverImage).string_len(800))
                    .col(
                        ColumnDef::new(Users::DateJoined)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::LastLocation)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedLocation)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(flag(Users::IsSuperuser, false))
                    .col(flag(Users::IsManaged, false))
                    .col(flag(Users::IsPasswordExpired, false))
                    .col(flag(Users::IsActive, true))
                    .col(flag(Users::IsStaff, false))
                    .col(flag(Users::IsEmailVerified, false))
                    .col(flag(Users::IsPasswordAutoset, false))
                    .col(
                        ColumnDef::new(Users::Token)
                            .string_len(64)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Users::LastActive).timestamp_with_time_zone())
                    .col(ColumnDef::new(Users::LastLoginTime).timestamp_with_time_zone())
                    .col(ColumnDef::new(Users::LastLogoutTime).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Users::LastLoginIp)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Users::LastLogoutIp)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Users::LastLoginMedium)
                            .string_len(20)
                            .not_null()
                            .default("email"),
                    )
                    .col(
                        ColumnDef::new(Users::LastLoginUagent)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Users::TokenUpdatedAt).timestamp_with_time_zone())
                    .col(flag(Users::IsBot, false))
                    .col(
                        ColumnDef::new(Users::UserTimezone)
                            .string_len(255)
                            .not_null()
                            .default("UTC"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Users::Table)
                    .col(Users::CreatedAt)
                    .name("idx_users_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

fn flag(column: Users, default: bool) -> ColumnDef {
    ColumnDef::new(column)
        .boolean()
        .not_null()
        .default(default)
        .to_owned()
}

#[derive(Iden, Clone, Copy)]
enum Users {
    Table,
    Id,
    Username,
    Password,
    LastLogin,
    MobileNumber,
    Email,
    DisplayName,
    FirstName,
    LastName,
    Avatar,
    CoverImage,
    DateJoined,
    CreatedAt,
    UpdatedAt,
    LastLocation,
    CreatedLocation,
    IsSuperuser,
    IsManaged,
    IsPasswordExpired,
    IsActive,
    IsStaff,
    IsEmailVerified,
    IsPasswordAutoset,
    Token,
    LastActive,
    LastLoginTime,
    LastLogoutTime,
    LastLoginIp,
    LastLogoutIp,
    LastLoginMedium,
    LastLoginUagent,
    TokenUpdatedAt,
    IsBot,
    UserTimezone,
}
