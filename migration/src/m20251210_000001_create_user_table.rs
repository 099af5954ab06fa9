use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_uuid(User::Id))
                    .col(string_len_uniq(User::Email, 255))
                    .col(string(User::PasswordHash))
                    .col(string_len(User::DisplayName, 75).default("User"))
                    .col(string_len_null(User::Phone, 20))
                    .col(text_null(User::Bio))
                    .col(string_null(User::Avatar))
                    .col(boolean(User::IsEmailVerified).default(false))
                    .col(timestamp_with_time_zone(User::DateJoined))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    Email,
    PasswordHash,
    DisplayName,
    Phone,
    Bio,
    Avatar,
    IsEmailVerified,
    DateJoined,
}
