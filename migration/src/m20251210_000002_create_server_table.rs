use sea_orm_migration::{prelude::*, schema::*};

use super::m20251210_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Server::Table)
                    .if_not_exists()
                    .col(pk_uuid(Server::Id))
                    .col(string_len(Server::Name, 100))
                    .col(text(Server::Description).default(""))
                    .col(string_len(Server::Visibility, 20).default("public"))
                    .col(string_null(Server::Icon))
                    .col(string_len_null(Server::InviteCode, 10))
                    .col(uuid(Server::OwnerId))
                    .col(timestamp_with_time_zone(Server::CreatedAt))
                    .col(timestamp_with_time_zone(Server::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_server_owner_id")
                            .from(Server::Table, Server::OwnerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_server_owner_id")
                    .table(Server::Table)
                    .col(Server::OwnerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Server::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Server {
    Table,
    Id,
    Name,
    Description,
    Visibility,
    Icon,
    InviteCode,
    OwnerId,
    CreatedAt,
    UpdatedAt,
}
