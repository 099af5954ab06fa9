use sea_orm_migration::{prelude::*, schema::*};

use super::m20251210_000001_create_user_table::User;
use super::m20251210_000002_create_server_table::Server;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServerMembership::Table)
                    .if_not_exists()
                    .col(pk_uuid(ServerMembership::Id))
                    .col(uuid(ServerMembership::UserId))
                    .col(uuid(ServerMembership::ServerId))
                    .col(string_len(ServerMembership::Role, 10).default("member"))
                    .col(timestamp_with_time_zone(ServerMembership::CreatedAt))
                    .col(timestamp_with_time_zone(ServerMembership::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_server_membership_user_id")
                            .from(ServerMembership::Table, ServerMembership::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_server_membership_server_id")
                            .from(ServerMembership::Table, ServerMembership::ServerId)
                            .to(Server::Table, Server::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_server_membership_user_server_unique")
                            .col(ServerMembership::UserId)
                            .col(ServerMembership::ServerId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServerMembership::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ServerMembership {
    Table,
    Id,
    UserId,
    ServerId,
    Role,
    CreatedAt,
    UpdatedAt,
}
