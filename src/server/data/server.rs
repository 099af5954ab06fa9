//! Server data repository for database operations.
//!
//! Provides the `ServerRepository` for server records. Creation writes the owner
//! membership in the same transaction so a server never exists without its owner row.

use chrono::Utc;
use sea_orm::{
    sea_query::Query,
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    model::{membership::MemberRole, server::Visibility},
    server::{
        error::AppError,
        model::server::{CreateServerParams, ListServersParams, Server, UpdateServerParams},
        util::query::contains_ignore_case,
    },
};

pub struct ServerRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ServerRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a server and its owner membership in one transaction.
    ///
    /// # Returns
    /// - `Ok(Server)` - The created server
    /// - `Err(AppError::DbErr)` - Either insert failed; nothing was written
    pub async fn create_with_owner(&self, params: CreateServerParams) -> Result<Server, AppError> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let server = entity::server::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            visibility: ActiveValue::Set(params.visibility.as_str().to_string()),
            icon: ActiveValue::Set(params.icon),
            invite_code: ActiveValue::Set(params.invite_code),
            owner_id: ActiveValue::Set(params.owner_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(&txn)
        .await?;

        entity::server_membership::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(params.owner_id),
            server_id: ActiveValue::Set(server.id),
            role: ActiveValue::Set(MemberRole::Owner.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Server::from_entity(server)
    }

    /// Finds a server by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Server>, AppError> {
        entity::prelude::Server::find_by_id(id)
            .one(self.db)
            .await?
            .map(Server::from_entity)
            .transpose()
    }

    /// Lists servers visible to the actor, applying the optional filters.
    ///
    /// Public servers are visible to everyone; private servers only to their owner and
    /// members. `member_type = owner` keeps servers the actor owns; any other role keeps
    /// servers where the actor holds that role plus servers the actor owns. `search` is a
    /// case-insensitive substring match on the name.
    ///
    /// # Returns
    /// - `Ok(Vec<Server>)` - Matching servers ordered by creation time
    /// - `Err(AppError)` - Database error or unparseable stored visibility
    pub async fn list(&self, params: &ListServersParams) -> Result<Vec<Server>, AppError> {
        let owned_by_actor = entity::server::Column::OwnerId.eq(params.actor_id);

        let mut condition = Condition::all().add(
            Condition::any()
                .add(entity::server::Column::Visibility.eq(Visibility::Public.as_str()))
                .add(owned_by_actor.clone())
                .add(entity::server::Column::Id.in_subquery(member_server_ids(
                    params.actor_id,
                    None,
                ))),
        );

        match params.member_type {
            Some(MemberRole::Owner) => {
                condition = condition.add(owned_by_actor);
            }
            Some(role) => {
                condition = condition.add(
                    Condition::any().add(owned_by_actor).add(
                        entity::server::Column::Id
                            .in_subquery(member_server_ids(params.actor_id, Some(role))),
                    ),
                );
            }
            None => {}
        }

        if let Some(visibility) = params.visibility {
            condition =
                condition.add(entity::server::Column::Visibility.eq(visibility.as_str()));
        }

        if let Some(search) = params.search.as_deref().filter(|s| !s.is_empty()) {
            condition = condition.add(contains_ignore_case(
                (entity::server::Entity, entity::server::Column::Name),
                search,
            ));
        }

        entity::prelude::Server::find()
            .filter(condition)
            .order_by_asc(entity::server::Column::CreatedAt)
            .all(self.db)
            .await?
            .into_iter()
            .map(Server::from_entity)
            .collect()
    }

    /// Applies a partial update and bumps `updated_at`.
    ///
    /// # Returns
    /// - `Ok(Server)` - The updated server
    /// - `Err(AppError::DbErr(RecordNotFound))` - No server with that ID
    pub async fn update(&self, id: Uuid, params: UpdateServerParams) -> Result<Server, AppError> {
        let entity = entity::prelude::Server::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Server with id {} not found", id)))?;

        let mut active = entity.into_active_model();

        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(description);
        }
        if let Some(visibility) = params.visibility {
            active.visibility = ActiveValue::Set(visibility.as_str().to_string());
        }
        if let Some(icon) = params.icon {
            active.icon = ActiveValue::Set(if icon.is_empty() { None } else { Some(icon) });
        }
        if let Some(invite_code) = params.invite_code {
            active.invite_code = ActiveValue::Set(Some(invite_code));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Server::from_entity(entity)
    }

    /// Deletes a server together with all of its memberships.
    pub async fn delete(&self, id: Uuid) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::ServerMembership::delete_many()
            .filter(entity::server_membership::Column::ServerId.eq(id))
            .exec(&txn)
            .await?;

        entity::prelude::Server::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        Ok(())
    }
}

/// Sub-select of server IDs where `user_id` holds a membership, optionally with `role`.
fn member_server_ids(
    user_id: Uuid,
    role: Option<MemberRole>,
) -> sea_orm::sea_query::SelectStatement {
    let mut query = Query::select();
    query
        .column(entity::server_membership::Column::ServerId)
        .from(entity::server_membership::Entity)
        .and_where(entity::server_membership::Column::UserId.eq(user_id));

    if let Some(role) = role {
        query.and_where(entity::server_membership::Column::Role.eq(role.as_str()));
    }

    query.to_owned()
}
