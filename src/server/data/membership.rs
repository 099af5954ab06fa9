//! Membership data repository for database operations.
//!
//! Provides the `MembershipRepository` for the user/server join table. Uniqueness of the
//! (user, server) pair is enforced by a unique index; callers detect violations through
//! the returned `DbErr`.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    sea_query::{Expr, Func},
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    model::membership::MemberRole,
    server::{
        error::AppError,
        model::{
            membership::{CreateMembershipParams, ListMembershipsParams, Membership},
            user::User,
        },
        util::query::contains_ignore_case,
    },
};

pub struct MembershipRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MembershipRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a membership.
    ///
    /// # Returns
    /// - `Ok(Membership)` - The created membership
    /// - `Err(AppError::DbErr)` - Database error, including a unique violation when the
    ///   user is already a member
    pub async fn create(&self, params: CreateMembershipParams) -> Result<Membership, AppError> {
        let now = Utc::now();

        let entity = entity::server_membership::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(params.user_id),
            server_id: ActiveValue::Set(params.server_id),
            role: ActiveValue::Set(params.role.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Membership::from_entity(entity)
    }

    /// Finds the membership of `user_id` on `server_id`.
    pub async fn find(
        &self,
        server_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Membership>, AppError> {
        entity::prelude::ServerMembership::find()
            .filter(entity::server_membership::Column::ServerId.eq(server_id))
            .filter(entity::server_membership::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
            .map(Membership::from_entity)
            .transpose()
    }

    /// Role held by `user_id` on `server_id`, if any.
    pub async fn find_role(
        &self,
        server_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<MemberRole>, AppError> {
        Ok(self.find(server_id, user_id).await?.map(|m| m.role))
    }

    /// Roles held by `user_id` on each of the given servers.
    pub async fn roles_for_user(
        &self,
        user_id: Uuid,
        server_ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, MemberRole>, AppError> {
        if server_ids.is_empty() {
            return Ok(HashMap::new());
        }

        entity::prelude::ServerMembership::find()
            .filter(entity::server_membership::Column::UserId.eq(user_id))
            .filter(entity::server_membership::Column::ServerId.is_in(server_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|m| Membership::from_entity(m).map(|m| (m.server_id, m.role)))
            .collect()
    }

    /// Lists a server's memberships with their users.
    ///
    /// # Returns
    /// - `Ok(Vec<(Membership, User)>)` - Matching memberships ordered by join time
    /// - `Err(AppError)` - Database error or unparseable stored role
    pub async fn list(
        &self,
        params: &ListMembershipsParams,
    ) -> Result<Vec<(Membership, User)>, AppError> {
        let mut query = entity::prelude::ServerMembership::find()
            .filter(entity::server_membership::Column::ServerId.eq(params.server_id));

        if let Some(role) = params.role {
            query = query.filter(entity::server_membership::Column::Role.eq(role.as_str()));
        }

        if let Some(search) = params.search.as_deref().filter(|s| !s.is_empty()) {
            query = query.filter(contains_ignore_case(
                (entity::user::Entity, entity::user::Column::DisplayName),
                search,
            ));
        }

        let rows = query
            .find_also_related(entity::prelude::User)
            .order_by_asc(entity::server_membership::Column::CreatedAt)
            .all(self.db)
            .await?;

        rows.into_iter()
            .map(|(membership, user)| {
                let user = user.ok_or_else(|| {
                    DbErr::RecordNotFound(format!(
                        "User {} for membership {} not found",
                        membership.user_id, membership.id
                    ))
                })?;

                Ok((Membership::from_entity(membership)?, User::from_entity(user)))
            })
            .collect()
    }

    /// Changes a membership's role and bumps `updated_at`.
    pub async fn update_role(&self, id: Uuid, role: MemberRole) -> Result<Membership, AppError> {
        let entity = entity::prelude::ServerMembership::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Membership with id {} not found", id)))?;

        let mut active = entity.into_active_model();
        active.role = ActiveValue::Set(role.as_str().to_string());
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Membership::from_entity(entity)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DbErr> {
        entity::prelude::ServerMembership::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Number of memberships on a server, the owner included.
    pub async fn count_by_server(&self, server_id: Uuid) -> Result<u64, DbErr> {
        entity::prelude::ServerMembership::find()
            .filter(entity::server_membership::Column::ServerId.eq(server_id))
            .count(self.db)
            .await
    }

    /// Membership counts for several servers. Servers without rows are absent.
    pub async fn count_by_servers(
        &self,
        server_ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, u64>, DbErr> {
        if server_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(Uuid, i64)> = entity::prelude::ServerMembership::find()
            .select_only()
            .column(entity::server_membership::Column::ServerId)
            .column_as(
                Expr::expr(Func::count(Expr::col(entity::server_membership::Column::Id))),
                "member_count",
            )
            .filter(entity::server_membership::Column::ServerId.is_in(server_ids))
            .group_by(entity::server_membership::Column::ServerId)
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(server_id, count)| (server_id, count.max(0) as u64))
            .collect())
    }
}
