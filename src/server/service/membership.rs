//! Membership operations: list, join, grant, view, role change and removal.
//!
//! Every operation loads its target first (404), then asks `policy` for a decision
//! (403 or 400), and only then writes.

use sea_orm::{DatabaseConnection, SqlErr};
use uuid::Uuid;

use crate::{
    model::membership::MemberRole,
    server::{
        data::{membership::MembershipRepository, user::UserRepository},
        error::AppError,
        model::{
            membership::{
                CreateMembershipParams, GrantMembershipParams, ListMembershipsParams, Membership,
                MembershipDetail, UpdateRoleParams,
            },
            server::Server,
            user::User,
        },
        policy::{
            membership::{self as membership_policy, ActorContext, Grant},
            server as server_policy,
            Denial, DenialReason,
        },
        service::server::{ServerService, SERVER_NOT_FOUND},
        util::validation::FieldErrors,
    },
};

pub const MEMBERSHIP_NOT_FOUND: &str = "Membership does not exist.";

pub struct MembershipService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MembershipService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists a server's memberships. Owner and members only.
    ///
    /// # Returns
    /// - `Ok(Vec<MembershipDetail>)` - Memberships matching the filters
    /// - `Err(AppError::NotFound)` - No server with that ID
    /// - `Err(AppError::Denied(not_member))` - Actor is not a member
    pub async fn list(
        &self,
        actor: &User,
        params: ListMembershipsParams,
    ) -> Result<Vec<MembershipDetail>, AppError> {
        let servers = ServerService::new(self.db);
        let server = servers.find(params.server_id, SERVER_NOT_FOUND).await?;
        let server_actor = servers.actor(&server, actor.id).await?;

        server_policy::authorize_list_members(&server_actor)?;

        let rows = MembershipRepository::new(self.db).list(&params).await?;
        let server_detail = servers.detail(server, &server_actor).await?;

        Ok(rows
            .into_iter()
            .map(|(membership, user)| MembershipDetail {
                membership,
                user,
                server: server_detail.clone(),
            })
            .collect())
    }

    /// Joins a server as `member`.
    ///
    /// Private servers require the exact invite code. A duplicate membership created by
    /// a concurrent request is reported as already a member.
    ///
    /// # Returns
    /// - `Ok(MembershipDetail)` - The new membership
    /// - `Err(AppError::NotFound)` - No server with that ID
    /// - `Err(AppError::Denied)` - already_owner, already_member or invalid_invite_code
    pub async fn join(
        &self,
        server_id: Uuid,
        actor: &User,
        invite_code: Option<&str>,
    ) -> Result<MembershipDetail, AppError> {
        let servers = ServerService::new(self.db);
        let server = servers.find(server_id, SERVER_NOT_FOUND).await?;
        let server_actor = servers.actor(&server, actor.id).await?;

        server_policy::authorize_join(
            &server_actor,
            server.visibility,
            server.invite_code.as_deref(),
            invite_code,
        )?;

        let membership = self
            .insert(
                CreateMembershipParams {
                    user_id: actor.id,
                    server_id: server.id,
                    role: MemberRole::Member,
                },
                server_policy::already_member(),
            )
            .await?;

        tracing::info!("User {} joined server {}", actor.id, server.id);

        self.detail(membership, actor.clone(), server, actor).await
    }

    /// Adds an existing user to a server with a non-owner role. Owner or admin only.
    ///
    /// # Returns
    /// - `Ok(MembershipDetail)` - The new membership
    /// - `Err(AppError::NotFound)` - Unknown server or user
    /// - `Err(AppError::Denied)` - Actor is neither owner nor admin, the role is `owner`,
    ///   or the user already belongs to the server
    pub async fn grant(
        &self,
        server_id: Uuid,
        actor: &User,
        params: GrantMembershipParams,
    ) -> Result<MembershipDetail, AppError> {
        let servers = ServerService::new(self.db);
        let server = servers.find(server_id, SERVER_NOT_FOUND).await?;
        let target = UserRepository::new(self.db)
            .find_by_id(params.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User does not exist.".to_string()))?;
        let server_actor = servers.actor(&server, actor.id).await?;

        server_policy::authorize_grant(&server_actor)?;
        membership_policy::check_assignable_role(params.role)?;

        let already_member = Denial::new(
            DenialReason::AlreadyMember,
            "This user is already a member of this server.",
        );
        if target.id == server.owner_id {
            return Err(Denial::new(
                DenialReason::AlreadyOwner,
                "This user is the owner of this server and already a member.",
            )
            .into());
        }
        if MembershipRepository::new(self.db)
            .find(server.id, target.id)
            .await?
            .is_some()
        {
            return Err(already_member.into());
        }

        let membership = self
            .insert(
                CreateMembershipParams {
                    user_id: target.id,
                    server_id: server.id,
                    role: params.role,
                },
                already_member,
            )
            .await?;

        tracing::info!(
            "User {} added user {} to server {} as {}",
            actor.id,
            target.id,
            server.id,
            params.role.as_str()
        );

        self.detail(membership, target, server, actor).await
    }

    /// Gets `user_id`'s membership on a server.
    ///
    /// # Returns
    /// - `Ok(MembershipDetail)` - The membership
    /// - `Err(AppError::NotFound)` - No such membership
    /// - `Err(AppError::Denied(no_permission))` - Actor is not the member, owner or an admin
    pub async fn get(
        &self,
        server_id: Uuid,
        user_id: Uuid,
        actor: &User,
    ) -> Result<MembershipDetail, AppError> {
        let (membership, server) = self.find(server_id, user_id).await?;
        let context = self.context(&membership, &server, actor).await?;

        membership_policy::authorize_view(&context, membership.role)?;

        let user = self.member_user(&membership).await?;
        self.detail(membership, user, server, actor).await
    }

    /// Changes another member's role. Owner or admin only.
    ///
    /// # Returns
    /// - `Ok(MembershipDetail)` - The updated membership, unchanged when no role was sent
    /// - `Err(AppError::NotFound)` - No such membership
    /// - `Err(AppError::Denied)` - Any membership rule refused the change
    /// - `Err(AppError::Validation)` - Null or unknown role value
    pub async fn update_role(
        &self,
        server_id: Uuid,
        user_id: Uuid,
        actor: &User,
        params: UpdateRoleParams,
    ) -> Result<MembershipDetail, AppError> {
        let (membership, server) = self.find(server_id, user_id).await?;
        let context = self.context(&membership, &server, actor).await?;

        let fields: Vec<&str> = params.fields.iter().map(String::as_str).collect();
        membership_policy::authorize_role_update(&context, membership.role, &fields)?;

        // Partial update: without a role key there is nothing to change.
        let Some(requested) = params.role else {
            let user = self.member_user(&membership).await?;
            return self.detail(membership, user, server, actor).await;
        };

        let role = parse_requested_role(requested)?;
        membership_policy::check_assignable_role(role)?;

        let updated = MembershipRepository::new(self.db)
            .update_role(membership.id, role)
            .await?;

        tracing::info!(
            "User {} changed role of user {} on server {} to {}",
            actor.id,
            user_id,
            server.id,
            role.as_str()
        );

        let user = self.member_user(&updated).await?;
        self.detail(updated, user, server, actor).await
    }

    /// Leaves a server or removes another member.
    ///
    /// # Returns
    /// - `Ok(String)` - Confirmation message naming who left or was removed
    /// - `Err(AppError::NotFound)` - No such membership
    /// - `Err(AppError::Denied)` - Not permitted, or the target is the owner
    pub async fn remove(
        &self,
        server_id: Uuid,
        user_id: Uuid,
        actor: &User,
    ) -> Result<String, AppError> {
        let (membership, server) = self.find(server_id, user_id).await?;
        let context = self.context(&membership, &server, actor).await?;

        let grant = membership_policy::authorize_remove(&context, membership.role)?;

        let message = if grant == Grant::Own {
            format!("You have left {}.", server.name)
        } else {
            let user = self.member_user(&membership).await?;
            format!("{} has been removed from {}.", user.display_name, server.name)
        };

        MembershipRepository::new(self.db)
            .delete(membership.id)
            .await?;

        tracing::info!(
            "User {} removed membership of user {} on server {} ({})",
            actor.id,
            user_id,
            server.id,
            grant.code()
        );

        Ok(message)
    }

    async fn find(&self, server_id: Uuid, user_id: Uuid) -> Result<(Membership, Server), AppError> {
        let membership = MembershipRepository::new(self.db)
            .find(server_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(MEMBERSHIP_NOT_FOUND.to_string()))?;
        let server = ServerService::new(self.db)
            .find(server_id, MEMBERSHIP_NOT_FOUND)
            .await?;

        Ok((membership, server))
    }

    async fn context(
        &self,
        membership: &Membership,
        server: &Server,
        actor: &User,
    ) -> Result<ActorContext, AppError> {
        let is_target = membership.user_id == actor.id;
        let role = if is_target {
            Some(membership.role)
        } else {
            MembershipRepository::new(self.db)
                .find_role(server.id, actor.id)
                .await?
        };

        Ok(ActorContext {
            is_target,
            is_owner: server.owner_id == actor.id,
            role,
        })
    }

    async fn member_user(&self, membership: &Membership) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(membership.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(MEMBERSHIP_NOT_FOUND.to_string()))
    }

    /// Inserts a membership, reporting a unique violation as `on_duplicate`.
    async fn insert(
        &self,
        params: CreateMembershipParams,
        on_duplicate: Denial,
    ) -> Result<Membership, AppError> {
        match MembershipRepository::new(self.db).create(params).await {
            Err(AppError::DbErr(err))
                if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
            {
                Err(on_duplicate.into())
            }
            result => result,
        }
    }

    /// Builds a response for a membership of `user`, shown to `viewer`.
    async fn detail(
        &self,
        membership: Membership,
        user: User,
        server: Server,
        viewer: &User,
    ) -> Result<MembershipDetail, AppError> {
        let servers = ServerService::new(self.db);
        let viewer_actor = servers.actor(&server, viewer.id).await?;
        let server = servers.detail(server, &viewer_actor).await?;

        Ok(MembershipDetail {
            membership,
            user,
            server,
        })
    }
}

fn parse_requested_role(value: serde_json::Value) -> Result<MemberRole, AppError> {
    let mut errors = FieldErrors::new();

    match value {
        serde_json::Value::Null => errors.add("role", "This field may not be null."),
        serde_json::Value::String(role) => match MemberRole::parse(&role) {
            Some(role) => return Ok(role),
            None => errors.add("role", format!("\"{}\" is not a valid choice.", role)),
        },
        other => errors.add("role", format!("\"{}\" is not a valid choice.", other)),
    }

    Err(errors.into())
}
