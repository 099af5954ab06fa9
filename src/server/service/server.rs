//! Server lifecycle: create, list, view, update, delete and invite code rotation.

use sea_orm::{DatabaseConnection, DbErr};
use uuid::Uuid;

use crate::{
    model::{membership::MemberRole, server::Visibility},
    server::{
        data::{membership::MembershipRepository, server::ServerRepository, user::UserRepository},
        error::AppError,
        model::{
            server::{
                CreateServerParams, ListServersParams, Server, ServerDetail, UpdateServerParams,
            },
            user::User,
        },
        policy::server::{self as policy, ServerActor},
        util::{
            invite::generate_invite_code,
            validation::{check_max_length, FieldErrors},
        },
    },
};

pub const NAME_MAX_LENGTH: usize = 100;
pub const ICON_MAX_LENGTH: usize = 255;

/// Not-found message for the server detail view.
pub const SERVER_NOT_FOUND_VIEW: &str = "Not found";
/// Not-found message for every other server route.
pub const SERVER_NOT_FOUND: &str = "Server does not exist.";

pub struct ServerService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ServerService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a server owned by `params.owner_id`.
    ///
    /// The name is trimmed and must be 1 to 100 characters. A private server receives a
    /// generated invite code.
    ///
    /// # Returns
    /// - `Ok(ServerDetail)` - The created server with a member count of 1
    /// - `Err(AppError::Validation)` - Invalid name or icon
    /// - `Err(AppError::DbErr)` - Database error; nothing was written
    pub async fn create(&self, mut params: CreateServerParams) -> Result<ServerDetail, AppError> {
        params.name = params.name.trim().to_string();

        let mut errors = FieldErrors::new();
        validate_name(&mut errors, &params.name);
        if let Some(icon) = &params.icon {
            check_max_length(&mut errors, "icon", icon, ICON_MAX_LENGTH);
        }
        errors.into_result()?;

        if params.visibility == Visibility::Private && params.invite_code.is_none() {
            params.invite_code = Some(generate_invite_code());
        }

        let server = ServerRepository::new(self.db)
            .create_with_owner(params)
            .await?;

        tracing::info!("User {} created server {}", server.owner_id, server.id);

        let actor = ServerActor {
            is_owner: true,
            role: Some(MemberRole::Owner),
        };
        self.detail(server, &actor).await
    }

    /// Lists servers visible to the actor with the given filters.
    pub async fn list(&self, params: ListServersParams) -> Result<Vec<ServerDetail>, AppError> {
        let servers = ServerRepository::new(self.db).list(&params).await?;

        let server_ids: Vec<Uuid> = servers.iter().map(|s| s.id).collect();
        let mut owner_ids: Vec<Uuid> = servers.iter().map(|s| s.owner_id).collect();
        owner_ids.sort();
        owner_ids.dedup();

        let membership_repo = MembershipRepository::new(self.db);
        let counts = membership_repo.count_by_servers(server_ids.clone()).await?;
        let roles = membership_repo
            .roles_for_user(params.actor_id, server_ids)
            .await?;
        let owners = UserRepository::new(self.db).find_by_ids(owner_ids).await?;

        servers
            .into_iter()
            .map(|server| {
                let owner = owners
                    .get(&server.owner_id)
                    .cloned()
                    .ok_or_else(|| missing_owner(&server))?;
                let actor = ServerActor {
                    is_owner: server.owner_id == params.actor_id,
                    role: roles.get(&server.id).copied(),
                };

                Ok::<_, AppError>(ServerDetail {
                    member_count: counts.get(&server.id).copied().unwrap_or(0),
                    show_invite_code: policy::can_see_invite_code(&actor),
                    owner,
                    server,
                })
            })
            .collect()
    }

    /// Gets a server the actor is allowed to see.
    ///
    /// # Returns
    /// - `Ok(ServerDetail)` - The server
    /// - `Err(AppError::NotFound)` - No server with that ID
    /// - `Err(AppError::Denied)` - Private server and the actor is not a member
    pub async fn get(&self, server_id: Uuid, actor: &User) -> Result<ServerDetail, AppError> {
        let server = self.find(server_id, SERVER_NOT_FOUND_VIEW).await?;
        let server_actor = self.actor(&server, actor.id).await?;

        policy::authorize_view(&server_actor, server.visibility)?;

        self.detail(server, &server_actor).await
    }

    /// Updates a server as its owner or an admin.
    ///
    /// Switching a server to private without an existing invite code generates one.
    ///
    /// # Returns
    /// - `Ok(ServerDetail)` - The updated server
    /// - `Err(AppError::NotFound)` - No server with that ID
    /// - `Err(AppError::Denied)` - Actor is neither owner nor admin
    /// - `Err(AppError::Validation)` - Invalid name or icon
    pub async fn update(
        &self,
        server_id: Uuid,
        actor: &User,
        mut params: UpdateServerParams,
    ) -> Result<ServerDetail, AppError> {
        let server = self.find(server_id, SERVER_NOT_FOUND).await?;
        let server_actor = self.actor(&server, actor.id).await?;

        policy::authorize_update(&server_actor)?;

        let mut errors = FieldErrors::new();
        if let Some(name) = params.name.as_mut() {
            *name = name.trim().to_string();
            validate_name(&mut errors, name);
        }
        if let Some(icon) = &params.icon {
            check_max_length(&mut errors, "icon", icon, ICON_MAX_LENGTH);
        }
        errors.into_result()?;

        if params.visibility == Some(Visibility::Private)
            && server.invite_code.is_none()
            && params.invite_code.is_none()
        {
            params.invite_code = Some(generate_invite_code());
        }

        let server = ServerRepository::new(self.db)
            .update(server.id, params)
            .await?;

        self.detail(server, &server_actor).await
    }

    /// Deletes a server and all of its memberships. Owner only.
    pub async fn delete(&self, server_id: Uuid, actor: &User) -> Result<(), AppError> {
        let server = self.find(server_id, SERVER_NOT_FOUND).await?;
        let server_actor = self.actor(&server, actor.id).await?;

        policy::authorize_delete(&server_actor)?;

        ServerRepository::new(self.db).delete(server.id).await?;

        tracing::info!("User {} deleted server {}", actor.id, server.id);

        Ok(())
    }

    /// Replaces the invite code with a freshly generated one. Owner or admin only.
    pub async fn rotate_invite_code(
        &self,
        server_id: Uuid,
        actor: &User,
    ) -> Result<ServerDetail, AppError> {
        let server = self.find(server_id, SERVER_NOT_FOUND).await?;
        let server_actor = self.actor(&server, actor.id).await?;

        policy::authorize_rotate_invite(&server_actor)?;

        let server = ServerRepository::new(self.db)
            .update(
                server.id,
                UpdateServerParams {
                    invite_code: Some(generate_invite_code()),
                    ..Default::default()
                },
            )
            .await?;

        self.detail(server, &server_actor).await
    }

    /// Loads a server or fails with `AppError::NotFound(message)`.
    pub async fn find(&self, server_id: Uuid, message: &str) -> Result<Server, AppError> {
        ServerRepository::new(self.db)
            .find_by_id(server_id)
            .await?
            .ok_or_else(|| AppError::NotFound(message.to_string()))
    }

    /// What the user is to this server.
    pub async fn actor(&self, server: &Server, user_id: Uuid) -> Result<ServerActor, AppError> {
        let role = MembershipRepository::new(self.db)
            .find_role(server.id, user_id)
            .await?;

        Ok(ServerActor {
            is_owner: server.owner_id == user_id,
            role,
        })
    }

    /// Expands a server with its owner and member count as seen by `actor`.
    pub async fn detail(&self, server: Server, actor: &ServerActor) -> Result<ServerDetail, AppError> {
        let owner = UserRepository::new(self.db)
            .find_by_id(server.owner_id)
            .await?
            .ok_or_else(|| missing_owner(&server))?;
        let member_count = MembershipRepository::new(self.db)
            .count_by_server(server.id)
            .await?;

        Ok(ServerDetail {
            server,
            owner,
            member_count,
            show_invite_code: policy::can_see_invite_code(actor),
        })
    }
}

fn validate_name(errors: &mut FieldErrors, name: &str) {
    if name.is_empty() {
        errors.add("name", "This field may not be blank.");
    } else {
        check_max_length(errors, "name", name, NAME_MAX_LENGTH);
    }
}

fn missing_owner(server: &Server) -> AppError {
    DbErr::RecordNotFound(format!(
        "Owner {} of server {} not found",
        server.owner_id, server.id
    ))
    .into()
}
