//! Server factory for creating test server entities.
//!
//! Unlike the application's transactional create path, the factory inserts the server and
//! its owner membership as two plain inserts. Use `without_owner_membership()` to arrange a
//! server that violates the owner invariant.

use crate::factory::{helpers::next_id, server_membership::MembershipFactory};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test servers with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::server::ServerFactory;
///
/// let server = ServerFactory::new(&db, owner.id)
///     .name("Gaming Hub")
///     .visibility("private")
///     .invite_code("ABCDE12345")
///     .build()
///     .await?;
/// ```
pub struct ServerFactory<'a> {
    db: &'a DatabaseConnection,
    owner_id: Uuid,
    name: String,
    description: String,
    visibility: String,
    invite_code: Option<String>,
    with_owner_membership: bool,
}

impl<'a> ServerFactory<'a> {
    /// Creates a new ServerFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Server {n}"`
    /// - description: empty
    /// - visibility: `"public"`
    /// - invite_code: `None`
    /// - owner membership: created
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `owner_id` - ID of an existing user who owns the server
    pub fn new(db: &'a DatabaseConnection, owner_id: Uuid) -> Self {
        let id = next_id();
        Self {
            db,
            owner_id,
            name: format!("Server {}", id),
            description: String::new(),
            visibility: "public".to_string(),
            invite_code: None,
            with_owner_membership: true,
        }
    }

    /// Sets the server name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets visibility (`"public"` or `"private"`).
    pub fn visibility(mut self, visibility: impl Into<String>) -> Self {
        self.visibility = visibility.into();
        self
    }

    /// Sets the invite code.
    pub fn invite_code(mut self, invite_code: impl Into<String>) -> Self {
        self.invite_code = Some(invite_code.into());
        self
    }

    /// Skips creating the owner membership row.
    pub fn without_owner_membership(mut self) -> Self {
        self.with_owner_membership = false;
        self
    }

    /// Builds and inserts the server (and owner membership unless disabled).
    ///
    /// # Returns
    /// - `Ok(entity::server::Model)` - Created server entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::server::Model, DbErr> {
        let now = Utc::now();
        let server = entity::server::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(self.description),
            visibility: ActiveValue::Set(self.visibility),
            icon: ActiveValue::Set(None),
            invite_code: ActiveValue::Set(self.invite_code),
            owner_id: ActiveValue::Set(self.owner_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        if self.with_owner_membership {
            MembershipFactory::new(self.db, self.owner_id, server.id)
                .role("owner")
                .build()
                .await?;
        }

        Ok(server)
    }
}

/// Creates a public server with default values owned by `owner_id`.
///
/// Shorthand for `ServerFactory::new(db, owner_id).build().await`.
pub async fn create_server(
    db: &DatabaseConnection,
    owner_id: Uuid,
) -> Result<entity::server::Model, DbErr> {
    ServerFactory::new(db, owner_id).build().await
}
