//! Membership factory for creating test membership rows.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test memberships with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::server_membership::MembershipFactory;
///
/// let membership = MembershipFactory::new(&db, user.id, server.id)
///     .role("admin")
///     .build()
///     .await?;
/// ```
pub struct MembershipFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: Uuid,
    server_id: Uuid,
    role: String,
}

impl<'a> MembershipFactory<'a> {
    /// Creates a new MembershipFactory with role `"member"`.
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `user_id` - ID of an existing user
    /// - `server_id` - ID of an existing server
    pub fn new(db: &'a DatabaseConnection, user_id: Uuid, server_id: Uuid) -> Self {
        Self {
            db,
            user_id,
            server_id,
            role: "member".to_string(),
        }
    }

    /// Sets the membership role.
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Builds and inserts the membership entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::server_membership::Model)` - Created membership entity
    /// - `Err(DbErr)` - Database error during insert (including a duplicate pair)
    pub async fn build(self) -> Result<entity::server_membership::Model, DbErr> {
        let now = Utc::now();
        entity::server_membership::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(self.user_id),
            server_id: ActiveValue::Set(self.server_id),
            role: ActiveValue::Set(self.role),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a `member` membership for `user_id` on `server_id`.
pub async fn create_membership(
    db: &DatabaseConnection,
    user_id: Uuid,
    server_id: Uuid,
) -> Result<entity::server_membership::Model, DbErr> {
    MembershipFactory::new(db, user_id, server_id).build().await
}
