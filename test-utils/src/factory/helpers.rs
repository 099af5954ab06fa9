//! Shared helper utilities for factory methods.
//!
//! Provides the counter used to derive unique default values and convenience methods for
//! creating entities together with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::factory::{server, server_membership, user};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Returns a process-wide unique number for default field values.
pub fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Creates a user and a public server owned by that user.
///
/// The owner membership row is created alongside the server.
///
/// # Returns
/// - `Ok((owner, server))` - Created owner and server entities
/// - `Err(DbErr)` - Database error during insert
pub async fn create_server_with_owner(
    db: &DatabaseConnection,
) -> Result<(entity::user::Model, entity::server::Model), DbErr> {
    let owner = user::create_user(db).await?;
    let server = server::create_server(db, owner.id).await?;

    Ok((owner, server))
}

/// Creates a new user holding the given role on a server.
///
/// # Arguments
/// - `db` - Database connection
/// - `server_id` - Server the membership belongs to
/// - `role` - Membership role (`admin`, `moderator`, `member`)
///
/// # Returns
/// - `Ok((user, membership))` - Created user and membership entities
/// - `Err(DbErr)` - Database error during insert
pub async fn create_member_with_role(
    db: &DatabaseConnection,
    server_id: uuid::Uuid,
    role: &str,
) -> Result<(entity::user::Model, entity::server_membership::Model), DbErr> {
    let member = user::create_user(db).await?;
    let membership = server_membership::MembershipFactory::new(db, member.id, server_id)
        .role(role)
        .build()
        .await?;

    Ok((member, membership))
}
