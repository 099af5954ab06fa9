use sea_orm::DatabaseConnection;
use test_utils::{builder::TestBuilder, factory};
use uuid::Uuid;

use crate::{
    model::{membership::MemberRole, server::Visibility},
    server::{
        error::AppError,
        model::user::User,
        policy::DenialReason,
    },
};

mod user;

/// Creates a user row and returns it as the domain model the services accept.
async fn create_actor(db: &DatabaseConnection) -> Result<User, AppError> {
    Ok(User::from_entity(factory::create_user(db).await?))
}

/// Creates a public server with its owner and a member holding `role`.
///
/// Returns `(owner, member, server_id)`.
async fn server_with_member(
    db: &DatabaseConnection,
    role: &str,
) -> Result<(User, User, Uuid), AppError> {
    let (owner, server) = factory::helpers::create_server_with_owner(db).await?;
    let (member, _) = factory::helpers::create_member_with_role(db, server.id, role).await?;

    Ok((
        User::from_entity(owner),
        User::from_entity(member),
        server.id,
    ))
}

/// Unwraps a policy denial reason, panicking on any other outcome.
fn denial_reason<T: std::fmt::Debug>(result: Result<T, AppError>) -> DenialReason {
    match result {
        Err(AppError::Denied(denial)) => denial.reason,
        other => panic!("expected denial, got {:?}", other),
    }
}
