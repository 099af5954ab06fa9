//! Membership domain models and parameters.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    model::membership::{GrantMembershipDto, MemberRole, MembershipDto, MembershipListQuery},
    server::{
        error::AppError,
        model::{server::ServerDetail, user::User},
        util::parse::parse_role,
    },
};

/// A user's role on a server.
#[derive(Debug, Clone, PartialEq)]
pub struct Membership {
    pub id: Uuid,
    pub user_id: Uuid,
    pub server_id: Uuid,
    pub role: MemberRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Membership {
    /// Converts an entity model to a membership domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Membership)` - The converted membership
    /// - `Err(AppError::InternalErr(ParseEnum))` - Stored role is unknown
    pub fn from_entity(entity: entity::server_membership::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            server_id: entity.server_id,
            role: parse_role(&entity.role)?,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

/// Membership with its user and server expanded for responses.
#[derive(Debug, Clone, PartialEq)]
pub struct MembershipDetail {
    pub membership: Membership,
    pub user: User,
    pub server: ServerDetail,
}

impl MembershipDetail {
    pub fn into_dto(self) -> MembershipDto {
        MembershipDto {
            id: self.membership.id,
            user: self.user.into_dto(),
            server: self.server.into_dto(),
            role: self.membership.role,
            created_at: self.membership.created_at,
            updated_at: self.membership.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateMembershipParams {
    pub user_id: Uuid,
    pub server_id: Uuid,
    pub role: MemberRole,
}

/// Owner or admin adding an existing user directly.
#[derive(Debug, Clone)]
pub struct GrantMembershipParams {
    pub user_id: Uuid,
    pub role: MemberRole,
}

impl GrantMembershipParams {
    pub fn from_dto(dto: GrantMembershipDto) -> Self {
        Self {
            user_id: dto.user_id,
            role: dto.role,
        }
    }
}

/// Raw role-update body.
///
/// Every submitted key is kept so that fields other than `role` can be reported.
#[derive(Debug, Clone, Default)]
pub struct UpdateRoleParams {
    pub fields: Vec<String>,
    pub role: Option<serde_json::Value>,
}

impl UpdateRoleParams {
    pub fn from_body(body: serde_json::Map<String, serde_json::Value>) -> Self {
        let fields = body.keys().cloned().collect();
        let role = body.get("role").cloned();

        Self { fields, role }
    }
}

#[derive(Debug, Clone)]
pub struct ListMembershipsParams {
    pub server_id: Uuid,
    pub role: Option<MemberRole>,
    /// Case-insensitive substring of the member's display name.
    pub search: Option<String>,
}

impl ListMembershipsParams {
    pub fn from_query(server_id: Uuid, query: MembershipListQuery) -> Self {
        Self {
            server_id,
            role: query.role,
            search: query.search.filter(|s| !s.trim().is_empty()),
        }
    }
}
