use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::model::{server::ServerDto, user::UserDto};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Owner,
    Admin,
    Moderator,
    Member,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Moderator => "moderator",
            Self::Member => "member",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "owner" => Some(Self::Owner),
            "admin" => Some(Self::Admin),
            "moderator" => Some(Self::Moderator),
            "member" => Some(Self::Member),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MembershipDto {
    pub id: Uuid,
    pub user: UserDto,
    pub server: ServerDto,
    pub role: MemberRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Join body. A submitted `role` is accepted and ignored; joins always create `member`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct JoinServerDto {
    pub invite_code: Option<String>,
    #[allow(dead_code)]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GrantMembershipDto {
    pub user_id: Uuid,
    pub role: MemberRole,
}

/// Documents the role update body. The handler reads the raw JSON object so that
/// unexpected fields can be reported by name.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMembershipRoleDto {
    pub role: MemberRole,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct MembershipListQuery {
    pub role: Option<MemberRole>,
    /// Case-insensitive substring of the member's display name
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MembershipListDto {
    pub message: String,
    pub memberships: Vec<MembershipDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MembershipResponseDto {
    pub message: String,
    pub membership: MembershipDto,
}
