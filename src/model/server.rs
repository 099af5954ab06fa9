use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::model::{membership::MemberRole, user::UserDto};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "public" => Some(Self::Public),
            "private" => Some(Self::Private),
            _ => None,
        }
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Public
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ServerDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub icon: Option<String>,
    pub member_count: u64,
    pub visibility: Visibility,
    /// Only present for the owner and admins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_code: Option<String>,
    pub owner: UserDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateServerDto {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub visibility: Visibility,
    pub icon: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateServerDto {
    pub name: Option<String>,
    pub description: Option<String>,
    pub visibility: Option<Visibility>,
    pub icon: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ServerListQuery {
    /// Restrict to servers where the caller holds this role
    pub member_type: Option<MemberRole>,
    pub visibility: Option<Visibility>,
    /// Case-insensitive substring of the server name
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServerListDto {
    pub message: String,
    pub servers: Vec<ServerDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServerResponseDto {
    pub message: String,
    pub server: ServerDto,
}
