//! Server domain models and parameters.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    model::{
        membership::MemberRole,
        server::{CreateServerDto, ServerDto, ServerListQuery, UpdateServerDto, Visibility},
    },
    server::{error::AppError, model::user::User, util::parse::parse_visibility},
};

/// Community owned by a user.
#[derive(Debug, Clone, PartialEq)]
pub struct Server {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub visibility: Visibility,
    pub icon: Option<String>,
    pub invite_code: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Server {
    /// Converts an entity model to a server domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Server)` - The converted server
    /// - `Err(AppError::InternalErr(ParseEnum))` - Stored visibility is unknown
    pub fn from_entity(entity: entity::server::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            visibility: parse_visibility(&entity.visibility)?,
            icon: entity.icon,
            invite_code: entity.invite_code,
            owner_id: entity.owner_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

/// Server together with what its API representation needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerDetail {
    pub server: Server,
    pub owner: User,
    pub member_count: u64,
    /// Whether the invite code is shown to the requesting user.
    pub show_invite_code: bool,
}

impl ServerDetail {
    pub fn into_dto(self) -> ServerDto {
        let invite_code = if self.show_invite_code {
            self.server.invite_code
        } else {
            None
        };

        ServerDto {
            id: self.server.id,
            name: self.server.name,
            description: self.server.description,
            icon: self.server.icon,
            member_count: self.member_count,
            visibility: self.server.visibility,
            invite_code,
            owner: self.owner.into_dto(),
            created_at: self.server.created_at,
            updated_at: self.server.updated_at,
        }
    }
}

/// Parameters for creating a server and its owner membership.
#[derive(Debug, Clone)]
pub struct CreateServerParams {
    pub owner_id: Uuid,
    pub name: String,
    pub description: String,
    pub visibility: Visibility,
    pub icon: Option<String>,
    pub invite_code: Option<String>,
}

impl CreateServerParams {
    pub fn from_dto(owner_id: Uuid, dto: CreateServerDto) -> Self {
        Self {
            owner_id,
            name: dto.name,
            description: dto.description,
            visibility: dto.visibility,
            icon: dto.icon.filter(|icon| !icon.is_empty()),
            invite_code: None,
        }
    }
}

/// Partial server update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateServerParams {
    pub name: Option<String>,
    pub description: Option<String>,
    pub visibility: Option<Visibility>,
    /// Empty string clears the icon.
    pub icon: Option<String>,
    pub invite_code: Option<String>,
}

impl UpdateServerParams {
    pub fn from_dto(dto: UpdateServerDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            visibility: dto.visibility,
            icon: dto.icon,
            invite_code: None,
        }
    }
}

/// Filters for listing servers visible to `actor_id`.
#[derive(Debug, Clone)]
pub struct ListServersParams {
    pub actor_id: Uuid,
    pub member_type: Option<MemberRole>,
    pub visibility: Option<Visibility>,
    pub search: Option<String>,
}

impl ListServersParams {
    pub fn from_query(actor_id: Uuid, query: ServerListQuery) -> Self {
        Self {
            actor_id,
            member_type: query.member_type,
            visibility: query.visibility,
            search: query.search.filter(|s| !s.trim().is_empty()),
        }
    }
}
