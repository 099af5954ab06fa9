//! User domain models and parameters.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::user::{RegisterUserDto, UpdateProfileDto, UserDto};

/// Registered account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    /// Lower-cased email, unique across users.
    pub email: String,
    /// Argon2 PHC string. Never leaves the server.
    pub password_hash: String,
    pub display_name: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub is_email_verified: bool,
    pub date_joined: DateTime<Utc>,
}

impl User {
    /// Converts the user domain model to a DTO for API responses.
    ///
    /// The password hash is dropped.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            email: self.email,
            display_name: self.display_name,
            bio: self.bio,
            phone: self.phone,
            avatar: self.avatar,
            is_email_verified: self.is_email_verified,
            date_joined: self.date_joined,
        }
    }

    /// Converts an entity model to a user domain model at the repository boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            password_hash: entity.password_hash,
            display_name: entity.display_name,
            phone: entity.phone,
            bio: entity.bio,
            avatar: entity.avatar,
            is_email_verified: entity.is_email_verified,
            date_joined: entity.date_joined,
        }
    }
}

/// Registration input after whitespace normalization, before validation.
///
/// The email is trimmed and lower-cased; the display name is trimmed and falls back to
/// `"User"` when absent.
#[derive(Debug, Clone)]
pub struct RegisterUserParams {
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirm: Option<String>,
    pub display_name: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
}

impl RegisterUserParams {
    pub fn from_dto(dto: RegisterUserDto) -> Self {
        Self {
            email: dto.email.map(|e| e.trim().to_lowercase()),
            password: dto.password,
            password_confirm: dto.password_confirm,
            display_name: dto
                .display_name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
            phone: dto.phone.filter(|p| !p.is_empty()),
            bio: dto.bio.filter(|b| !b.is_empty()),
        }
    }
}

pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// Parameters for inserting a newly registered user.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
}

/// Partial profile update.
///
/// `None` leaves a field untouched. For the optional profile fields an empty string
/// clears the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileParams {
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

impl UpdateProfileParams {
    pub fn from_dto(dto: UpdateProfileDto) -> Self {
        Self {
            display_name: dto.display_name.map(|n| n.trim().to_string()),
            phone: dto.phone,
            bio: dto.bio,
            avatar: dto.avatar,
        }
    }
}
