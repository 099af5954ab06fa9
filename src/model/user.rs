use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub is_email_verified: bool,
    pub date_joined: DateTime<Utc>,
}

/// Registration body. Every field is optional at the wire level so that missing values
/// are reported as field validation errors rather than a body rejection.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RegisterUserDto {
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirm: Option<String>,
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
}

/// Profile update body. Read-only profile fields are not part of the body and are
/// ignored if submitted.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProfileDto {
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponseDto {
    pub message: String,
    pub user: UserDto,
}
