//! Authorization and business-rule decisions.
//!
//! Every function in this module is pure: it takes what the service layer already loaded
//! about the actor and the target and returns either a grant or a [`Denial`]. No database
//! or HTTP types are involved, so the rules are unit tested on their own.

pub mod membership;
pub mod server;

#[cfg(test)]
mod test;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Machine-readable reason attached to every denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    NoPermission,
    AdminCannotModifyOwner,
    OwnerRoleImmutable,
    SelfRoleChange,
    ImmutableFields,
    OwnerRoleAssignment,
    OwnerCannotLeave,
    PrivateServer,
    NotOwnerOrAdmin,
    NotOwner,
    NotMember,
    AlreadyOwner,
    AlreadyMember,
    InvalidInviteCode,
}

impl DenialReason {
    /// Stable code returned to clients in the `reason` field.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoPermission => "no_permission",
            Self::AdminCannotModifyOwner => "admin_cannot_modify_owner",
            Self::OwnerRoleImmutable => "owner_role_immutable",
            Self::SelfRoleChange => "self_role_change",
            Self::ImmutableFields => "immutable_fields",
            Self::OwnerRoleAssignment => "owner_role_assignment",
            Self::OwnerCannotLeave => "owner_cannot_leave",
            Self::PrivateServer => "private_server",
            Self::NotOwnerOrAdmin => "not_owner_or_admin",
            Self::NotOwner => "not_owner",
            Self::NotMember => "not_member",
            Self::AlreadyOwner => "already_owner",
            Self::AlreadyMember => "already_member",
            Self::InvalidInviteCode => "invalid_invite_code",
        }
    }

    /// Authorization failures are 403, business-rule violations are 400.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::OwnerRoleImmutable
            | Self::SelfRoleChange
            | Self::ImmutableFields
            | Self::OwnerRoleAssignment
            | Self::OwnerCannotLeave
            | Self::AlreadyOwner
            | Self::AlreadyMember => StatusCode::BAD_REQUEST,
            Self::NoPermission
            | Self::AdminCannotModifyOwner
            | Self::PrivateServer
            | Self::NotOwnerOrAdmin
            | Self::NotOwner
            | Self::NotMember
            | Self::InvalidInviteCode => StatusCode::FORBIDDEN,
        }
    }
}

/// A refused action with the message shown to the client.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct Denial {
    pub reason: DenialReason,
    pub message: String,
}

impl Denial {
    pub fn new(reason: DenialReason, message: impl Into<String>) -> Self {
        Self {
            reason,
            message: message.into(),
        }
    }
}

impl IntoResponse for Denial {
    fn into_response(self) -> Response {
        tracing::debug!("Denied ({}): {}", self.reason.code(), self.message);

        (
            self.reason.status(),
            Json(ErrorDto {
                error: self.message,
                reason: Some(self.reason.code().to_string()),
                fields: None,
            }),
        )
            .into_response()
    }
}
