//! Server-level permission resolution.

use crate::{
    model::{membership::MemberRole, server::Visibility},
    server::policy::{Denial, DenialReason},
};

const NOT_OWNER_MESSAGE: &str = "Permission denied. You are not the owner of this server.";

/// What the service knows about the acting user relative to a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServerActor {
    pub is_owner: bool,
    /// Actor's membership role on the server, if any.
    pub role: Option<MemberRole>,
}

impl ServerActor {
    pub fn is_member(&self) -> bool {
        self.is_owner || self.role.is_some()
    }

    pub fn is_owner_or_admin(&self) -> bool {
        self.is_owner || self.role == Some(MemberRole::Admin)
    }
}

/// Public servers are visible to anyone; private ones to the owner and members.
pub fn authorize_view(actor: &ServerActor, visibility: Visibility) -> Result<(), Denial> {
    if visibility == Visibility::Private && !actor.is_member() {
        return Err(Denial::new(
            DenialReason::PrivateServer,
            "Permission denied. This server is private.",
        ));
    }

    Ok(())
}

pub fn authorize_update(actor: &ServerActor) -> Result<(), Denial> {
    if !actor.is_owner_or_admin() {
        return Err(Denial::new(DenialReason::NotOwnerOrAdmin, NOT_OWNER_MESSAGE));
    }

    Ok(())
}

pub fn authorize_delete(actor: &ServerActor) -> Result<(), Denial> {
    if !actor.is_owner {
        return Err(Denial::new(DenialReason::NotOwner, NOT_OWNER_MESSAGE));
    }

    Ok(())
}

pub fn authorize_list_members(actor: &ServerActor) -> Result<(), Denial> {
    if !actor.is_member() {
        return Err(Denial::new(
            DenialReason::NotMember,
            "Permission denied. You are not a member of this server.",
        ));
    }

    Ok(())
}

/// Adding a member directly follows the update rule.
pub fn authorize_grant(actor: &ServerActor) -> Result<(), Denial> {
    authorize_update(actor)
}

pub fn authorize_rotate_invite(actor: &ServerActor) -> Result<(), Denial> {
    authorize_update(actor)
}

pub fn can_see_invite_code(actor: &ServerActor) -> bool {
    actor.is_owner_or_admin()
}

/// Whether a user without a membership may join.
///
/// Private servers require the submitted code to match the stored one exactly.
pub fn authorize_join(
    actor: &ServerActor,
    visibility: Visibility,
    stored_code: Option<&str>,
    submitted_code: Option<&str>,
) -> Result<(), Denial> {
    if actor.is_owner {
        return Err(already_owner());
    }

    if actor.role.is_some() {
        return Err(already_member());
    }

    if visibility == Visibility::Private {
        let matches = matches!(
            (stored_code, submitted_code),
            (Some(stored), Some(submitted)) if !stored.is_empty() && stored == submitted
        );
        if !matches {
            return Err(Denial::new(
                DenialReason::InvalidInviteCode,
                "This is a private server. You need a valid invitation code to join.",
            ));
        }
    }

    Ok(())
}

pub fn already_owner() -> Denial {
    Denial::new(
        DenialReason::AlreadyOwner,
        "You are the owner of this server and already a member.",
    )
}

pub fn already_member() -> Denial {
    Denial::new(
        DenialReason::AlreadyMember,
        "You are already a member of this server.",
    )
}
