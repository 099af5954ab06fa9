//! Membership-level permission resolution.
//!
//! Decides whether an actor may view, change the role of, or remove a single
//! membership. The base decision grants access to the membership's own user, the server
//! owner and server admins; the action-specific rules are layered on top of it.

use crate::{
    model::membership::MemberRole,
    server::policy::{Denial, DenialReason},
};

/// What the service knows about the acting user relative to a target membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorContext {
    /// Actor is the user the target membership belongs to.
    pub is_target: bool,
    /// Actor owns the membership's server.
    pub is_owner: bool,
    /// Actor's own role on the server, if they are a member.
    pub role: Option<MemberRole>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipAction {
    View,
    UpdateRole,
    Remove,
}

/// Why access was granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    /// Actor is the membership's own user.
    Own,
    Owner,
    Admin,
}

impl Grant {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Own => "self",
            Self::Owner => "owner",
            Self::Admin => "admin",
        }
    }
}

/// Base permission decision shared by every membership action.
///
/// Precedence: the membership's own user, then the server owner, then an admin of the
/// same server. Admins may never change or remove the owner's membership.
pub fn resolve(
    actor: &ActorContext,
    target_role: MemberRole,
    action: MembershipAction,
) -> Result<Grant, Denial> {
    if actor.is_target {
        return Ok(Grant::Own);
    }

    if actor.is_owner {
        return Ok(Grant::Owner);
    }

    if actor.role == Some(MemberRole::Admin) {
        if target_role == MemberRole::Owner && action != MembershipAction::View {
            return Err(Denial::new(
                DenialReason::AdminCannotModifyOwner,
                admin_cannot_modify_owner_message(action),
            ));
        }
        return Ok(Grant::Admin);
    }

    Err(Denial::new(
        DenialReason::NoPermission,
        no_permission_message(action),
    ))
}

pub fn authorize_view(actor: &ActorContext, target_role: MemberRole) -> Result<Grant, Denial> {
    resolve(actor, target_role, MembershipAction::View)
}

/// Role change on an existing membership.
///
/// `fields` holds every key present in the request body.
pub fn authorize_role_update(
    actor: &ActorContext,
    target_role: MemberRole,
    fields: &[&str],
) -> Result<Grant, Denial> {
    let grant = resolve(actor, target_role, MembershipAction::UpdateRole)?;

    if target_role == MemberRole::Owner {
        return Err(Denial::new(
            DenialReason::OwnerRoleImmutable,
            "Cannot modify the owner's role. Transfer ownership first.",
        ));
    }

    if actor.is_target && fields.contains(&"role") {
        return Err(Denial::new(
            DenialReason::SelfRoleChange,
            "You cannot change your own role. Ask an admin or owner.",
        ));
    }

    let invalid: Vec<&str> = fields
        .iter()
        .copied()
        .filter(|field| *field != "role")
        .collect();
    if !invalid.is_empty() {
        return Err(Denial::new(
            DenialReason::ImmutableFields,
            format!(
                "Cannot update fields: {}. Only 'role' can be updated.",
                invalid.join(", ")
            ),
        ));
    }

    Ok(grant)
}

/// The owner role only ever comes from creating a server.
pub fn check_assignable_role(role: MemberRole) -> Result<(), Denial> {
    if role == MemberRole::Owner {
        return Err(Denial::new(
            DenialReason::OwnerRoleAssignment,
            "The owner role cannot be assigned. Transfer ownership instead.",
        ));
    }

    Ok(())
}

/// Leaving (actor is the target) or removing another member.
pub fn authorize_remove(actor: &ActorContext, target_role: MemberRole) -> Result<Grant, Denial> {
    let grant = resolve(actor, target_role, MembershipAction::Remove)?;

    if target_role == MemberRole::Owner {
        return Err(Denial::new(
            DenialReason::OwnerCannotLeave,
            "Server owners cannot leave their own server. Transfer ownership or delete the server.",
        ));
    }

    Ok(grant)
}

fn no_permission_message(action: MembershipAction) -> &'static str {
    match action {
        MembershipAction::View => "Permission denied.",
        MembershipAction::UpdateRole => {
            "Permission denied. Only server owners and admins can update member roles."
        }
        MembershipAction::Remove => {
            "Permission denied. You can only leave servers yourself or be removed by admins/owners."
        }
    }
}

fn admin_cannot_modify_owner_message(action: MembershipAction) -> &'static str {
    match action {
        MembershipAction::Remove => "Admins cannot remove the server owner.",
        MembershipAction::View | MembershipAction::UpdateRole => {
            "Admins cannot modify the owner's membership."
        }
    }
}
