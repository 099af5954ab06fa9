use super::*;
use crate::server::policy::membership::{
    authorize_remove, authorize_role_update, authorize_view, check_assignable_role, resolve,
    ActorContext, Grant, MembershipAction,
};

fn own(role: MemberRole) -> ActorContext {
    ActorContext {
        is_target: true,
        is_owner: role == MemberRole::Owner,
        role: Some(role),
    }
}

fn owner() -> ActorContext {
    ActorContext {
        is_target: false,
        is_owner: true,
        role: Some(MemberRole::Owner),
    }
}

fn other(role: Option<MemberRole>) -> ActorContext {
    ActorContext {
        is_target: false,
        is_owner: false,
        role,
    }
}

/// Tests the base decision precedence.
///
/// Verifies that the membership's own user wins over ownership and that the owner
/// wins over an admin grant.
///
/// Expected: self, then owner, then admin
#[test]
fn resolves_grants_in_precedence_order() {
    assert_eq!(
        resolve(&own(MemberRole::Owner), MemberRole::Owner, MembershipAction::View),
        Ok(Grant::Own)
    );
    assert_eq!(
        resolve(&owner(), MemberRole::Member, MembershipAction::Remove),
        Ok(Grant::Owner)
    );
    assert_eq!(
        resolve(
            &other(Some(MemberRole::Admin)),
            MemberRole::Moderator,
            MembershipAction::UpdateRole
        ),
        Ok(Grant::Admin)
    );
    assert_eq!(Grant::Own.code(), "self");
}

/// Tests admins may view but not touch the owner's membership.
///
/// Expected: View granted, UpdateRole and Remove denied with admin_cannot_modify_owner
#[test]
fn admin_cannot_modify_owner_membership() {
    let admin = other(Some(MemberRole::Admin));

    assert_eq!(authorize_view(&admin, MemberRole::Owner), Ok(Grant::Admin));

    let update = authorize_role_update(&admin, MemberRole::Owner, &["role"]).unwrap_err();
    assert_eq!(update.reason, DenialReason::AdminCannotModifyOwner);
    assert_eq!(update.message, "Admins cannot modify the owner's membership.");
    assert_eq!(update.reason.status(), axum::http::StatusCode::FORBIDDEN);

    let remove = authorize_remove(&admin, MemberRole::Owner).unwrap_err();
    assert_eq!(remove.reason, DenialReason::AdminCannotModifyOwner);
    assert_eq!(remove.message, "Admins cannot remove the server owner.");
}

/// Tests moderators, members and outsiders get no access to other memberships.
///
/// Expected: no_permission with the action-specific message
#[test]
fn denies_non_privileged_actors() {
    for actor in [
        other(Some(MemberRole::Moderator)),
        other(Some(MemberRole::Member)),
        other(None),
    ] {
        let view = authorize_view(&actor, MemberRole::Member).unwrap_err();
        assert_eq!(view.reason, DenialReason::NoPermission);
        assert_eq!(view.message, "Permission denied.");

        let update = authorize_role_update(&actor, MemberRole::Member, &["role"]).unwrap_err();
        assert_eq!(
            update.message,
            "Permission denied. Only server owners and admins can update member roles."
        );

        let remove = authorize_remove(&actor, MemberRole::Member).unwrap_err();
        assert_eq!(
            remove.message,
            "Permission denied. You can only leave servers yourself or be removed by admins/owners."
        );
    }
}

/// Tests the owner's role cannot be changed, not even by the owner.
///
/// Expected: owner_role_immutable (400)
#[test]
fn owner_role_is_immutable() {
    let denial = authorize_role_update(&own(MemberRole::Owner), MemberRole::Owner, &["role"])
        .unwrap_err();

    assert_eq!(denial.reason, DenialReason::OwnerRoleImmutable);
    assert_eq!(denial.reason.status(), axum::http::StatusCode::BAD_REQUEST);
}

/// Tests a member cannot change their own role.
///
/// Expected: self_role_change (400) for admin and member alike
#[test]
fn rejects_self_role_change() {
    for role in [MemberRole::Admin, MemberRole::Member] {
        let denial = authorize_role_update(&own(role), role, &["role"]).unwrap_err();

        assert_eq!(denial.reason, DenialReason::SelfRoleChange);
        assert_eq!(
            denial.message,
            "You cannot change your own role. Ask an admin or owner."
        );
    }
}

/// Tests a member sending only other fields for their own membership.
///
/// Expected: immutable_fields rather than self_role_change
#[test]
fn self_update_without_role_reports_immutable_fields() {
    let denial =
        authorize_role_update(&own(MemberRole::Member), MemberRole::Member, &["nickname"])
            .unwrap_err();

    assert_eq!(denial.reason, DenialReason::ImmutableFields);
    assert_eq!(
        denial.message,
        "Cannot update fields: nickname. Only 'role' can be updated."
    );
}

/// Tests fields other than role are rejected by name.
///
/// Expected: immutable_fields listing every offending field in request order
#[test]
fn rejects_extra_fields() {
    let denial =
        authorize_role_update(&owner(), MemberRole::Member, &["role", "user", "server"])
            .unwrap_err();

    assert_eq!(denial.reason, DenialReason::ImmutableFields);
    assert_eq!(
        denial.message,
        "Cannot update fields: user, server. Only 'role' can be updated."
    );
}

/// Tests owner and admin may change another member's role.
///
/// Expected: Ok with the matching grant
#[test]
fn allows_owner_and_admin_role_updates() {
    assert_eq!(
        authorize_role_update(&owner(), MemberRole::Member, &["role"]),
        Ok(Grant::Owner)
    );
    assert_eq!(
        authorize_role_update(&other(Some(MemberRole::Admin)), MemberRole::Admin, &["role"]),
        Ok(Grant::Admin)
    );
}

/// Tests the owner role cannot be handed out.
///
/// Expected: owner_role_assignment for owner, Ok otherwise
#[test]
fn owner_role_is_not_assignable() {
    assert_eq!(
        check_assignable_role(MemberRole::Owner).unwrap_err().reason,
        DenialReason::OwnerRoleAssignment
    );
    assert!(check_assignable_role(MemberRole::Moderator).is_ok());
}

/// Tests leaving and removal rules.
///
/// Verifies that members can leave, owner/admin can remove others, and the owner's
/// membership can never be removed.
///
/// Expected: Ok for non-owner targets, owner_cannot_leave for the owner
#[test]
fn removal_rules() {
    assert_eq!(
        authorize_remove(&own(MemberRole::Member), MemberRole::Member),
        Ok(Grant::Own)
    );
    assert_eq!(
        authorize_remove(&owner(), MemberRole::Admin),
        Ok(Grant::Owner)
    );
    assert_eq!(
        authorize_remove(&other(Some(MemberRole::Admin)), MemberRole::Member),
        Ok(Grant::Admin)
    );

    let denial = authorize_remove(&own(MemberRole::Owner), MemberRole::Owner).unwrap_err();
    assert_eq!(denial.reason, DenialReason::OwnerCannotLeave);
}
