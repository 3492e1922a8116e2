//! Permission resolution logic.
//!
//! Pure query functions over the catalog and the role hierarchy. Nothing
//! here has side effects or returns errors: a denied permission is always a
//! plain `false`, and the caller (route guard, UI chrome) decides what the
//! user sees. Safe to call on every render or route check.

use super::catalog::Permission;
use super::hierarchy::Role;

/// Whether a user with `role` holds `permission`.
///
/// `None` means unauthenticated and is checked against the `Guest` set.
#[must_use]
pub fn has_permission(role: Option<Role>, permission: Permission) -> bool {
    role.unwrap_or(Role::Guest).grants(permission)
}

/// Whether the role holds every permission in `permissions`.
///
/// Vacuously true for an empty slice.
#[must_use]
pub fn has_all_permissions(role: Option<Role>, permissions: &[Permission]) -> bool {
    permissions.iter().all(|p| has_permission(role, *p))
}

/// Whether the role holds at least one permission in `permissions`.
#[must_use]
pub fn has_any_permission(role: Option<Role>, permissions: &[Permission]) -> bool {
    permissions.iter().any(|p| has_permission(role, *p))
}

/// Whether `actor` may act on a user holding `target`.
///
/// Strictly greater: a role can never act on a peer of equal level,
/// including itself. This is what stops an admin from disabling another
/// admin.
#[must_use]
pub const fn can_act_on_user(actor: Role, target: Role) -> bool {
    actor.level() > target.level()
}

/// Hierarchy level of the current user, 0 when unauthenticated.
#[must_use]
pub fn access_level(role: Option<Role>) -> u8 {
    role.map_or(Role::Guest.level(), Role::level)
}
