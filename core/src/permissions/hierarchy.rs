//! Role hierarchy.
//!
//! A fixed total order over member roles. The ordering is expressed as a
//! single canonical level per role; every hierarchy comparison in the crate
//! goes through [`Role::level`] so there is exactly one numbering scheme.

use serde::{Deserialize, Serialize};

/// Member role, totally ordered from `Guest` (lowest) to `SuperAdmin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Unauthenticated or public visitor.
    Guest,
    /// Regular association member.
    Member,
    /// Content moderator.
    Moderator,
    /// Association administrator.
    Admin,
    /// Platform owner with unrestricted access.
    SuperAdmin,
}

impl Role {
    /// Canonical hierarchy level. Higher means more privileged.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Guest => 0,
            Self::Member => 1,
            Self::Moderator => 2,
            Self::Admin => 3,
            Self::SuperAdmin => 4,
        }
    }

    /// Returns the role name used in persisted data and audit entries.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Member => "member",
            Self::Moderator => "moderator",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// All roles, ordered from lowest to highest level.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Guest,
            Self::Member,
            Self::Moderator,
            Self::Admin,
            Self::SuperAdmin,
        ]
    }

    /// Whether this role meets a minimum required role.
    #[must_use]
    pub const fn has_minimum_role(self, required: Self) -> bool {
        self.level() >= required.level()
    }

    /// Roles this role may assign to other users.
    ///
    /// A role can assign any role with a strictly lower level than its own;
    /// it can never hand out its own level or above.
    #[must_use]
    pub fn assignable_roles(self) -> Vec<Self> {
        Self::all()
            .iter()
            .copied()
            .filter(|candidate| candidate.level() < self.level())
            .collect()
    }

    /// Whether this role may assign `target` to another user.
    #[must_use]
    pub const fn can_assign_role(self, target: Self) -> bool {
        target.level() < self.level()
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.level().cmp(&other.level())
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guest" => Ok(Self::Guest),
            "member" => Ok(Self::Member),
            "moderator" => Ok(Self::Moderator),
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognized role name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_strictly_increasing() {
        let levels: Vec<u8> = Role::all().iter().map(|r| r.level()).collect();
        for pair in levels.windows(2) {
            assert!(pair[0] < pair[1], "Levels must be strictly increasing");
        }
    }

    #[test]
    fn test_ord_matches_level() {
        assert!(Role::Guest < Role::Member);
        assert!(Role::Member < Role::Moderator);
        assert!(Role::Moderator < Role::Admin);
        assert!(Role::Admin < Role::SuperAdmin);
    }

    #[test]
    fn test_every_role_satisfies_guest_minimum() {
        for role in Role::all() {
            assert!(role.has_minimum_role(Role::Guest));
        }
    }

    #[test]
    fn test_minimum_role_is_reflexive() {
        for role in Role::all() {
            assert!(role.has_minimum_role(*role));
        }
    }

    #[test]
    fn test_member_does_not_meet_admin_minimum() {
        assert!(!Role::Member.has_minimum_role(Role::Admin));
        assert!(!Role::Moderator.has_minimum_role(Role::Admin));
        assert!(Role::Admin.has_minimum_role(Role::Admin));
        assert!(Role::SuperAdmin.has_minimum_role(Role::Admin));
    }

    #[test]
    fn test_super_admin_assignable_roles() {
        let assignable = Role::SuperAdmin.assignable_roles();
        assert_eq!(
            assignable,
            vec![Role::Guest, Role::Member, Role::Moderator, Role::Admin]
        );
    }

    #[test]
    fn test_guest_assignable_roles_is_empty() {
        assert!(Role::Guest.assignable_roles().is_empty());
    }

    #[test]
    fn test_cannot_assign_own_role() {
        for role in Role::all() {
            assert!(
                !role.can_assign_role(*role),
                "{role} must not assign its own level"
            );
        }
    }

    #[test]
    fn test_admin_cannot_assign_super_admin() {
        assert!(!Role::Admin.can_assign_role(Role::SuperAdmin));
        assert!(Role::Admin.can_assign_role(Role::Moderator));
    }

    #[test]
    fn test_can_assign_matches_assignable_set() {
        for actor in Role::all() {
            let assignable = actor.assignable_roles();
            for target in Role::all() {
                assert_eq!(
                    actor.can_assign_role(*target),
                    assignable.contains(target),
                    "{actor} -> {target}"
                );
            }
        }
    }

    #[test]
    fn test_role_names_round_trip() {
        for role in Role::all() {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(parsed, *role);
        }
    }

    #[test]
    fn test_parse_unknown_role() {
        let err = "owner".parse::<Role>().unwrap_err();
        assert_eq!(err, UnknownRole("owner".to_string()));
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&Role::SuperAdmin).unwrap();
        assert_eq!(json, "\"super_admin\"");

        let role: Role = serde_json::from_str("\"moderator\"").unwrap();
        assert_eq!(role, Role::Moderator);
    }

    #[test]
    fn test_serde_matches_as_str() {
        for role in Role::all() {
            let json = serde_json::to_string(role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
        }
    }
}
