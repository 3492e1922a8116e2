//! Permission system types and utilities.
//!
//! Three layers:
//! - Catalog: static role → permission-set table
//! - Hierarchy: total order over roles with assignability rules
//! - Resolver: pure queries composed from the two

pub mod catalog;
pub mod hierarchy;
pub mod resolver;

pub use catalog::Permission;
pub use hierarchy::{Role, UnknownRole};
pub use resolver::{
    access_level, can_act_on_user, has_all_permissions, has_any_permission, has_permission,
};
