//! Permission catalog.
//!
//! Static role → permission-set table, defined once and never mutated.
//! Each higher role carries every management permission granted to the roles
//! below it plus its own extras; route guards and UI chrome look capabilities
//! up by their dotted string id (e.g. `"content.manage"`).

use serde::{Deserialize, Serialize};

use super::hierarchy::Role;

/// A named capability gating one privileged action in the application.
///
/// Serializes as its dotted string id so persisted data and route-guard
/// configuration use the same names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// Access the admin dashboard.
    #[serde(rename = "admin.access")]
    AdminAccess,
    /// View the member list.
    #[serde(rename = "users.view")]
    UsersView,
    /// Create, edit, and deactivate member accounts.
    #[serde(rename = "users.manage")]
    UsersManage,
    /// Permanently delete member accounts.
    #[serde(rename = "users.delete")]
    UsersDelete,
    /// Assign roles to other members.
    #[serde(rename = "roles.assign")]
    RolesAssign,
    /// View public content (activities, gallery, news).
    #[serde(rename = "content.view")]
    ContentView,
    /// Submit new content for the association.
    #[serde(rename = "content.create")]
    ContentCreate,
    /// Edit and curate published content.
    #[serde(rename = "content.manage")]
    ContentManage,
    /// Remove published content.
    #[serde(rename = "content.delete")]
    ContentDelete,
    /// Manage scheduled activities.
    #[serde(rename = "activities.manage")]
    ActivitiesManage,
    /// Manage gallery albums and images.
    #[serde(rename = "gallery.manage")]
    GalleryManage,
    /// Manage news posts.
    #[serde(rename = "news.manage")]
    NewsManage,
    /// View donation records.
    #[serde(rename = "donations.view")]
    DonationsView,
    /// Manage donation records and campaigns.
    #[serde(rename = "donations.manage")]
    DonationsManage,
    /// View one's own member profile.
    #[serde(rename = "profile.view")]
    ProfileView,
    /// Edit one's own member profile.
    #[serde(rename = "profile.edit")]
    ProfileEdit,
    /// Manage platform-wide settings.
    #[serde(rename = "settings.manage")]
    SettingsManage,
}

impl Permission {
    /// Returns the dotted string id used by route guards and audit entries.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::AdminAccess => "admin.access",
            Self::UsersView => "users.view",
            Self::UsersManage => "users.manage",
            Self::UsersDelete => "users.delete",
            Self::RolesAssign => "roles.assign",
            Self::ContentView => "content.view",
            Self::ContentCreate => "content.create",
            Self::ContentManage => "content.manage",
            Self::ContentDelete => "content.delete",
            Self::ActivitiesManage => "activities.manage",
            Self::GalleryManage => "gallery.manage",
            Self::NewsManage => "news.manage",
            Self::DonationsView => "donations.view",
            Self::DonationsManage => "donations.manage",
            Self::ProfileView => "profile.view",
            Self::ProfileEdit => "profile.edit",
            Self::SettingsManage => "settings.manage",
        }
    }

    /// All permissions as a slice. Useful for iteration and validation.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::AdminAccess,
            Self::UsersView,
            Self::UsersManage,
            Self::UsersDelete,
            Self::RolesAssign,
            Self::ContentView,
            Self::ContentCreate,
            Self::ContentManage,
            Self::ContentDelete,
            Self::ActivitiesManage,
            Self::GalleryManage,
            Self::NewsManage,
            Self::DonationsView,
            Self::DonationsManage,
            Self::ProfileView,
            Self::ProfileEdit,
            Self::SettingsManage,
        ]
    }

    /// Look a permission up by its dotted string id.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.id() == id)
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Permissions granted to unauthenticated visitors and the `Guest` role.
const GUEST_PERMISSIONS: &[Permission] = &[Permission::ContentView];

/// Guest permissions plus member self-service and content submission.
const MEMBER_PERMISSIONS: &[Permission] = &[
    Permission::ContentView,
    Permission::ContentCreate,
    Permission::ProfileView,
    Permission::ProfileEdit,
    Permission::DonationsView,
];

/// Member permissions plus content curation across all content areas.
const MODERATOR_PERMISSIONS: &[Permission] = &[
    Permission::ContentView,
    Permission::ContentCreate,
    Permission::ProfileView,
    Permission::ProfileEdit,
    Permission::DonationsView,
    Permission::ContentManage,
    Permission::ActivitiesManage,
    Permission::GalleryManage,
    Permission::NewsManage,
    Permission::UsersView,
];

/// Moderator permissions plus member administration and the admin dashboard.
const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::ContentView,
    Permission::ContentCreate,
    Permission::ProfileView,
    Permission::ProfileEdit,
    Permission::DonationsView,
    Permission::ContentManage,
    Permission::ActivitiesManage,
    Permission::GalleryManage,
    Permission::NewsManage,
    Permission::UsersView,
    Permission::AdminAccess,
    Permission::UsersManage,
    Permission::RolesAssign,
    Permission::DonationsManage,
    Permission::ContentDelete,
];

/// Everything. Super admins additionally hold destructive member operations
/// and platform settings.
const SUPER_ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::ContentView,
    Permission::ContentCreate,
    Permission::ProfileView,
    Permission::ProfileEdit,
    Permission::DonationsView,
    Permission::ContentManage,
    Permission::ActivitiesManage,
    Permission::GalleryManage,
    Permission::NewsManage,
    Permission::UsersView,
    Permission::AdminAccess,
    Permission::UsersManage,
    Permission::RolesAssign,
    Permission::DonationsManage,
    Permission::ContentDelete,
    Permission::UsersDelete,
    Permission::SettingsManage,
];

impl Role {
    /// The static permission set for this role.
    #[must_use]
    pub const fn permissions(self) -> &'static [Permission] {
        match self {
            Self::Guest => GUEST_PERMISSIONS,
            Self::Member => MEMBER_PERMISSIONS,
            Self::Moderator => MODERATOR_PERMISSIONS,
            Self::Admin => ADMIN_PERMISSIONS,
            Self::SuperAdmin => SUPER_ADMIN_PERMISSIONS,
        }
    }

    /// Whether this role's catalog entry grants `permission`.
    #[must_use]
    pub fn grants(self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }
}
