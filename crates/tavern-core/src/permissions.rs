//! Permission names understood by the admin dashboard.
//!
//! A Credential Record carries a list of these strings; a guarded route
//! requires exactly one of them. Records may hold names outside this catalog
//! (they are stored verbatim), the catalog only documents what the routes use.
//!
//! # Example
//!
//! ```ignore
//! use tavern_core::permissions;
//!
//! async fn require_manage_menus(
//!     state: State<AppState>,
//!     req: Request,
//!     next: Next,
//! ) -> Result<Response, AppError> {
//!     require_permission(state, req, next, permissions::MANAGE_MENUS).await
//! }
//!
//! let menus = menus_router.route_layer(middleware::from_fn_with_state(
//!     state.clone(),
//!     require_manage_menus,
//! ));
//! ```

use serde::Serialize;
use utoipa::ToSchema;

// =============================================================================
// Events
// =============================================================================

/// Permission to publish new events
pub const ADD_EVENTS: &str = "AddEvents";
/// Permission to edit and remove events
pub const MANAGE_EVENTS: &str = "ManageEvents";

// =============================================================================
// Venue content
// =============================================================================

/// Permission to upload and remove gallery images
pub const MANAGE_GALLERY: &str = "ManageGallery";
pub const MANAGE_MENUS: &str = "ManageMenus";
pub const MANAGE_SPECIALS: &str = "ManageSpecials";
pub const MANAGE_VENUES: &str = "ManageVenues";
pub const MANAGE_POSTS: &str = "ManagePosts";

// =============================================================================
// Communication
// =============================================================================

pub const MANAGE_SUBSCRIBERS: &str = "ManageSubscribers";
/// Permission to change outbound mail settings
pub const MANAGE_MAIL: &str = "ManageMail";

// =============================================================================
// Administration
// =============================================================================

/// Permission to create, edit and delete Credential Records
pub const MANAGE_ROLES: &str = "ManageRoles";

/// A catalog entry as shown to the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PermissionInfo {
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
}

const CATALOG: &[PermissionInfo] = &[
    PermissionInfo {
        name: ADD_EVENTS,
        category: "events",
        description: "Publish new events",
    },
    PermissionInfo {
        name: MANAGE_EVENTS,
        category: "events",
        description: "Edit and remove events",
    },
    PermissionInfo {
        name: MANAGE_GALLERY,
        category: "content",
        description: "Upload and remove gallery images",
    },
    PermissionInfo {
        name: MANAGE_MENUS,
        category: "content",
        description: "Edit menus and menu items",
    },
    PermissionInfo {
        name: MANAGE_SPECIALS,
        category: "content",
        description: "Edit daily specials",
    },
    PermissionInfo {
        name: MANAGE_VENUES,
        category: "content",
        description: "Edit venue details",
    },
    PermissionInfo {
        name: MANAGE_POSTS,
        category: "content",
        description: "Write and remove posts",
    },
    PermissionInfo {
        name: MANAGE_SUBSCRIBERS,
        category: "communication",
        description: "View and remove newsletter subscribers",
    },
    PermissionInfo {
        name: MANAGE_MAIL,
        category: "communication",
        description: "Change outbound mail settings",
    },
    PermissionInfo {
        name: MANAGE_ROLES,
        category: "administration",
        description: "Create, edit and delete login roles",
    },
];

/// All known permissions, grouped by category in declaration order.
pub fn catalog() -> &'static [PermissionInfo] {
    CATALOG
}

/// Whether `name` is one of the catalog permissions.
pub fn is_known(name: &str) -> bool {
    CATALOG.iter().any(|p| p.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_names_are_unique() {
        let names: HashSet<_> = catalog().iter().map(|p| p.name).collect();
        assert_eq!(names.len(), catalog().len());
    }

    #[test]
    fn test_is_known() {
        assert!(is_known(ADD_EVENTS));
        assert!(is_known(MANAGE_ROLES));
        assert!(!is_known("addevents"));
        assert!(!is_known(""));
    }
}
