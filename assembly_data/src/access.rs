// Role and allow-list resolution.
//
// A user document carries a role and three optional allow-lists. Resolution
// turns that into concrete lists of visible assemblies, pages and admin
// sections, with a three-way scope per resource class that the rendering
// layer branches on.

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalog::{AdminSection, Assembly, ADMIN_SECTIONS};
use crate::model::AssemblyId;

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Client,
    Admin,
    SuperAdmin,
}

impl Role {
    /// Maps a stored role string to a role. Anything unknown or missing
    /// resolves to the least privileged role; a malformed user document must
    /// never widen access.
    pub fn parse(value: Option<&str>) -> Role {
        match value {
            Some("admin") => Role::Admin,
            Some("super_admin") => Role::SuperAdmin,
            _ => Role::Client,
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }
}

/// A stored user document, as the authentication layer hands it over.
///
/// The role is kept as the raw string and interpreted through
/// [`UserRecord::role`]; the allow-lists distinguish an absent field from a
/// present-but-empty list, and both distinctions are meaningful (see
/// [`resolve_access`]).
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRecord {
    pub role: Option<String>,
    #[serde(rename = "accessibleAssemblies")]
    pub accessible_assemblies: Option<Vec<String>>,
    #[serde(rename = "accessiblePages")]
    pub accessible_pages: Option<Vec<String>>,
    #[serde(rename = "accessibleAdminSections")]
    pub accessible_admin_sections: Option<Vec<String>>,
}

impl UserRecord {
    pub fn role(&self) -> Role {
        Role::parse(self.role.as_deref())
    }
}

/// The three states a resource class can be in for a user. Each renders
/// differently: the full surface, a filtered surface, or a contact-the-
/// administrator notice.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum AccessScope {
    Unrestricted,
    Limited,
    Denied,
}

/// Resolved visibility for one user.
#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct AccessResolution {
    pub role: Role,
    /// Visible assemblies, in catalog order.
    pub assemblies: Vec<Assembly>,
    /// `None` means unrestricted (every page); `Some(vec![])` means no page
    /// at all. The two are distinct states, not interchangeable.
    pub pages: Option<Vec<String>>,
    #[serde(rename = "adminSections")]
    pub admin_sections: Vec<AdminSection>,
}

impl AccessResolution {
    pub fn can_see_any_assembly(&self) -> bool {
        !self.assemblies.is_empty()
    }

    pub fn can_see_any_page(&self) -> bool {
        match &self.pages {
            None => true,
            Some(pages) => !pages.is_empty(),
        }
    }

    pub fn assembly_scope(&self) -> AccessScope {
        if self.role.is_admin() {
            AccessScope::Unrestricted
        } else if self.assemblies.is_empty() {
            AccessScope::Denied
        } else {
            AccessScope::Limited
        }
    }

    pub fn page_scope(&self) -> AccessScope {
        match &self.pages {
            None => AccessScope::Unrestricted,
            Some(pages) if pages.is_empty() => AccessScope::Denied,
            Some(_) => AccessScope::Limited,
        }
    }
}

/// Computes the visible assemblies, pages and admin sections for a user.
///
/// Admin roles resolve to the full catalog regardless of any allow-list
/// content. Clients get the catalog filtered to their assembly allow-list
/// (catalog order, canonical id comparison) and their page allow-list
/// verbatim.
pub fn resolve_access(user: &UserRecord, catalog: &[Assembly]) -> AccessResolution {
    let role = user.role();
    let assemblies: Vec<Assembly> = if role.is_admin() {
        catalog.to_vec()
    } else {
        let wanted: HashSet<AssemblyId> = user
            .accessible_assemblies
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|id| AssemblyId::new(id))
            .collect();
        catalog
            .iter()
            .copied()
            .filter(|a| wanted.contains(&AssemblyId::new(a.id)))
            .collect()
    };
    let pages = if role.is_admin() {
        None
    } else {
        Some(user.accessible_pages.clone().unwrap_or_default())
    };
    let admin_sections = resolve_admin_sections(user, role);
    debug!(
        "resolve_access: role {:?}, {} assemblies, pages {:?}, {} admin sections",
        role,
        assemblies.len(),
        pages.as_ref().map(|p| p.len()),
        admin_sections.len()
    );
    AccessResolution {
        role,
        assemblies,
        pages,
        admin_sections,
    }
}

// Super admins see everything. Admins see the non-restricted sections,
// narrowed by their section allow-list when one is present: an absent list
// means all sections, a present-but-empty list means none. Clients see no
// admin section.
fn resolve_admin_sections(user: &UserRecord, role: Role) -> Vec<AdminSection> {
    ADMIN_SECTIONS
        .iter()
        .copied()
        .filter(|section| match role {
            Role::SuperAdmin => true,
            Role::Admin => {
                if section.super_admin_only {
                    return false;
                }
                match &user.accessible_admin_sections {
                    Some(ids) => ids.iter().any(|id| id == section.id),
                    None => true,
                }
            }
            Role::Client => false,
        })
        .collect()
}

/// Repairs an assembly selection against a freshly resolved allow-list.
///
/// Total over its inputs: a selection canonically matching an allowed entry
/// is kept (returned in the entry's own spelling), anything else falls back
/// to the first allowed entry, and an empty list clears the selection.
pub fn repair_assembly_selection(current: Option<&str>, allowed: &[Assembly]) -> Option<String> {
    if let Some(cur) = current {
        let cur_id = AssemblyId::new(cur);
        if let Some(entry) = allowed.iter().find(|a| AssemblyId::new(a.id) == cur_id) {
            return Some(entry.id.to_string());
        }
    }
    allowed.first().map(|a| a.id.to_string())
}

/// Repairs a page selection. Under unrestricted access any page stands;
/// under restricted access the page must be in the list or falls back to
/// its first entry; a restricted-empty list clears the selection (there is
/// no page to switch to).
pub fn repair_page_selection(current: Option<&str>, pages: Option<&[String]>) -> Option<String> {
    match pages {
        None => current.map(str::to_string),
        Some(list) => {
            if let Some(cur) = current {
                if list.iter().any(|p| p == cur) {
                    return Some(cur.to_string());
                }
            }
            list.first().cloned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ASSEMBLIES;

    fn catalog() -> Vec<Assembly> {
        vec![
            Assembly { id: "108.0", name: "North" },
            Assembly { id: "109.0", name: "South" },
            Assembly { id: "112.0", name: "East" },
        ]
    }

    fn client(assemblies: Option<Vec<&str>>, pages: Option<Vec<&str>>) -> UserRecord {
        UserRecord {
            role: Some("client".to_string()),
            accessible_assemblies: assemblies
                .map(|ids| ids.into_iter().map(str::to_string).collect()),
            accessible_pages: pages.map(|ids| ids.into_iter().map(str::to_string).collect()),
            accessible_admin_sections: None,
        }
    }

    #[test]
    fn admin_gets_full_catalog_and_unrestricted_pages() {
        let user = UserRecord {
            role: Some("admin".to_string()),
            // Allow-list content is irrelevant for admin roles.
            accessible_assemblies: Some(vec!["108.0".to_string()]),
            accessible_pages: Some(vec![]),
            accessible_admin_sections: None,
        };
        let access = resolve_access(&user, &catalog());
        assert_eq!(access.assemblies, catalog());
        assert_eq!(access.pages, None);
        assert_eq!(access.assembly_scope(), AccessScope::Unrestricted);
        assert_eq!(access.page_scope(), AccessScope::Unrestricted);
        assert!(access.can_see_any_page());
    }

    #[test]
    fn client_assemblies_filtered_in_catalog_order() {
        let user = client(Some(vec!["112.0", "108.0"]), None);
        let access = resolve_access(&user, &catalog());
        let ids: Vec<&str> = access.assemblies.iter().map(|a| a.id).collect();
        // Catalog order, not allow-list order.
        assert_eq!(ids, vec!["108.0", "112.0"]);
        assert_eq!(access.assembly_scope(), AccessScope::Limited);
    }

    #[test]
    fn client_single_assembly() {
        let user = client(Some(vec!["112.0"]), None);
        let access = resolve_access(&user, &catalog());
        assert_eq!(access.assemblies.len(), 1);
        assert_eq!(access.assemblies[0].id, "112.0");
    }

    #[test]
    fn client_allow_list_matches_canonically() {
        // The allow-list spells the id without the float artifact.
        let user = client(Some(vec!["112"]), None);
        let access = resolve_access(&user, &catalog());
        assert_eq!(access.assemblies.len(), 1);
        assert_eq!(access.assemblies[0].id, "112.0");
    }

    #[test]
    fn client_empty_pages_is_denied_not_unrestricted() {
        let user = client(None, Some(vec![]));
        let access = resolve_access(&user, &catalog());
        assert_eq!(access.pages, Some(vec![]));
        assert_eq!(access.page_scope(), AccessScope::Denied);
        assert!(!access.can_see_any_page());
    }

    #[test]
    fn missing_role_fails_closed() {
        let user = UserRecord::default();
        let access = resolve_access(&user, &catalog());
        assert_eq!(access.role, Role::Client);
        assert!(access.assemblies.is_empty());
        assert_eq!(access.assembly_scope(), AccessScope::Denied);
        assert!(access.admin_sections.is_empty());
    }

    #[test]
    fn unknown_role_fails_closed() {
        let user = UserRecord {
            role: Some("owner".to_string()),
            ..UserRecord::default()
        };
        assert_eq!(user.role(), Role::Client);
    }

    #[test]
    fn super_admin_sees_all_sections() {
        let user = UserRecord {
            role: Some("super_admin".to_string()),
            ..UserRecord::default()
        };
        let access = resolve_access(&user, &catalog());
        assert_eq!(access.admin_sections.len(), ADMIN_SECTIONS.len());
    }

    #[test]
    fn admin_sections_absent_list_means_all_unrestricted_ones() {
        let user = UserRecord {
            role: Some("admin".to_string()),
            ..UserRecord::default()
        };
        let access = resolve_access(&user, &catalog());
        assert_eq!(access.admin_sections.len(), ADMIN_SECTIONS.len() - 1);
        assert!(access.admin_sections.iter().all(|s| !s.super_admin_only));
    }

    #[test]
    fn admin_sections_empty_list_means_none() {
        let user = UserRecord {
            role: Some("admin".to_string()),
            accessible_admin_sections: Some(vec![]),
            ..UserRecord::default()
        };
        let access = resolve_access(&user, &catalog());
        assert!(access.admin_sections.is_empty());
    }

    #[test]
    fn admin_sections_filtered_by_list() {
        let user = UserRecord {
            role: Some("admin".to_string()),
            accessible_admin_sections: Some(vec![
                "stations".to_string(),
                // Restricted sections stay hidden even when listed.
                "users".to_string(),
            ]),
            ..UserRecord::default()
        };
        let access = resolve_access(&user, &catalog());
        let ids: Vec<&str> = access.admin_sections.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["stations"]);
    }

    #[test]
    fn assembly_selection_repair_falls_back_to_first() {
        let allowed = vec![
            Assembly { id: "108.0", name: "North" },
            Assembly { id: "109.0", name: "South" },
        ];
        assert_eq!(
            repair_assembly_selection(Some("999.0"), &allowed),
            Some("108.0".to_string())
        );
        assert_eq!(
            repair_assembly_selection(Some("109"), &allowed),
            Some("109.0".to_string())
        );
        assert_eq!(
            repair_assembly_selection(None, &allowed),
            Some("108.0".to_string())
        );
        assert_eq!(repair_assembly_selection(Some("108.0"), &[]), None);
    }

    #[test]
    fn page_selection_repair() {
        let restricted = vec!["survey".to_string(), "candidates".to_string()];
        assert_eq!(
            repair_page_selection(Some("overview"), Some(&restricted)),
            Some("survey".to_string())
        );
        assert_eq!(
            repair_page_selection(Some("candidates"), Some(&restricted)),
            Some("candidates".to_string())
        );
        assert_eq!(
            repair_page_selection(Some("overview"), None),
            Some("overview".to_string())
        );
        let empty: Vec<String> = vec![];
        assert_eq!(repair_page_selection(Some("overview"), Some(&empty)), None);
    }

    #[test]
    fn built_in_catalog_resolves() {
        let user = client(Some(vec!["24"]), Some(vec!["overview"]));
        let access = resolve_access(&user, &ASSEMBLIES);
        assert_eq!(access.assemblies.len(), 1);
        assert_eq!(access.assemblies[0].name, "Nedungadu (SC)");
    }
}
