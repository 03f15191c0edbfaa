// An authenticated session as an explicit value.
//
// The session owns the user document, its resolved access and the current
// assembly/page selection. It is created on sign-in, passed to whoever needs
// it and torn down on sign-out; nothing here is ambient or global. Every
// selection change funnels through the repair rules, so a stale selection
// can never survive a role or allow-list change.

use log::{debug, info};

use crate::access::{
    repair_assembly_selection, repair_page_selection, resolve_access, AccessResolution,
    AccessScope, UserRecord,
};
use crate::catalog::{Assembly, ASSEMBLIES, DASHBOARD_PAGES};

/// What an authenticated session should render.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ViewState {
    /// Admin roles land on the admin surface.
    AdminView,
    /// A client with no visible assembly: contact-the-administrator notice.
    NoAssemblyAccess,
    /// A client with assemblies but an empty page allow-list.
    NoPageAccess,
    /// A client with at least one assembly and one page.
    Normal,
}

#[derive(PartialEq, Debug, Clone)]
pub struct Session {
    user: UserRecord,
    catalog: Vec<Assembly>,
    access: AccessResolution,
    selected_assembly: Option<String>,
    current_page: Option<String>,
}

impl Session {
    /// Opens a session against the built-in assembly catalog.
    pub fn sign_in(user: UserRecord) -> Session {
        Session::sign_in_with_catalog(user, &ASSEMBLIES)
    }

    /// Opens a session against an explicit catalog. Access is resolved once
    /// and both selections start repaired: the first visible assembly and
    /// the first allowed page.
    pub fn sign_in_with_catalog(user: UserRecord, catalog: &[Assembly]) -> Session {
        let access = resolve_access(&user, catalog);
        let selected_assembly = repair_assembly_selection(None, &access.assemblies);
        let default_page = DASHBOARD_PAGES.first().map(|p| p.id);
        let current_page = repair_page_selection(default_page, access.pages.as_deref());
        info!(
            "session: signed in with role {:?}, {} visible assemblies",
            access.role,
            access.assemblies.len()
        );
        Session {
            user,
            catalog: catalog.to_vec(),
            access,
            selected_assembly,
            current_page,
        }
    }

    pub fn user(&self) -> &UserRecord {
        &self.user
    }

    pub fn access(&self) -> &AccessResolution {
        &self.access
    }

    pub fn selected_assembly(&self) -> Option<&str> {
        self.selected_assembly.as_deref()
    }

    pub fn current_page(&self) -> Option<&str> {
        self.current_page.as_deref()
    }

    /// Requests an assembly. A request outside the visible list lands on the
    /// first visible assembly instead.
    pub fn select_assembly(&mut self, id: &str) {
        self.selected_assembly = repair_assembly_selection(Some(id), &self.access.assemblies);
        debug!("session: assembly selection now {:?}", self.selected_assembly);
    }

    /// Requests a page, under the same repair discipline.
    pub fn select_page(&mut self, id: &str) {
        self.current_page = repair_page_selection(Some(id), self.access.pages.as_deref());
        debug!("session: page selection now {:?}", self.current_page);
    }

    /// Replaces the user document (role or allow-lists changed) and
    /// re-resolves access. Both selections are repaired against the new
    /// lists; a selection that is no longer visible moves to the first
    /// visible entry or clears.
    pub fn refresh_user(&mut self, user: UserRecord) {
        self.access = resolve_access(&user, &self.catalog);
        self.user = user;
        self.selected_assembly =
            repair_assembly_selection(self.selected_assembly.as_deref(), &self.access.assemblies);
        self.current_page =
            repair_page_selection(self.current_page.as_deref(), self.access.pages.as_deref());
        info!(
            "session: refreshed user, role {:?}, selection {:?}/{:?}",
            self.access.role, self.selected_assembly, self.current_page
        );
    }

    pub fn view(&self) -> ViewState {
        if self.access.role.is_admin() {
            return ViewState::AdminView;
        }
        match self.access.assembly_scope() {
            AccessScope::Denied => ViewState::NoAssemblyAccess,
            _ => match self.access.page_scope() {
                AccessScope::Denied => ViewState::NoPageAccess,
                _ => ViewState::Normal,
            },
        }
    }

    /// Tears the session down. Dropping the value has the same effect; the
    /// explicit form marks sign-out call sites.
    pub fn sign_out(self) {
        info!("session: signed out");
    }
}
