//! Navigation shell state
//!
//! Item sets per role, the sidebar's open flag and the ordered effects of
//! the shell's two user actions. No DOM here; `components::shell` applies
//! the effects.

use studyapp_shared::session::Role;

use crate::web::route::ActivePath;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub target: ActivePath,
    pub path: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

const HOME: NavItem = NavItem {
    target: ActivePath::Home,
    path: "/app/home",
    label: "Trang chủ",
    icon: "🏠",
};

const CALENDAR: NavItem = NavItem {
    target: ActivePath::Calendar,
    path: "/app/calendar",
    label: "Lịch học",
    icon: "📅",
};

const CONTACT: NavItem = NavItem {
    target: ActivePath::Contact,
    path: "/app/contact",
    label: "Liên hệ",
    icon: "📞",
};

const PROFILE: NavItem = NavItem {
    target: ActivePath::Profile,
    path: "/app/profile",
    label: "Hồ sơ",
    icon: "👤",
};

const ADMIN: NavItem = NavItem {
    target: ActivePath::Admin,
    path: "/app/admin",
    label: "Quản trị",
    icon: "⚙️",
};

pub const USER_NAV: [NavItem; 4] = [HOME, CALENDAR, CONTACT, PROFILE];
pub const ADMIN_NAV: [NavItem; 3] = [ADMIN, HOME, PROFILE];

/// Items for the role; nothing without a session.
pub fn nav_items(role: Option<Role>) -> &'static [NavItem] {
    match role {
        Some(Role::Admin) => &ADMIN_NAV,
        Some(Role::User) => &USER_NAV,
        None => &[],
    }
}

/// The item highlighted for `active`, if any. Never more than one.
pub fn active_item(items: &[NavItem], active: ActivePath) -> Option<&NavItem> {
    items.iter().find(|item| item.target == active)
}

// =========================================================
// Sidebar
// =========================================================

/// Off-canvas sidebar; starts closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SidebarState {
    is_open: bool,
}

impl SidebarState {
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }
}

// =========================================================
// Shell actions
// =========================================================

/// One step of a shell action. Steps run in the order returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEffect {
    EndSession,
    CloseSidebar,
    Navigate(String),
}

/// Clicking an item. Closes the sidebar even when the item is already active.
pub fn select_item(path: &str) -> Vec<ShellEffect> {
    vec![
        ShellEffect::Navigate(path.to_string()),
        ShellEffect::CloseSidebar,
    ]
}

pub fn logout_action() -> Vec<ShellEffect> {
    vec![
        ShellEffect::EndSession,
        ShellEffect::CloseSidebar,
        ShellEffect::Navigate("/login".to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::route::resolve;
    use studyapp_shared::session::SessionStore;
    use studyapp_shared::session::testing::MemoryStore;

    /// Minimal shell: session store, sidebar and URL path.
    struct Shell {
        store: SessionStore<MemoryStore>,
        sidebar: SidebarState,
        path: String,
    }

    impl Shell {
        fn signed_in(role: Role, path: &str) -> Self {
            let mut store = SessionStore::restore(MemoryStore::default());
            store.login(role, Some("tok".to_string()), Some("lan".to_string()));
            Self {
                store,
                sidebar: SidebarState::default(),
                path: path.to_string(),
            }
        }

        fn apply(&mut self, effects: Vec<ShellEffect>) {
            for effect in effects {
                match effect {
                    ShellEffect::EndSession => {
                        self.store.logout();
                    }
                    ShellEffect::CloseSidebar => self.sidebar.close(),
                    ShellEffect::Navigate(path) => self.path = path,
                }
            }
        }

        fn active(&self) -> ActivePath {
            resolve(&self.path, self.store.session())
        }
    }

    #[test]
    fn test_items_follow_role() {
        assert_eq!(nav_items(Some(Role::User)).len(), 4);
        assert_eq!(nav_items(Some(Role::Admin))[0].target, ActivePath::Admin);
        assert!(nav_items(None).is_empty());
    }

    #[test]
    fn test_at_most_one_item_active() {
        for items in [&USER_NAV[..], &ADMIN_NAV[..]] {
            for active in [ActivePath::Home, ActivePath::Calendar, ActivePath::Admin] {
                let hits = items.iter().filter(|i| i.target == active).count();
                assert!(hits <= 1);
            }
            assert_eq!(active_item(items, ActivePath::NotFound), None);
            assert_eq!(active_item(items, ActivePath::CourseDetail), None);
        }
        assert_eq!(
            active_item(&USER_NAV, ActivePath::Contact).map(|i| i.path),
            Some("/app/contact")
        );
    }

    #[test]
    fn test_sidebar_transitions() {
        let mut sidebar = SidebarState::default();
        assert!(!sidebar.is_open());
        sidebar.toggle();
        assert!(sidebar.is_open());
        sidebar.toggle();
        assert!(!sidebar.is_open());

        sidebar.close();
        assert_eq!(sidebar, SidebarState::default());
        sidebar.open();
        sidebar.open();
        assert!(sidebar.is_open());
    }

    #[test]
    fn test_select_already_active_item_closes_sidebar() {
        let mut shell = Shell::signed_in(Role::User, "/app/calendar");
        shell.sidebar.open();

        shell.apply(select_item("/app/calendar"));

        assert!(!shell.sidebar.is_open());
        assert_eq!(shell.active(), ActivePath::Calendar);
    }

    #[test]
    fn test_select_item_moves_active_path() {
        let mut shell = Shell::signed_in(Role::Admin, "/app/admin");
        shell.apply(select_item(HOME.path));
        assert_eq!(shell.active(), ActivePath::Home);
    }

    #[test]
    fn test_logout_closes_sidebar_and_lands_on_login() {
        for open in [true, false] {
            let mut shell = Shell::signed_in(Role::User, "/app/profile");
            if open {
                shell.sidebar.open();
            }

            shell.apply(logout_action());

            assert!(!shell.sidebar.is_open());
            assert_eq!(shell.path, "/login");
            let session = shell.store.session();
            assert!(!session.is_authenticated());
            assert_eq!(session.token(), None);
            assert_eq!(session.username(), Some("lan"));
            assert_eq!(shell.active(), ActivePath::Login);
        }
    }

    #[test]
    fn test_logout_order() {
        assert_eq!(logout_action()[0], ShellEffect::EndSession);
        assert_eq!(logout_action()[1], ShellEffect::CloseSidebar);
        assert_eq!(select_item("/x")[1], ShellEffect::CloseSidebar);
    }
}
