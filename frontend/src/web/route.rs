//! Route model
//!
//! Pure routing logic with no DOM access:
//! - `AppRoute`: parsed URL path
//! - `resolve`: which section the shell highlights
//! - `guard`: whether a route renders or redirects for the current session

use std::fmt::Display;

use studyapp_shared::session::{Role, Session};

/// Target of `/app/course/<id>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseTarget {
    /// `/app/course/new`: the creation form.
    New,
    Existing(String),
}

/// Every path the client knows how to handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRoute {
    /// `/`
    Root,
    Login,
    /// `/app`, which only ever redirects.
    AppIndex,
    Home,
    Calendar,
    Contact,
    Profile,
    Admin,
    Course(CourseTarget),
    /// Anything else. Keeps the normalized path so the URL bar is left alone.
    NotFound { path: String },
}

/// Strips query, fragment and trailing slashes.
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

impl AppRoute {
    /// Parses a URL path. Total: unknown paths become `NotFound`.
    pub fn from_path(path: &str) -> Self {
        match normalize(path) {
            "/" => Self::Root,
            "/login" => Self::Login,
            "/app" => Self::AppIndex,
            "/app/home" => Self::Home,
            "/app/calendar" => Self::Calendar,
            "/app/contact" => Self::Contact,
            "/app/profile" => Self::Profile,
            "/app/admin" => Self::Admin,
            other => match other.strip_prefix("/app/course/") {
                Some("new") => Self::Course(CourseTarget::New),
                Some(id) if !id.is_empty() && !id.contains('/') => {
                    Self::Course(CourseTarget::Existing(id.to_string()))
                }
                _ => Self::NotFound {
                    path: other.to_string(),
                },
            },
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Self::Root => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::AppIndex => "/app".to_string(),
            Self::Home => "/app/home".to_string(),
            Self::Calendar => "/app/calendar".to_string(),
            Self::Contact => "/app/contact".to_string(),
            Self::Profile => "/app/profile".to_string(),
            Self::Admin => "/app/admin".to_string(),
            Self::Course(CourseTarget::New) => "/app/course/new".to_string(),
            Self::Course(CourseTarget::Existing(id)) => format!("/app/course/{}", id),
            Self::NotFound { path } => path.clone(),
        }
    }

    /// Default section after sign-in and for `/`, `/app`.
    pub fn landing(role: Role) -> Self {
        match role {
            Role::Admin => Self::Admin,
            Role::User => Self::Home,
        }
    }

    /// Section this route shows, if it is one.
    pub fn section(&self) -> Option<ActivePath> {
        match self {
            Self::Home => Some(ActivePath::Home),
            Self::Calendar => Some(ActivePath::Calendar),
            Self::Contact => Some(ActivePath::Contact),
            Self::Profile => Some(ActivePath::Profile),
            Self::Admin => Some(ActivePath::Admin),
            Self::Course(_) => Some(ActivePath::CourseDetail),
            _ => None,
        }
    }

    /// Unrecognized path under `/app/`.
    fn is_unknown_app_path(&self) -> bool {
        matches!(self, Self::NotFound { path } if path.starts_with("/app/"))
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

// =========================================================
// Active path
// =========================================================

/// Section the navigation shell treats as current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivePath {
    Login,
    Home,
    Calendar,
    Contact,
    Profile,
    Admin,
    CourseDetail,
    /// Unknown `/app/...` path: no navigation item is active.
    NotFound,
}

impl ActivePath {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Home => "home",
            Self::Calendar => "calendar",
            Self::Contact => "contact",
            Self::Profile => "profile",
            Self::Admin => "admin",
            Self::CourseDetail => "course-detail",
            Self::NotFound => "not-found",
        }
    }

    pub fn landing(role: Role) -> Self {
        match role {
            Role::Admin => Self::Admin,
            Role::User => Self::Home,
        }
    }
}

/// Maps the URL path and session to the active section.
///
/// Rules, first match wins:
/// 1. `/login` is `Login`.
/// 2. No session is `Login`.
/// 3. A known `/app/` section is that section; other `/app/<x>` is `NotFound`.
/// 4. Anything else is the role's landing section.
pub fn resolve(path: &str, session: &Session) -> ActivePath {
    let route = AppRoute::from_path(path);
    if route == AppRoute::Login {
        return ActivePath::Login;
    }

    let Some(role) = session.role() else {
        return ActivePath::Login;
    };

    if let Some(section) = route.section() {
        return section;
    }
    if route.is_unknown_app_path() {
        return ActivePath::NotFound;
    }
    ActivePath::landing(role)
}

// =========================================================
// Guard
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Unauthenticated,
    AuthenticatedAdmin,
    AuthenticatedUser,
}

impl GuardState {
    pub fn of(session: &Session) -> Self {
        match session.role() {
            None => Self::Unauthenticated,
            Some(Role::Admin) => Self::AuthenticatedAdmin,
            Some(Role::User) => Self::AuthenticatedUser,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Unauthenticated => None,
            Self::AuthenticatedAdmin => Some(Role::Admin),
            Self::AuthenticatedUser => Some(Role::User),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render(AppRoute),
    /// Navigate to this route instead, replacing the history entry.
    Redirect(AppRoute),
}

impl GuardDecision {
    pub fn route(&self) -> &AppRoute {
        match self {
            Self::Render(route) | Self::Redirect(route) => route,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }
}

/// Decides what happens when `route` is requested.
///
/// Anonymous users may only see the login page and unknown non-app paths.
/// Signed-in users are sent from `/login`, `/` and `/app` to their landing
/// section. Section access is not role-checked here: a user-role session
/// may open `/app/admin`, and the backend refuses its writes.
pub fn guard(route: AppRoute, session: &Session) -> GuardDecision {
    match GuardState::of(session).role() {
        None => match route {
            AppRoute::Login => GuardDecision::Render(route),
            AppRoute::NotFound { .. } if !route.is_unknown_app_path() => {
                GuardDecision::Render(route)
            }
            _ => GuardDecision::Redirect(AppRoute::Login),
        },
        Some(role) => match route {
            AppRoute::Login | AppRoute::Root | AppRoute::AppIndex => {
                GuardDecision::Redirect(AppRoute::landing(role))
            }
            _ => GuardDecision::Render(route),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATHS: [&str; 14] = [
        "/",
        "",
        "/login",
        "/app",
        "/app/",
        "/app/home",
        "/app/calendar",
        "/app/contact",
        "/app/profile",
        "/app/admin",
        "/app/course/42",
        "/app/course/new",
        "/app/nope",
        "/somewhere/else",
    ];

    fn admin() -> Session {
        Session::authenticated(Role::Admin, Some("abc".to_string()), None)
    }

    fn user() -> Session {
        Session::authenticated(Role::User, Some("tok".to_string()), Some("lan".to_string()))
    }

    #[test]
    fn test_from_path_normalizes() {
        assert_eq!(AppRoute::from_path("/app/home/"), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/app/home?tab=1"), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/login#x"), AppRoute::Login);
        assert_eq!(AppRoute::from_path(""), AppRoute::Root);
        assert_eq!(AppRoute::from_path("/app/"), AppRoute::AppIndex);
        assert_eq!(
            AppRoute::from_path("/app/course/new"),
            AppRoute::Course(CourseTarget::New)
        );
        assert_eq!(
            AppRoute::from_path("/app/course/65f0c1"),
            AppRoute::Course(CourseTarget::Existing("65f0c1".to_string()))
        );
        assert_eq!(
            AppRoute::from_path("/app/course/a/b"),
            AppRoute::NotFound {
                path: "/app/course/a/b".to_string()
            }
        );
    }

    #[test]
    fn test_to_path_round_trips_known_routes() {
        for path in ["/", "/login", "/app", "/app/admin", "/app/course/7", "/x/y"] {
            assert_eq!(AppRoute::from_path(path).to_path(), path);
        }
    }

    #[test]
    fn test_resolve_anonymous_is_always_login() {
        let anon = Session::anonymous();
        for path in PATHS {
            assert_eq!(resolve(path, &anon), ActivePath::Login, "{}", path);
        }
    }

    #[test]
    fn test_resolve_authenticated() {
        let user = user();
        assert_eq!(resolve("/login", &user), ActivePath::Login);
        assert_eq!(resolve("/app/calendar", &user), ActivePath::Calendar);
        assert_eq!(resolve("/app/course/9", &user), ActivePath::CourseDetail);
        assert_eq!(resolve("/app/nope", &user), ActivePath::NotFound);
        assert_eq!(resolve("/", &user), ActivePath::Home);
        assert_eq!(resolve("/app", &user), ActivePath::Home);
        assert_eq!(resolve("/elsewhere", &user), ActivePath::Home);
    }

    #[test]
    fn test_landing_follows_role() {
        assert_eq!(resolve("/", &admin()), ActivePath::Admin);
        assert_eq!(resolve("/", &user()), ActivePath::Home);
    }

    #[test]
    fn test_scenario_anonymous_home_redirects_to_login() {
        let decision = guard(AppRoute::from_path("/app/home"), &Session::anonymous());
        assert_eq!(decision, GuardDecision::Redirect(AppRoute::Login));
    }

    #[test]
    fn test_scenario_admin_app_index() {
        let session = admin();
        assert_eq!(resolve("/app", &session), ActivePath::Admin);
        assert_eq!(
            guard(AppRoute::AppIndex, &session),
            GuardDecision::Redirect(AppRoute::Admin)
        );
    }

    #[test]
    fn test_scenario_user_can_open_admin_section() {
        let decision = guard(AppRoute::from_path("/app/admin"), &user());
        assert_eq!(decision, GuardDecision::Render(AppRoute::Admin));
        assert_eq!(resolve("/app/admin", &user()), ActivePath::Admin);
    }

    #[test]
    fn test_guard_anonymous() {
        let anon = Session::anonymous();
        assert_eq!(guard(AppRoute::Login, &anon), GuardDecision::Render(AppRoute::Login));
        assert!(guard(AppRoute::Root, &anon).is_redirect());
        assert!(guard(AppRoute::from_path("/app/unknown"), &anon).is_redirect());
        assert!(guard(AppRoute::Course(CourseTarget::New), &anon).is_redirect());

        let stray = AppRoute::from_path("/favicon.png");
        assert_eq!(guard(stray.clone(), &anon), GuardDecision::Render(stray));
    }

    #[test]
    fn test_guard_authenticated() {
        let user = user();
        assert_eq!(
            guard(AppRoute::Login, &user),
            GuardDecision::Redirect(AppRoute::Home)
        );
        assert_eq!(
            guard(AppRoute::Root, &admin()),
            GuardDecision::Redirect(AppRoute::Admin)
        );

        let unknown = AppRoute::from_path("/app/unknown");
        assert_eq!(guard(unknown.clone(), &user), GuardDecision::Render(unknown));
        assert_eq!(
            guard(AppRoute::Profile, &user).route(),
            &AppRoute::Profile
        );
    }

    #[test]
    fn test_guard_state_of_session() {
        assert_eq!(GuardState::of(&Session::anonymous()), GuardState::Unauthenticated);
        assert_eq!(GuardState::of(&admin()), GuardState::AuthenticatedAdmin);
        assert_eq!(GuardState::of(&user()), GuardState::AuthenticatedUser);
    }
}
