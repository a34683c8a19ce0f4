//! StudyApp web client
//!
//! Context-driven layout:
//! - `web::route`: route model, path resolution and the route guard
//! - `web::router`: History API router service
//! - `auth`: session ownership and sign-in
//! - `nav`: navigation items and sidebar state
//! - `components`: pages and the navigation shell

#[macro_use]
mod logging;

mod api;
mod auth;
mod config;
mod nav;
pub mod panic_hook;
pub(crate) mod web;

mod components {
    pub mod admin;
    pub mod calendar;
    pub mod contact;
    pub mod course_detail;
    pub mod home;
    pub mod login;
    pub mod not_found;
    pub mod profile;
    pub mod shell;
    pub mod toast;
}

use leptos::prelude::*;
use leptos::task::spawn_local;
use studyapp_shared::session::Session;

use crate::api::ApiContext;
use crate::auth::AuthContext;
use crate::components::admin::AdminPage;
use crate::components::calendar::CalendarPage;
use crate::components::contact::ContactPage;
use crate::components::course_detail::CourseDetailPage;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::not_found::NotFoundPage;
use crate::components::profile::ProfilePage;
use crate::components::shell::{NavigationShell, SidebarContext};
use crate::components::toast::{Notifier, ToastHost};
use crate::config::AppConfig;
use crate::nav::SidebarState;
use crate::web::route::AppRoute;
use crate::web::router::{Router, RouterOutlet};

/// Maps a route to its page.
///
/// `Root`, `AppIndex` and `Login` share the login page; the guard never lets
/// an authenticated session render the first two.
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Root | AppRoute::AppIndex | AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Calendar => view! { <CalendarPage /> }.into_any(),
        AppRoute::Contact => view! { <ContactPage /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::Admin => view! { <AdminPage /> }.into_any(),
        AppRoute::Course(target) => view! { <CourseDetailPage target=target /> }.into_any(),
        AppRoute::NotFound { .. } => view! { <NotFoundPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. Configuration and session
    let config = AppConfig::from_env();
    provide_context(config);

    let auth = AuthContext::new();
    provide_context(auth);

    // 2. Services built on top of them
    let api = ApiContext::new(config, auth);
    provide_context(api);
    provide_context(Notifier::new(config.notification_timeout_ms));

    let sidebar = RwSignal::new(SidebarState::default());
    provide_context(SidebarContext(sidebar));

    // 3. The session signal drives the guard and the shell
    let session = auth.session_signal();

    // The sidebar never stays open across a session end.
    Effect::new(move |_| {
        if !session.with(Session::is_authenticated) && sidebar.with_untracked(SidebarState::is_open) {
            sidebar.update(SidebarState::close);
        }
    });

    // One view per app load; failures are not user-visible.
    spawn_local(async move {
        if let Err(e) = api.client().increment_site_view().await {
            log_debug!("[App] site view not counted: {}", e);
        }
    });

    view! {
        <Router session=session>
            <ToastHost />
            <Show when=move || session.with(Session::is_authenticated)>
                <NavigationShell />
            </Show>
            <main class="min-h-screen bg-base-200 p-4 pt-16 md:p-8 md:pt-20">
                <RouterOutlet matcher=route_matcher />
            </main>
        </Router>
    }
}
