//! Router service
//!
//! Wraps the History API. Every change of location goes through
//! `RouterService::commit`: parse -> guard -> update history -> update signals.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use studyapp_shared::session::Session;

use super::route::{ActivePath, AppRoute, guard, resolve};

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// How a committed location is written to the history stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
    Push,
    Replace,
    /// The browser already shows the path (initial load, back/forward,
    /// session change).
    Keep,
}

/// Router service
///
/// Holds the current route and raw path as signals. The session signal is
/// injected so the router never depends on the auth module.
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    current_path: ReadSignal<String>,
    set_path: WriteSignal<String>,
    active_path: Memo<ActivePath>,
    session: Signal<Session>,
}

impl RouterService {
    /// # Arguments
    /// * `session` - current session, read on every guard decision
    fn new(session: Signal<Session>) -> Self {
        let path = current_path();
        let (current_route, set_route) = signal(AppRoute::from_path(&path));
        let (current_path, set_path) = signal(path);
        let active_path = Memo::new(move |_| resolve(&current_path.get(), &session.get()));

        Self {
            current_route,
            set_route,
            current_path,
            set_path,
            active_path,
            session,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// Section highlighted by the navigation shell.
    pub fn active_path(&self) -> Memo<ActivePath> {
        self.active_path
    }

    /// Navigates with a new history entry.
    pub fn navigate(&self, path: &str) {
        self.commit(path, HistoryMode::Push);
    }

    /// Navigates, replacing the current history entry.
    pub fn redirect(&self, path: &str) {
        self.commit(path, HistoryMode::Replace);
    }

    /// Runs the guard for `requested` and applies the outcome.
    fn commit(&self, requested: &str, mode: HistoryMode) {
        let decision = guard(
            AppRoute::from_path(requested),
            &self.session.get_untracked(),
        );

        // Guard redirects always replace the entry.
        let (path, mode) = if decision.is_redirect() {
            log_info!("[Router] {} redirected to {}", requested, decision.route());
            (decision.route().to_path(), HistoryMode::Replace)
        } else if mode == HistoryMode::Keep {
            (requested.to_string(), mode)
        } else {
            (decision.route().to_path(), mode)
        };

        match mode {
            HistoryMode::Push => push_history_state(&path),
            HistoryMode::Replace => replace_history_state(&path),
            HistoryMode::Keep => {}
        }

        // Re-selecting the current location must not remount the page.
        if self.current_path.get_untracked() != path {
            self.set_path.set(path);
        }
        let route = decision.route();
        if self.current_route.with_untracked(|current| current != route) {
            self.set_route.set(route.clone());
        }
    }

    /// Applies the guard to the location the browser shows right now.
    fn sync_with_location(&self) {
        self.commit(&current_path(), HistoryMode::Keep);
    }

    /// Back/forward buttons.
    fn init_popstate_listener(&self) {
        let router = *self;
        let closure = Closure::<dyn Fn()>::new(move || {
            router.sync_with_location();
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // Lives as long as the page.
        closure.forget();
    }

    /// Re-runs the guard whenever the session changes.
    fn setup_auth_redirect(&self) {
        let router = *self;
        let session = self.session;

        Effect::new(move |_| {
            let authenticated = session.with(Session::is_authenticated);
            log_debug!("[Router] session changed, authenticated={}", authenticated);
            router.sync_with_location();
        });
    }
}

fn provide_router(session: Signal<Session>) -> RouterService {
    let router = RouterService::new(session);

    router.sync_with_location();
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// Components
// ============================================================================

/// Provides [`RouterService`] to its children. Mount once near the root.
#[component]
pub fn Router(
    /// Session the guard checks
    session: Signal<Session>,
    children: Children,
) -> impl IntoView {
    provide_router(session);

    children()
}

/// Renders the view for the current route.
#[component]
pub fn RouterOutlet(
    /// Maps the current route to its page
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// Anchor that navigates through the router instead of reloading.
#[component]
pub fn Link(
    #[prop(into)] to: String,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
