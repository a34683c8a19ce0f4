use leptos::prelude::*;
use studyapp_shared::FALLBACK_USERNAME;
use studyapp_shared::session::Session;

use crate::auth::use_auth;
use crate::nav::{ShellEffect, SidebarState, active_item, logout_action, nav_items, select_item};
use crate::web::router::use_router;

/// Sidebar open flag, shared with `App` so it can force-close on logout.
#[derive(Clone, Copy)]
pub struct SidebarContext(pub RwSignal<SidebarState>);

pub fn use_sidebar() -> RwSignal<SidebarState> {
    use_context::<SidebarContext>()
        .expect("SidebarContext should be provided")
        .0
}

/// Hamburger button, overlay and off-canvas sidebar. Only mounted while
/// signed in.
#[component]
pub fn NavigationShell() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let sidebar = use_sidebar();
    let session = auth.session_signal();

    let run = move |effects: Vec<ShellEffect>| {
        for effect in effects {
            match effect {
                ShellEffect::EndSession => auth.logout(),
                ShellEffect::CloseSidebar => sidebar.update(SidebarState::close),
                ShellEffect::Navigate(path) => router.navigate(&path),
            }
        }
    };

    let is_open = move || sidebar.with(SidebarState::is_open);
    let items = move || nav_items(session.with(Session::role)).to_vec();
    let display_name = move || {
        session.with(|s| s.username().unwrap_or(FALLBACK_USERNAME).to_string())
    };

    view! {
        <button
            class="btn btn-square btn-ghost bg-base-100/90 shadow fixed top-4 left-4 z-50"
            aria-label=move || if is_open() { "Đóng menu" } else { "Mở menu" }
            aria-expanded=move || is_open().to_string()
            on:click=move |_| sidebar.update(SidebarState::toggle)
        >
            {move || if is_open() { "✕" } else { "☰" }}
        </button>

        <Show when=is_open>
            <div
                class="fixed inset-0 bg-black/40 z-30"
                on:click=move |_| sidebar.update(SidebarState::close)
            ></div>
        </Show>

        <aside
            aria-hidden=move || (!is_open()).to_string()
            data-section=move || router.active_path().get().as_str()
            class=move || {
                let base = "fixed top-0 left-0 h-screen w-64 bg-base-100 shadow-xl z-40 pt-16 flex flex-col transition-transform duration-300";
                if is_open() { format!("{} translate-x-0", base) } else { format!("{} -translate-x-full", base) }
            }
        >
            <div class="px-6 pb-4 border-b border-base-200">
                <p class="text-sm text-base-content/60">"Xin chào,"</p>
                <p class="font-semibold">{display_name}</p>
            </div>
            <ul class="menu flex-1 w-full">
                <For each=items key=|item| item.path let:item>
                    <li>
                        <a
                            class=move || {
                                let items = nav_items(session.with(Session::role));
                                let active = active_item(items, router.active_path().get());
                                if active.is_some_and(|a| a.path == item.path) { "active" } else { "" }
                            }
                            on:click=move |_| run(select_item(item.path))
                        >
                            <span class="text-xl">{item.icon}</span>
                            {item.label}
                        </a>
                    </li>
                </For>
            </ul>
            <div class="p-4 border-t border-base-200">
                <button class="btn btn-outline btn-error w-full gap-2" on:click=move |_| run(logout_action())>
                    "🚪 Đăng xuất"
                </button>
            </div>
        </aside>
    }
}
