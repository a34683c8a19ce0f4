use leptos::prelude::*;
use leptos::task::spawn_local;
use studyapp_shared::{FALLBACK_USERNAME, Preferences};

use crate::api::use_api;
use crate::auth::use_auth;

#[derive(Debug, Clone, PartialEq)]
enum PrefsState {
    Loading,
    Loaded(Preferences),
    Unavailable,
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let session = auth.session_signal();

    let prefs = RwSignal::new(PrefsState::Loading);
    // (message, is_error)
    let save_status = RwSignal::new(None::<(&'static str, bool)>);

    Effect::new(move |_| {
        let client = api.client();
        spawn_local(async move {
            let state = match client.preferences().await {
                Ok(loaded) => PrefsState::Loaded(loaded),
                Err(e) => {
                    log_warn!("[Profile] loading preferences failed: {}", e);
                    PrefsState::Unavailable
                }
            };
            prefs.try_set(state);
        });
    });

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let PrefsState::Loaded(current) = prefs.get_untracked() else {
            return;
        };
        save_status.set(None);

        let client = api.client();
        spawn_local(async move {
            let status = match client.save_preferences(&current).await {
                Ok(()) => ("Lưu thành công!", false),
                Err(e) => {
                    log_warn!("[Profile] saving preferences failed: {}", e);
                    ("Lưu thất bại.", true)
                }
            };
            save_status.try_set(Some(status));
        });
    };

    let field = move |read: fn(&Preferences) -> Option<String>| {
        move || match &*prefs.read() {
            PrefsState::Loaded(p) => read(p).unwrap_or_default(),
            _ => String::new(),
        }
    };
    let edit = move |write: fn(&mut Preferences, Option<String>), value: String| {
        prefs.update(|state| {
            if let PrefsState::Loaded(p) = state {
                write(p, Some(value).filter(|v| !v.is_empty()));
            }
        });
    };

    let username = move || {
        session.with(|s| s.username().unwrap_or(FALLBACK_USERNAME).to_string())
    };

    view! {
        <div class="max-w-xl mx-auto space-y-6">
            <header>
                <h1 class="text-3xl font-bold">"Hồ sơ"</h1>
                <p class="text-base-content/60">"Quản lý thông tin cá nhân và cài đặt"</p>
            </header>

            <div class="text-xl font-semibold text-primary">"Tên đăng nhập: " {username}</div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"Cài đặt cá nhân"</h3>
                    {move || match prefs.get() {
                        PrefsState::Loading => view! { <p>"Đang tải cài đặt..."</p> }.into_any(),
                        PrefsState::Unavailable => view! {
                            <p class="text-error">"Không thể tải cài đặt người dùng."</p>
                        }.into_any(),
                        PrefsState::Loaded(_) => view! {
                            <form class="space-y-4" on:submit=on_save>
                                <label class="form-control">
                                    <span class="label-text">"Tên hiển thị"</span>
                                    <input
                                        class="input input-bordered"
                                        prop:value=field(|p| p.display_name.clone())
                                        on:input=move |ev| edit(|p, v| p.display_name = v, event_target_value(&ev))
                                    />
                                </label>
                                <label class="form-control">
                                    <span class="label-text">"Email thông báo"</span>
                                    <input
                                        type="email"
                                        class="input input-bordered"
                                        prop:value=field(|p| p.notification_email.clone())
                                        on:input=move |ev| edit(|p, v| p.notification_email = v, event_target_value(&ev))
                                    />
                                </label>
                                <button type="submit" class="btn btn-primary">"Lưu thay đổi"</button>
                                {move || save_status.get().map(|(msg, is_error)| view! {
                                    <p class=if is_error { "text-error" } else { "text-success" }>{msg}</p>
                                })}
                            </form>
                        }.into_any(),
                    }}
                </div>
            </div>
        </div>
    }
}
