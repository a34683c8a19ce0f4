mod login_form;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::auth::{SignInResult, sign_in, use_auth};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use login_form::{LoginForm, MSG_REGISTER_FAILED, MSG_SIGN_IN_FAILED};

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let api = use_api();

    let form = RwSignal::new(LoginForm::default());
    let is_register = move || form.with(LoginForm::is_register);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(Ok(creds)) = form.try_update(LoginForm::begin_submit) else {
            return;
        };
        let register = form.with_untracked(LoginForm::is_register);
        let client = api.client();

        spawn_local(async move {
            if register {
                match client.sign_up(&creds.username, &creds.password).await {
                    Ok(()) => {
                        log_info!("[Login] registered {}", creds.username);
                        form.try_update(LoginForm::registered);
                    }
                    Err(e) => {
                        log_warn!("[Login] registration failed: {}", e);
                        form.try_update(|f| f.failed(e.server_message(), MSG_REGISTER_FAILED));
                    }
                }
                return;
            }

            match sign_in(auth, &client, &creds.username, &creds.password).await {
                Ok(SignInResult::Applied(role)) => {
                    router.navigate(&AppRoute::landing(role).to_path());
                }
                Ok(SignInResult::Discarded) => {
                    form.try_update(|f| f.submitting = false);
                }
                Err(e) => {
                    log_warn!("[Login] sign-in failed: {}", e);
                    form.try_update(|f| f.failed(e.server_message(), MSG_SIGN_IN_FAILED));
                }
            }
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-3xl">"📘"</div>
                        <h1 class="text-3xl font-bold">"StudyApp"</h1>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <h2 class="card-title justify-center">
                            {move || if is_register() { "Đăng ký tài khoản" } else { "Đăng nhập" }}
                        </h2>

                        {move || form.with(|f| f.error.clone()).map(|msg| view! {
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{msg}</span>
                            </div>
                        })}
                        {move || form.with(|f| f.notice.clone()).map(|msg| view! {
                            <div role="status" class="alert alert-success text-sm py-2">
                                <span>{msg}</span>
                            </div>
                        })}

                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"Tên đăng nhập"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                placeholder="Nhập tên đăng nhập"
                                class="input input-bordered"
                                prop:value=move || form.with(|f| f.username.clone())
                                on:input=move |ev| form.update(|f| f.username = event_target_value(&ev))
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Mật khẩu"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="Nhập mật khẩu"
                                class="input input-bordered"
                                prop:value=move || form.with(|f| f.password.clone())
                                on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                            />
                        </div>
                        <Show when=is_register>
                            <div class="form-control">
                                <label class="label" for="confirm-password">
                                    <span class="label-text">"Xác nhận mật khẩu"</span>
                                </label>
                                <input
                                    id="confirm-password"
                                    type="password"
                                    placeholder="Nhập lại mật khẩu"
                                    class="input input-bordered"
                                    prop:value=move || form.with(|f| f.confirm_password.clone())
                                    on:input=move |ev| {
                                        form.update(|f| f.confirm_password = event_target_value(&ev))
                                    }
                                />
                            </div>
                        </Show>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || form.with(|f| f.submitting)>
                                {move || match (form.with(|f| f.submitting), is_register()) {
                                    (true, _) => view! { <span class="loading loading-spinner"></span> "Đang xử lý..." }.into_any(),
                                    (false, true) => "Đăng ký".into_any(),
                                    (false, false) => "Đăng nhập".into_any(),
                                }}
                            </button>
                        </div>

                        <p class="text-center text-sm mt-2">
                            {move || if is_register() { "Đã có tài khoản? " } else { "Chưa có tài khoản? " }}
                            <a class="link link-primary" on:click=move |_| form.update(LoginForm::toggle_mode)>
                                {move || if is_register() { "Đăng nhập" } else { "Đăng ký ngay" }}
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
