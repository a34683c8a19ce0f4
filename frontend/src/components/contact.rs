use leptos::prelude::*;
use leptos::task::spawn_local;
use studyapp_shared::ContactMessage;

use crate::api::use_api;
use crate::components::toast::use_notifier;

#[component]
pub fn ContactPage() -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();

    let form = RwSignal::new(ContactMessage::default());
    let (submitted, set_submitted) = signal(false);
    let (sending, set_sending) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let message = form.get_untracked();
        if !message.is_complete() || sending.get_untracked() {
            return;
        }
        set_sending.set(true);

        let client = api.client();
        spawn_local(async move {
            match client.send_contact(&message).await {
                Ok(()) => {
                    set_submitted.try_set(true);
                }
                Err(e) => {
                    log_warn!("[Contact] sending message failed: {}", e);
                    notifier.error("Gửi liên hệ thất bại. Vui lòng thử lại sau.");
                }
            }
            set_sending.try_set(false);
        });
    };

    view! {
        <div class="max-w-3xl mx-auto space-y-8">
            <header class="text-center">
                <h1 class="text-3xl font-bold">"Giới thiệu và Thông tin Liên hệ"</h1>
                <p class="text-base-content/60">"Chúng tôi rất vui khi được kết nối với bạn!"</p>
            </header>

            <section class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h2 class="card-title">"Về Chúng Tôi"</h2>
                    <p class="leading-relaxed">
                        "Chào mừng bạn đến với StudyApp! Chúng tôi là một nền tảng học tập trực tuyến được thiết kế để giúp bạn quản lý lịch trình, theo dõi tiến độ và đạt được mục tiêu học tập của mình một cách hiệu quả."
                    </p>
                </div>
            </section>

            <section class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h2 class="card-title">"Gửi Ý Kiến Liên Hệ"</h2>
                    <Show
                        when=move || !submitted.get()
                        fallback=|| view! {
                            <div role="alert" class="alert alert-success">
                                "Cảm ơn bạn đã gửi ý kiến! Chúng tôi sẽ phản hồi sớm nhất có thể."
                            </div>
                        }
                    >
                        <form class="space-y-4" on:submit=on_submit>
                            <label class="form-control">
                                <span class="label-text">"Tên của bạn:"</span>
                                <input
                                    class="input input-bordered"
                                    required
                                    placeholder="Ví dụ: Nguyễn Văn A"
                                    prop:value=move || form.with(|f| f.name.clone())
                                    on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                                />
                            </label>
                            <label class="form-control">
                                <span class="label-text">"Địa chỉ Email:"</span>
                                <input
                                    type="email"
                                    class="input input-bordered"
                                    required
                                    placeholder="Ví dụ: email@example.com"
                                    prop:value=move || form.with(|f| f.email.clone())
                                    on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                                />
                            </label>
                            <label class="form-control">
                                <span class="label-text">"Nội dung ý kiến:"</span>
                                <textarea
                                    class="textarea textarea-bordered min-h-32"
                                    required
                                    placeholder="Hãy cho chúng tôi biết suy nghĩ của bạn..."
                                    prop:value=move || form.with(|f| f.message.clone())
                                    on:input=move |ev| form.update(|f| f.message = event_target_value(&ev))
                                ></textarea>
                            </label>
                            <button
                                type="submit"
                                class="btn btn-primary w-full"
                                disabled=move || sending.get() || !form.with(ContactMessage::is_complete)
                            >
                                "Gửi Liên Hệ"
                            </button>
                        </form>
                    </Show>
                </div>
            </section>
        </div>
    }
}
