use leptos::prelude::*;

use crate::web::router::Link;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="hero min-h-[60vh]">
            <div class="hero-content text-center">
                <div class="max-w-md">
                    <h1 class="text-7xl font-bold text-primary">"404"</h1>
                    <p class="py-6 text-lg">"Không tìm thấy trang bạn yêu cầu."</p>
                    <Link to="/" class="btn btn-primary">"Về trang chủ"</Link>
                </div>
            </div>
        </div>
    }
}
