use chrono::{Local, Timelike};
use leptos::prelude::*;
use leptos::task::spawn_local;
use studyapp_shared::date::format_vi;
use studyapp_shared::session::Session;
use studyapp_shared::{Course, FALLBACK_USERNAME, TodayEvent, event_icon};

use crate::api::use_api;
use crate::auth::use_auth;
use crate::web::router::{Link, use_router};

/// Greeting for the local hour (0..=23).
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Chào buổi sáng",
        12..=17 => "Chào buổi chiều",
        _ => "Chào buổi tối",
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();
    let session = auth.session_signal();

    let (courses, set_courses) = signal(Vec::<Course>::new());
    let (events, set_events) = signal(Vec::<TodayEvent>::new());
    let (loading, set_loading) = signal(true);

    // Failures leave the lists empty.
    Effect::new(move |_| {
        let client = api.client();
        spawn_local(async move {
            let (course_list, today) = futures::join!(client.list_courses(), client.today_schedule());
            let course_list = course_list.unwrap_or_else(|e| {
                log_warn!("[Home] loading courses failed: {}", e);
                Vec::new()
            });
            let today = today.unwrap_or_else(|e| {
                log_warn!("[Home] loading today's schedule failed: {}", e);
                Vec::new()
            });
            set_courses.try_set(course_list);
            set_events.try_set(today);
            set_loading.try_set(false);
        });
    });

    let username = move || {
        session.with(|s| s.username().unwrap_or(FALLBACK_USERNAME).to_string())
    };
    let is_admin = move || session.with(Session::is_admin);
    let now = Local::now();

    view! {
        <div class="space-y-8">
            <header class="hero bg-primary text-primary-content rounded-box p-8">
                <div class="hero-content flex-col items-start w-full">
                    <h1 class="text-3xl font-bold">
                        {greeting(now.hour())} ", " {username} "!"
                    </h1>
                    <p class="opacity-80">"Hôm nay bạn muốn học gì?"</p>
                </div>
            </header>

            <section class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <div class="flex items-center justify-between">
                        <h3 class="card-title">"Lịch hôm nay - " {format_vi(now.date_naive())}</h3>
                        <span class="badge badge-primary">
                            {move || events.with(Vec::len)} " sự kiện"
                        </span>
                    </div>
                    <Show
                        when=move || !events.with(Vec::is_empty)
                        fallback=|| view! {
                            <p class="text-base-content/60">"Không có sự kiện nào cho hôm nay."</p>
                        }
                    >
                        <ul class="space-y-2">
                            <For each=move || events.get() key=|event| event.id.to_string() let:event>
                                <li class="flex items-center gap-3 p-3 rounded-lg bg-base-200">
                                    <span
                                        class="text-2xl w-10 h-10 flex items-center justify-center rounded-lg"
                                        style=format!("background-color: {}", event.color)
                                    >
                                        {event_icon(&event.title)}
                                    </span>
                                    <div class="flex-1">
                                        <p class="font-semibold">{event.title.clone()}</p>
                                        <p class="text-sm text-base-content/60">{event.time.clone()}</p>
                                    </div>
                                    <span class="badge badge-ghost">{event.status.clone()}</span>
                                </li>
                            </For>
                        </ul>
                    </Show>
                </div>
            </section>

            <section class="space-y-4">
                <div class="flex items-center justify-between">
                    <h2 class="text-2xl font-bold">"Khóa học của bạn"</h2>
                    <Show when=is_admin>
                        <button class="btn btn-primary" on:click=move |_| router.navigate("/app/course/new")>
                            "+ Thêm khóa học mới"
                        </button>
                    </Show>
                </div>

                <Show
                    when=move || !courses.with(Vec::is_empty)
                    fallback=move || view! {
                        <p class="text-base-content/60 text-center py-8">
                            {move || if loading.get() {
                                "Đang tải..."
                            } else {
                                "Bạn chưa có khóa học nào. Hãy bắt đầu bằng cách thêm một khóa học mới!"
                            }}
                        </p>
                    }
                >
                    <div class="grid gap-4 md:grid-cols-2 lg:grid-cols-3">
                        <For each=move || courses.get() key=|course| course.id.clone() let:course>
                            <CourseCard course=course />
                        </For>
                    </div>
                </Show>
            </section>
        </div>
    }
}

#[component]
fn CourseCard(course: Course) -> impl IntoView {
    let href = format!("/app/course/{}", course.id);
    let progress = course.progress;

    view! {
        <div class="card bg-base-100 shadow-md border-t-4" style=format!("border-color: {}", course.color)>
            <div class="card-body">
                <div class="flex items-center gap-3">
                    <span class="text-3xl">{course.icon.clone()}</span>
                    <h3 class="card-title">{course.title.clone()}</h3>
                </div>
                <p class="text-sm text-base-content/70 line-clamp-2">{course.description.clone()}</p>
                <div class="flex justify-between text-xs text-base-content/60">
                    <span>{course.estimated_duration_label()}</span>
                    <span>{format!("{}%", progress)}</span>
                </div>
                <progress class="progress progress-primary w-full" value=progress.to_string() max="100"></progress>
                <div class="card-actions justify-end">
                    <Link to=href class="btn btn-sm btn-primary">"BẮT ĐẦU HỌC"</Link>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_boundaries() {
        assert_eq!(greeting(0), "Chào buổi sáng");
        assert_eq!(greeting(11), "Chào buổi sáng");
        assert_eq!(greeting(12), "Chào buổi chiều");
        assert_eq!(greeting(17), "Chào buổi chiều");
        assert_eq!(greeting(18), "Chào buổi tối");
        assert_eq!(greeting(23), "Chào buổi tối");
    }
}
