mod course_editor;

use leptos::prelude::*;
use leptos::task::spawn_local;
use studyapp_shared::session::Session;
use studyapp_shared::{CourseComment, FALLBACK_USERNAME};

use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::toast::use_notifier;
use crate::web::confirm;
use crate::web::route::CourseTarget;
use crate::web::router::use_router;
use course_editor::{CancelOutcome, CourseEditor};

const HOME_PATH: &str = "/app/home";

/// Course view/editor with its comment thread.
///
/// `/app/course/new` opens the editor empty. Mutations are admin-only in
/// the UI; the backend enforces the same rule.
#[component]
pub fn CourseDetailPage(target: CourseTarget) -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();
    let notifier = use_notifier();
    let session = auth.session_signal();

    let editor = RwSignal::new(None::<CourseEditor>);
    let comments = RwSignal::new(Vec::<CourseComment>::new());
    let new_comment = RwSignal::new(String::new());

    match target {
        CourseTarget::New => editor.set(Some(CourseEditor::for_new())),
        CourseTarget::Existing(id) => {
            let client = api.client();
            spawn_local(async move {
                match client.course_with_comments(&id).await {
                    Ok((course, list)) => {
                        editor.try_set(Some(CourseEditor::for_course(course)));
                        comments.try_set(list);
                    }
                    Err(e) => {
                        log_warn!("[Course] loading {} failed: {}", id, e);
                        // Only redirect if the page is still mounted.
                        if editor.try_get_untracked().is_some() {
                            notifier.error(format!(
                                "Không tìm thấy khóa học với ID: {}. Đang điều hướng về trang chủ.",
                                id
                            ));
                            router.navigate(HOME_PATH);
                        }
                    }
                }
            });
        }
    }

    let is_admin = move || session.with(Session::is_admin);
    let is_admin_now = move || session.with_untracked(Session::is_admin);
    let is_loaded = move || editor.with(Option::is_some);
    let is_new = move || editor.with(|e| e.as_ref().is_some_and(CourseEditor::is_new));
    let is_editing = move || editor.with(|e| e.as_ref().is_some_and(CourseEditor::is_editing));
    let can_save = move || editor.with(|e| e.as_ref().is_some_and(CourseEditor::can_save));
    let course_id = move || {
        editor.with_untracked(|e| e.as_ref().and_then(|e| e.course()).map(|c| c.id.clone()))
    };

    // --- Editor actions ---

    let on_toggle_edit = move |_| {
        let creating = editor.with_untracked(|e| e.as_ref().is_some_and(CourseEditor::is_new));
        if !is_admin_now() && !creating {
            notifier.error("Bạn không có quyền chỉnh sửa.");
            return;
        }

        let outcome = editor
            .try_update(|e| {
                e.as_mut().and_then(|e| {
                    if e.is_editing() {
                        Some(e.cancel())
                    } else {
                        e.begin_edit();
                        None
                    }
                })
            })
            .flatten();
        if outcome == Some(CancelOutcome::LeaveToHome) {
            router.navigate(HOME_PATH);
        }
    };

    let on_save = move |_| {
        if !is_admin_now() {
            notifier.error("Bạn không có quyền lưu thay đổi.");
            return;
        }
        let Some((draft, id)) = editor.with_untracked(|e| {
            e.as_ref()
                .map(|e| (e.draft(), e.course().map(|c| c.id.clone())))
        }) else {
            return;
        };
        let draft = match draft {
            Ok(draft) => draft,
            Err(blocked) => {
                notifier.error(blocked.message());
                return;
            }
        };

        let client = api.client();
        spawn_local(async move {
            let result = match &id {
                None => client.create_course(draft).await,
                Some(id) => client.update_course(id, draft).await,
            };
            match (id, result) {
                (None, Ok(course)) => {
                    notifier.success("Đã tạo khóa học mới.");
                    router.redirect(&format!("/app/course/{}", course.id));
                }
                (Some(_), Ok(course)) => {
                    editor.try_update(|e| {
                        if let Some(e) = e {
                            e.saved(course);
                        }
                    });
                    notifier.success("Đã lưu thay đổi.");
                }
                (_, Err(e)) => {
                    log_error!("[Course] save failed: {}", e);
                    notifier.error("Lưu khóa học thất bại.");
                }
            }
        });
    };

    let on_delete_course = move |_| {
        if !is_admin_now() {
            notifier.error("Bạn không có quyền xóa khóa học.");
            return;
        }
        let Some(id) = course_id() else {
            return;
        };
        if !confirm("Bạn có chắc chắn muốn xóa khóa học này?") {
            return;
        }

        let client = api.client();
        spawn_local(async move {
            match client.delete_course(&id).await {
                Ok(()) => {
                    notifier.success("Đã xóa khóa học.");
                    router.navigate(HOME_PATH);
                }
                Err(e) => {
                    log_error!("[Course] delete {} failed: {}", id, e);
                    notifier.error("Xóa khóa học thất bại.");
                }
            }
        });
    };

    let on_back = move |_| {
        let dirty = editor.with_untracked(|e| {
            e.as_ref()
                .is_some_and(CourseEditor::leave_needs_confirmation)
        });
        if dirty && !confirm("Bạn có thay đổi chưa lưu. Bạn có chắc muốn rời đi?") {
            return;
        }
        router.navigate(HOME_PATH);
    };

    // --- Comments ---

    let on_add_comment = move |_| {
        let text = new_comment.get_untracked();
        if text.trim().is_empty() {
            return;
        }
        let Some(id) = course_id() else {
            return;
        };
        let username = session
            .with_untracked(|s| s.username().unwrap_or(FALLBACK_USERNAME).to_string());

        let client = api.client();
        spawn_local(async move {
            let refreshed = match client.post_comment(&id, &username, &text).await {
                Ok(()) => client.course_comments(&id).await,
                Err(e) => Err(e),
            };
            match refreshed {
                Ok(list) => {
                    comments.try_set(list);
                    new_comment.try_set(String::new());
                }
                Err(e) => {
                    log_warn!("[Course] posting comment failed: {}", e);
                    notifier.error("Gửi bình luận thất bại.");
                }
            }
        });
    };

    let on_delete_comment = move |comment_id: String| {
        if !is_admin_now() {
            notifier.error("Bạn không có quyền xóa bình luận này.");
            return;
        }
        let Some(id) = course_id() else {
            return;
        };

        let client = api.client();
        spawn_local(async move {
            let refreshed = match client.delete_comment(&comment_id).await {
                Ok(()) => client.course_comments(&id).await,
                Err(e) => Err(e),
            };
            match refreshed {
                Ok(list) => {
                    comments.try_set(list);
                }
                Err(e) => {
                    log_warn!("[Course] deleting comment {} failed: {}", comment_id, e);
                    notifier.error("Xóa bình luận thất bại.");
                }
            }
        });
    };

    // --- View ---

    let details = move || {
        editor.with(|e| {
            let Some(course) = e.as_ref().and_then(CourseEditor::course) else {
                return ().into_any();
            };
            view! {
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <div class="flex items-center gap-3">
                            <span class="text-4xl">{course.icon.clone()}</span>
                            <h1 class="card-title text-3xl">{course.title.clone()}</h1>
                        </div>
                        <p class="text-base-content/70">{course.description.clone()}</p>
                        <div class="stats stats-vertical md:stats-horizontal shadow mt-4">
                            <div class="stat">
                                <div class="stat-title">"Thời lượng dự kiến"</div>
                                <div class="stat-value text-lg">{course.estimated_duration_label()}</div>
                            </div>
                            <div class="stat">
                                <div class="stat-title">"Mục tiêu"</div>
                                <div class="stat-value text-lg">{course.target_study_time_label()}</div>
                            </div>
                            <div class="stat">
                                <div class="stat-title">"Đã học"</div>
                                <div class="stat-value text-lg">{course.total_study_time.clone()}</div>
                            </div>
                            <div class="stat">
                                <div class="stat-title">"Tiến độ"</div>
                                <div class="stat-value text-lg text-primary">{format!("{}%", course.progress)}</div>
                            </div>
                        </div>
                    </div>
                </div>
            }
            .into_any()
        })
    };

    let form = move || {
        view! {
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body space-y-2">
                    <h2 class="card-title">
                        {move || if is_new() { "Tạo khóa học mới" } else { "Chỉnh sửa khóa học" }}
                    </h2>
                    <label class="form-control">
                        <span class="label-text">"Tiêu đề"</span>
                        <input
                            type="text"
                            class="input input-bordered"
                            prop:value=move || editor.with(|e| e.as_ref().map(|e| e.title.clone()).unwrap_or_default())
                            on:input=move |ev| editor.update(|e| {
                                if let Some(e) = e {
                                    e.title = event_target_value(&ev);
                                }
                            })
                        />
                    </label>
                    <label class="form-control">
                        <span class="label-text">"Mô tả"</span>
                        <textarea
                            class="textarea textarea-bordered h-24"
                            prop:value=move || editor.with(|e| e.as_ref().map(|e| e.description.clone()).unwrap_or_default())
                            on:input=move |ev| editor.update(|e| {
                                if let Some(e) = e {
                                    e.description = event_target_value(&ev);
                                }
                            })
                        ></textarea>
                    </label>
                    <label class="form-control">
                        <span class="label-text">"Thời lượng dự kiến"</span>
                        <input
                            type="text"
                            class="input input-bordered"
                            placeholder="~ 10 giờ"
                            prop:value=move || editor.with(|e| e.as_ref().map(|e| e.duration.clone()).unwrap_or_default())
                            on:input=move |ev| editor.update(|e| {
                                if let Some(e) = e {
                                    e.duration = event_target_value(&ev);
                                }
                            })
                        />
                    </label>
                </div>
            </div>
        }
    };

    view! {
        <div class="max-w-4xl mx-auto space-y-6">
            <div class="flex flex-wrap items-center justify-between gap-2">
                <button class="btn btn-ghost" on:click=on_back>"← Quay lại"</button>
                <Show when=is_loaded>
                    <div class="flex gap-2">
                        <Show when=move || is_admin() || is_new()>
                            <button class="btn btn-outline" on:click=on_toggle_edit>
                                {move || if is_editing() { "Hủy" } else { "Chỉnh sửa" }}
                            </button>
                        </Show>
                        <Show when=is_editing>
                            <button class="btn btn-primary" disabled=move || !can_save() on:click=on_save>
                                "Lưu"
                            </button>
                        </Show>
                        <Show when=move || is_admin() && !is_new() && !is_editing()>
                            <button class="btn btn-error btn-outline" on:click=on_delete_course>
                                "Xóa khóa học"
                            </button>
                        </Show>
                    </div>
                </Show>
            </div>

            <Show when=move || !is_admin()>
                <div role="note" class="alert alert-info text-sm">
                    "Chỉ quản trị viên mới có thể chỉnh sửa khóa học và xóa bình luận."
                </div>
            </Show>

            <Show
                when=is_loaded
                fallback=|| view! {
                    <div class="flex justify-center py-16">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
            >
                {move || if is_editing() { form().into_any() } else { details() }}
            </Show>

            <Show when=move || is_loaded() && !is_new()>
                <section class="card bg-base-100 shadow-xl">
                    <div class="card-body space-y-4">
                        <h2 class="card-title">
                            "Bình luận (" {move || comments.with(Vec::len)} ")"
                        </h2>
                        <Show
                            when=move || !comments.with(Vec::is_empty)
                            fallback=|| view! { <p class="text-base-content/60">"Chưa có bình luận nào."</p> }
                        >
                            <ul class="space-y-3">
                                <For
                                    each=move || comments.get()
                                    key=|c| c.id.clone()
                                    children=move |comment: CourseComment| {
                                        let id = comment.id;
                                        view! {
                                            <li class="flex items-start justify-between gap-3 p-3 rounded-lg bg-base-200">
                                                <div>
                                                    <p class="font-semibold">{comment.username}</p>
                                                    <p>{comment.text}</p>
                                                </div>
                                                {move || is_admin().then(|| {
                                                    let id = id.clone();
                                                    view! {
                                                        <button
                                                            class="btn btn-ghost btn-xs text-error"
                                                            on:click=move |_| on_delete_comment(id.clone())
                                                        >
                                                            "Xóa"
                                                        </button>
                                                    }
                                                })}
                                            </li>
                                        }
                                    }
                                />
                            </ul>
                        </Show>
                        <div class="join w-full">
                            <input
                                type="text"
                                class="input input-bordered join-item flex-1"
                                placeholder="Viết bình luận..."
                                prop:value=new_comment
                                on:input=move |ev| new_comment.set(event_target_value(&ev))
                            />
                            <button class="btn btn-primary join-item" on:click=on_add_comment>"Gửi"</button>
                        </div>
                    </div>
                </section>
            </Show>
        </div>
    }
}
