use leptos::prelude::*;
use leptos::task::spawn_local;
use studyapp_shared::ModerationComment;
use studyapp_shared::session::Session;

use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::toast::use_notifier;

#[derive(Debug, Clone, PartialEq)]
pub struct ContentPage {
    pub id: &'static str,
    pub title: &'static str,
    pub content: String,
}

/// Static content pages editable from the console, with the one being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentPages {
    pages: Vec<ContentPage>,
    selected: &'static str,
}

impl Default for ContentPages {
    fn default() -> Self {
        Self {
            pages: vec![
                ContentPage {
                    id: "home",
                    title: "Trang chủ",
                    content: "Nội dung trang chủ...".to_string(),
                },
                ContentPage {
                    id: "about",
                    title: "Giới thiệu",
                    content: "Nội dung trang giới thiệu...".to_string(),
                },
            ],
            selected: "home",
        }
    }
}

impl ContentPages {
    pub fn pages(&self) -> &[ContentPage] {
        &self.pages
    }

    pub fn selected(&self) -> &'static str {
        self.selected
    }

    /// Unknown ids keep the current selection.
    pub fn select(&mut self, id: &str) -> bool {
        match self.pages.iter().find(|p| p.id == id) {
            Some(page) => {
                self.selected = page.id;
                true
            }
            None => false,
        }
    }

    pub fn content(&self, id: &str) -> Option<&str> {
        self.pages
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.content.as_str())
    }

    /// Records content the backend accepted.
    pub fn commit(&mut self, id: &str, content: String) {
        if let Some(page) = self.pages.iter_mut().find(|p| p.id == id) {
            page.content = content;
        }
    }
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let notifier = use_notifier();

    if !auth.session_untracked().is_admin() {
        log_warn!("[Admin] console rendered for a non-admin session");
    }
    let session = auth.session_signal();
    let is_admin = move || session.with(Session::is_admin);

    let (total_views, set_total_views) = signal(None::<u64>);
    let comments = RwSignal::new(Vec::<ModerationComment>::new());

    Effect::new(move |_| {
        let client = api.client();
        spawn_local(async move {
            let (stats, list) = futures::join!(client.site_stats(), client.list_comments());
            match stats {
                Ok(stats) => {
                    set_total_views.try_set(Some(stats.total_website_views));
                }
                Err(e) => log_warn!("[Admin] loading site stats failed: {}", e),
            }
            let list = list.unwrap_or_else(|e| {
                log_warn!("[Admin] loading comments failed: {}", e);
                Vec::new()
            });
            comments.try_set(list);
        });
    });

    let delete_comment = move |id: String| {
        let client = api.client();
        spawn_local(async move {
            match client.delete_comment(&id).await {
                Ok(()) => {
                    comments.try_update(|list| list.retain(|c| c.id != id));
                }
                Err(e) => {
                    log_warn!("[Admin] deleting comment {} failed: {}", id, e);
                    notifier.error("Xóa bình luận thất bại.");
                }
            }
        });
    };

    view! {
        <div class="max-w-4xl mx-auto space-y-8">
            <h2 class="text-3xl font-bold text-center">"Trang Quản Trị"</h2>
            <Show when=move || !is_admin()>
                <div role="alert" class="alert alert-warning">
                    "Bạn không có quyền quản trị. Các thao tác có thể bị máy chủ từ chối."
                </div>
            </Show>

            <div class="stats shadow w-full">
                <div class="stat place-items-center">
                    <div class="stat-title">"Tổng số lượt xem Website"</div>
                    <div class="stat-value text-primary">
                        {move || match total_views.get() {
                            Some(views) => views.to_string(),
                            None => "Đang tải...".to_string(),
                        }}
                    </div>
                </div>
            </div>

            <PageContentEditor />

            <section class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"Quản lý Bình luận"</h3>
                    <Show
                        when=move || !comments.with(Vec::is_empty)
                        fallback=|| view! {
                            <p class="text-center text-base-content/60">"Không có bình luận nào."</p>
                        }
                    >
                        <ul class="space-y-3">
                            <For
                                each=move || comments.get()
                                key=|comment| comment.id.clone()
                                children=move |comment| {
                                    let id = comment.id.clone();
                                    view! {
                                        <li class="flex items-center justify-between p-4 rounded-lg bg-base-200">
                                            <div>
                                                <p class="font-bold">{comment.author.clone()}</p>
                                                <p class="text-base-content/80">"\"" {comment.text.clone()} "\""</p>
                                                {comment.date.clone().map(|date| view! {
                                                    <p class="text-xs text-base-content/50">"Ngày: " {date}</p>
                                                })}
                                            </div>
                                            <button
                                                class="btn btn-error btn-sm"
                                                on:click=move |_| delete_comment(id.clone())
                                            >
                                                "Xóa"
                                            </button>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    </Show>
                </div>
            </section>
        </div>
    }
}

#[component]
fn PageContentEditor() -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();

    let pages = RwSignal::new(ContentPages::default());
    let draft = RwSignal::new(String::new());
    let (saving, set_saving) = signal(false);

    // Selecting a page loads its stored content into the editor.
    Effect::new(move |_| {
        let content = pages.with(|p| p.content(p.selected()).unwrap_or_default().to_string());
        draft.set(content);
    });

    let on_select = move |ev: leptos::ev::Event| {
        let id = event_target_value(&ev);
        pages.update(|p| {
            p.select(&id);
        });
    };

    let on_save = move |_: leptos::ev::MouseEvent| {
        let page_id = pages.with_untracked(ContentPages::selected);
        let content = draft.get_untracked();
        set_saving.set(true);

        let client = api.client();
        spawn_local(async move {
            match client.update_page_content(page_id, &content).await {
                Ok(()) => {
                    pages.try_update(|p| p.commit(page_id, content));
                    notifier.success(format!("Đã cập nhật nội dung trang \"{}\"", page_id));
                }
                Err(e) => {
                    log_warn!("[Admin] updating page {} failed: {}", page_id, e);
                    notifier.error("Cập nhật nội dung trang thất bại.");
                }
            }
            set_saving.try_set(false);
        });
    };

    view! {
        <section class="card bg-base-100 shadow-xl">
            <div class="card-body space-y-4">
                <h3 class="card-title">"Cập nhật nội dung trang"</h3>
                <label class="form-control">
                    <span class="label-text font-bold">"Chọn trang:"</span>
                    <select class="select select-bordered" on:change=on_select>
                        {move || pages.with(|p| {
                            let selected = p.selected();
                            p.pages()
                                .iter()
                                .map(|page| view! {
                                    <option value=page.id selected={page.id == selected}>{page.title}</option>
                                })
                                .collect_view()
                        })}
                    </select>
                </label>
                <label class="form-control">
                    <span class="label-text font-bold">"Nội dung:"</span>
                    <textarea
                        class="textarea textarea-bordered"
                        rows="10"
                        prop:value=move || draft.get()
                        on:input=move |ev| draft.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <div class="card-actions justify-end">
                    <button class="btn btn-success" disabled=move || saving.get() on:click=on_save>
                        "Cập nhật trang"
                    </button>
                </div>
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_pages_selection() {
        let mut pages = ContentPages::default();
        assert_eq!(pages.selected(), "home");
        assert_eq!(pages.content("home"), Some("Nội dung trang chủ..."));

        assert!(pages.select("about"));
        assert_eq!(pages.selected(), "about");

        assert!(!pages.select("faq"));
        assert_eq!(pages.selected(), "about");
        assert_eq!(pages.content("faq"), None);
    }

    #[test]
    fn test_commit_only_touches_one_page() {
        let mut pages = ContentPages::default();
        pages.commit("about", "Chúng tôi là StudyApp".to_string());
        assert_eq!(pages.content("about"), Some("Chúng tôi là StudyApp"));
        assert_eq!(pages.content("home"), Some("Nội dung trang chủ..."));

        pages.commit("faq", "x".to_string());
        assert_eq!(pages.pages().len(), 2);
    }
}
