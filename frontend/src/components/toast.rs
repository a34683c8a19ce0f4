//! Transient notifications shown in the top-right corner.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Notice {
    id: u64,
    text: String,
    is_error: bool,
}

/// Shows one notice at a time; a newer notice replaces the current one.
#[derive(Clone, Copy)]
pub struct Notifier {
    current: RwSignal<Option<Notice>>,
    next_id: StoredValue<u64>,
    timeout_ms: u32,
}

impl Notifier {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            current: RwSignal::new(None),
            next_id: StoredValue::new(0),
            timeout_ms,
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(text.into(), false);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.show(text.into(), true);
    }

    fn show(&self, text: String, is_error: bool) {
        self.next_id.update_value(|id| *id += 1);
        let id = self.next_id.get_value();
        self.current.try_set(Some(Notice { id, text, is_error }));

        // Dismiss only if nothing newer replaced it meanwhile.
        let current = self.current;
        Timeout::new(self.timeout_ms, move || {
            current.try_update(|notice| {
                if notice.as_ref().is_some_and(|n| n.id == id) {
                    *notice = None;
                }
            });
        })
        .forget();
    }
}

pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().expect("Notifier should be provided")
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let notifier = use_notifier();
    let current = notifier.current;

    move || {
        current.get().map(|notice| {
            let class = if notice.is_error {
                "alert alert-error shadow-lg"
            } else {
                "alert alert-success shadow-lg"
            };
            view! {
                <div class="toast toast-top toast-end z-50">
                    <div class=class>
                        <span>{notice.text}</span>
                    </div>
                </div>
            }
        })
    }
}
