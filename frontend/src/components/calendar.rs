use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;
use studyapp_shared::date::{DAY_NAMES, MonthGrid, NaiveDate, format_vi, shift_month};
use studyapp_shared::{TimeSlot, TimelineEvent, event_icon};

use crate::api::use_api;

#[component]
pub fn CalendarPage() -> impl IntoView {
    let today = Local::now().date_naive();
    let selected = RwSignal::new(today);

    view! {
        <div class="max-w-3xl mx-auto space-y-6">
            <MonthView selected=selected today=today />
            <DayTimeline selected=selected />
        </div>
    }
}

#[component]
fn MonthView(selected: RwSignal<NaiveDate>, today: NaiveDate) -> impl IntoView {
    let grid = Memo::new(move |_| MonthGrid::of(selected.get()));

    let cell_class = move |day: u32| {
        let date = grid.with(|g| g.date(day));
        let base = "btn btn-sm h-10 w-full";
        if date == Some(selected.get()) {
            format!("{} btn-primary", base)
        } else if date == Some(today) {
            format!("{} btn-accent btn-outline", base)
        } else {
            format!("{} btn-ghost", base)
        }
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex items-center justify-between mb-2">
                    <button class="btn btn-ghost btn-sm" on:click=move |_| selected.update(|d| *d = shift_month(*d, -1))>
                        "←"
                    </button>
                    <h2 class="text-lg font-semibold">{move || grid.with(MonthGrid::title)}</h2>
                    <button class="btn btn-ghost btn-sm" on:click=move |_| selected.update(|d| *d = shift_month(*d, 1))>
                        "→"
                    </button>
                </div>
                <div class="grid grid-cols-7 gap-1 text-center text-xs font-semibold text-base-content/60">
                    {DAY_NAMES.iter().map(|name| view! { <div class="py-2">{*name}</div> }).collect_view()}
                </div>
                <div class="grid grid-cols-7 gap-1">
                    {move || grid.get().cells().into_iter().map(|cell| match cell {
                        None => view! { <div></div> }.into_any(),
                        Some(day) => view! {
                            <button
                                class=move || cell_class(day)
                                on:click=move |_| {
                                    if let Some(date) = grid.with_untracked(|g| g.date(day)) {
                                        selected.set(date);
                                    }
                                }
                            >
                                {day}
                            </button>
                        }.into_any(),
                    }).collect_view()}
                </div>
            </div>
        </div>
    }
}

#[component]
fn DayTimeline(selected: RwSignal<NaiveDate>) -> impl IntoView {
    let api = use_api();
    let slots = RwSignal::new(Vec::<TimeSlot>::new());

    Effect::new(move |_| {
        let date = selected.get();
        let client = api.client();
        spawn_local(async move {
            let result = client.day_timeline(date).await.unwrap_or_else(|e| {
                log_warn!("[Calendar] loading timeline for {} failed: {}", date, e);
                Vec::new()
            });
            // A newer selection wins over a late response.
            if selected.try_get_untracked() == Some(date) {
                slots.try_set(result);
            }
        });
    });

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h3 class="card-title">"Timeline - " {move || format_vi(selected.get())}</h3>
                <p class="text-sm text-base-content/60">"Lịch trình chi tiết trong ngày"</p>
                <Show
                    when=move || !slots.with(Vec::is_empty)
                    fallback=|| view! {
                        <p class="text-center text-base-content/60 py-6">"Không có lịch trình nào cho ngày này."</p>
                    }
                >
                    <ul class="timeline timeline-vertical timeline-compact">
                        <For each=move || slots.get() key=|slot| slot.time.clone() let:slot>
                            <li>
                                <div class="timeline-start text-sm font-medium">{slot.time.clone()}</div>
                                <div class="timeline-middle">
                                    <span class=if slot.events.is_empty() { "badge badge-xs" } else { "badge badge-xs badge-primary" }></span>
                                </div>
                                <div class="timeline-end w-full space-y-2 mb-4">
                                    {slot.events.iter().cloned().map(|event| view! { <EventCard event=event /> }).collect_view()}
                                </div>
                                <hr />
                            </li>
                        </For>
                    </ul>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn EventCard(event: TimelineEvent) -> impl IntoView {
    let background = if event.is_striped() {
        format!(
            "repeating-linear-gradient(45deg, {c}10, {c}10 8px, {c}20 8px, {c}20 16px)",
            c = event.color
        )
    } else {
        format!("{}10", event.color)
    };
    let style = format!("background: {}; border-left: 4px solid {}", background, event.color);

    view! {
        <div class="card card-compact" style=style>
            <div class="card-body flex-row items-center gap-3">
                <div
                    class="w-8 h-8 rounded-lg flex items-center justify-center text-white"
                    style=format!("background: {}", event.color)
                >
                    {event_icon(&event.title)}
                </div>
                <div class="flex-1">
                    <h4 class="font-semibold">{event.title.clone()}</h4>
                    <p class="text-xs text-base-content/60">{format!("{} phút", event.duration)}</p>
                </div>
            </div>
        </div>
    }
}
