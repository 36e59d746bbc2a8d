//! Analytics Page
//!
//! Event selector, summary cards and the session chart.

use leptos::*;

use crate::api::{self, Event, EventAnalytics};
use crate::components::SessionChart;
use crate::state::{use_auth, PageScope};

#[component]
pub fn Analytics() -> impl IntoView {
    let auth = use_auth();
    let scope = PageScope::new();

    let (events, set_events) = create_signal(Vec::<Event>::new());
    let (selected, set_selected) = create_signal(String::new());
    let (analytics, set_analytics) = create_signal(None::<EventAnalytics>);

    // Event list; first event selected by default
    let events_scope = scope.clone();
    create_effect(move |_| {
        let Some(token) = auth.token.get() else {
            return;
        };
        events_scope.spawn(
            async move { api::fetch_events(&token).await },
            move |result| match result {
                Ok(list) => {
                    if let Some(first) = list.first() {
                        set_selected.set(first.id.clone());
                    }
                    set_events.set(list);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch events: {}", e).into());
                }
            },
        );
    });

    // Snapshot for the selected event
    create_effect(move |_| {
        let id = selected.get();
        let Some(token) = auth.token.get() else {
            return;
        };
        if id.is_empty() {
            return;
        }
        scope.spawn(
            async move { api::fetch_analytics(&token, &id).await },
            move |result| match result {
                Ok(snapshot) => set_analytics.set(Some(snapshot)),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch analytics: {}", e).into());
                }
            },
        );
    });

    let sessions = Signal::derive(move || {
        analytics.with(|a| a.as_ref().map(|a| a.sessions.clone()).unwrap_or_default())
    });

    view! {
        <div class="space-y-6">
            <div class="flex justify-between items-center">
                <h1 class="text-2xl font-bold">"Analytics Dashboard"</h1>
                <select
                    on:change=move |ev| set_selected.set(event_target_value(&ev))
                    class="w-[200px] border rounded px-3 py-2"
                >
                    {move || events.get().into_iter().map(|event| {
                        let id = event.id.clone();
                        view! {
                            <option value=event.id selected=move || selected.get() == id>
                                {event.name}
                            </option>
                        }
                    }).collect_view()}
                </select>
            </div>

            {move || analytics.get().map(|a| view! {
                <div class="grid gap-6 md:grid-cols-2 lg:grid-cols-3">
                    <SummaryCard title="Total Participants" value=a.total_participants.to_string() />
                    <SummaryCard title="Overall Engagement" value=format!("{:.2}", a.overall_engagement) />
                    <SummaryCard title="Sessions" value=a.sessions.len().to_string() />
                </div>
            })}

            <Show when=move || analytics.with(|a| a.as_ref().is_some_and(|a| !a.sessions.is_empty()))>
                <div class="bg-white rounded-lg shadow p-6">
                    <h2 class="text-xl font-semibold">"Session Analytics"</h2>
                    <p class="text-gray-500 mb-4">"Interaction count and unique participants per session"</p>
                    <SessionChart sessions=sessions />
                </div>
            </Show>
        </div>
    }
}

#[component]
fn SummaryCard(title: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="bg-white rounded-lg shadow p-6">
            <h2 class="text-lg font-semibold">{title}</h2>
            <p class="text-4xl font-bold mt-2">{value}</p>
        </div>
    }
}
