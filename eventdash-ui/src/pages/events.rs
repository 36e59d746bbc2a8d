//! Events Page
//!
//! All events with links to their detail pages.

use leptos::*;
use leptos_router::*;

use crate::api::{self, Event};
use crate::components::{ErrorMessage, Loading};
use crate::state::{use_auth, PageScope};

#[component]
pub fn Events() -> impl IntoView {
    let auth = use_auth();
    let scope = PageScope::new();
    let (events, set_events) = create_signal(None::<Vec<Event>>);
    let (error, set_error) = create_signal(None::<String>);

    create_effect(move |_| {
        let Some(token) = auth.token.get() else {
            return;
        };
        scope.spawn(
            async move { api::fetch_events(&token).await },
            move |result| match result {
                Ok(list) => {
                    set_error.set(None);
                    set_events.set(Some(list));
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch events: {}", e).into());
                    set_error.set(Some(e));
                }
            },
        );
    });

    view! {
        <div class="space-y-6">
            <div class="flex justify-between items-center">
                <h1 class="text-2xl font-bold">"Events"</h1>
                <A href="/dashboard/events/create" class="px-4 py-2 bg-blue-600 text-white rounded">
                    "Create Event"
                </A>
            </div>
            <ErrorMessage message=error />
            {move || match events.get() {
                None => view! { <Loading label="Loading events..." /> }.into_view(),
                Some(list) if list.is_empty() => view! {
                    <p class="text-gray-500">"No events yet."</p>
                }.into_view(),
                Some(list) => view! {
                    <div class="grid gap-6 md:grid-cols-2 lg:grid-cols-3">
                        {list.into_iter().map(|event| view! { <EventCard event=event /> }).collect_view()}
                    </div>
                }.into_view(),
            }}
        </div>
    }
}

#[component]
fn EventCard(event: Event) -> impl IntoView {
    let href = format!("/dashboard/events/{}", event.id);
    let type_label = event.type_label().to_string();

    view! {
        <div class="bg-white rounded-lg shadow p-6 space-y-2">
            <h2 class="text-lg font-semibold">{event.name}</h2>
            <p class="text-gray-600">{event.description}</p>
            <p class="text-sm">"Start: " {format_date(&event.start_date)}</p>
            <p class="text-sm">"End: " {format_date(&event.end_date)}</p>
            <p class="text-sm">"Type: " {type_label}</p>
            <A href=href class="inline-block mt-2 px-4 py-2 border rounded">"View Details"</A>
        </div>
    }
}

/// Render an API timestamp as local date and time
pub fn format_date(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&chrono::Local).format("%b %d, %Y %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
