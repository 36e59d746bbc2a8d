//! Dashboard Page
//!
//! Landing page inside the protected area; shows the event count.

use leptos::*;

use crate::api;
use crate::components::CardSkeleton;
use crate::state::{use_auth, PageScope};

#[component]
pub fn DashboardHome() -> impl IntoView {
    let auth = use_auth();
    let scope = PageScope::new();
    let (event_count, set_event_count) = create_signal(None::<usize>);

    // Fetch on mount and whenever the session changes
    create_effect(move |_| {
        let Some(token) = auth.token.get() else {
            return;
        };
        scope.spawn(
            async move { api::fetch_events(&token).await },
            move |result| match result {
                Ok(events) => set_event_count.set(Some(events.len())),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch events: {}", e).into());
                }
            },
        );
    });

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold">"Dashboard"</h1>
            <div class="grid gap-6 md:grid-cols-2 lg:grid-cols-3">
                {move || match event_count.get() {
                    Some(count) => view! {
                        <div class="bg-white rounded-lg shadow p-6">
                            <h2 class="text-lg font-semibold">"Total Events"</h2>
                            <p class="text-4xl font-bold mt-2">{count}</p>
                        </div>
                    }.into_view(),
                    None => view! { <CardSkeleton /> }.into_view(),
                }}
            </div>
        </div>
    }
}
