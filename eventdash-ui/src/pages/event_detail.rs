//! Event Detail Page
//!
//! One event, its participants, an add-participant form and deletion.

use leptos::*;
use leptos_router::*;

use crate::api::{self, Event};
use crate::components::{ErrorMessage, Loading};
use crate::pages::events::format_date;
use crate::state::{use_auth, PageScope};

#[derive(Params, PartialEq, Clone)]
struct EventParams {
    event_id: Option<String>,
}

#[component]
pub fn EventDetail() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let params = use_params::<EventParams>();
    let scope = PageScope::new();

    let event_id = move || {
        params.with(|p| p.as_ref().ok().and_then(|p| p.event_id.clone()).unwrap_or_default())
    };

    let (event, set_event) = create_signal(None::<Event>);
    let (participants, set_participants) = create_signal(Vec::<String>::new());
    let (new_participant, set_new_participant) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);

    let load_scope = scope.clone();
    create_effect(move |_| {
        let id = event_id();
        let Some(token) = auth.token.get() else {
            return;
        };
        load_scope.spawn(
            async move { api::fetch_event(&token, &id).await },
            move |result| match result {
                Ok(loaded) => {
                    set_participants.set(loaded.participants.iter().map(|p| p.user_id.clone()).collect());
                    set_event.set(Some(loaded));
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch event: {}", e).into());
                    set_error.set(Some(e));
                }
            },
        );
    });

    let add_scope = scope.clone();
    let on_add = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let user_id = new_participant.get_untracked().trim().to_string();
        let Some(token) = auth.bearer() else {
            return;
        };
        if user_id.is_empty() {
            return;
        }

        let id = event_id();
        let ids = vec![user_id.clone()];
        add_scope.spawn(
            async move { api::add_participants(&token, &id, &ids).await },
            move |result| match result {
                Ok(()) => {
                    // Append locally; no refetch
                    set_participants.update(|list| list.push(user_id));
                    set_new_participant.set(String::new());
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to add participant: {}", e).into());
                    set_error.set(Some(e));
                }
            },
        );
    };

    let on_delete = move |_| {
        let Some(token) = auth.bearer() else {
            return;
        };
        let id = event_id();
        let navigate = navigate.clone();
        scope.spawn(
            async move { api::delete_event(&token, &id).await },
            move |result| match result {
                Ok(()) => navigate("/dashboard/events", Default::default()),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to delete event: {}", e).into());
                    set_error.set(Some(e));
                }
            },
        );
    };

    view! {
        <div class="space-y-6">
            <ErrorMessage message=error />
            {move || match event.get() {
                None => view! { <Loading label="Loading event..." /> }.into_view(),
                Some(event) => view! {
                    <div class="bg-white rounded-lg shadow p-6 space-y-2">
                        <h1 class="text-2xl font-bold">{event.name.clone()}</h1>
                        <p class="text-gray-600">{event.description.clone()}</p>
                        <p>"Start: " {format_date(&event.start_date)}</p>
                        <p>"End: " {format_date(&event.end_date)}</p>
                        <p>"Type: " {event.type_label().to_string()}</p>
                        <p>"Capacity: " {event.capacity.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string())}</p>
                    </div>
                }.into_view(),
            }}

            <div class="bg-white rounded-lg shadow p-6 space-y-4">
                <h2 class="text-xl font-semibold">"Participants"</h2>
                <ul class="list-disc pl-6">
                    {move || participants.get().into_iter().map(|id| view! { <li>{id}</li> }).collect_view()}
                </ul>
                <form on:submit=on_add class="flex space-x-2">
                    <input
                        placeholder="Enter user ID"
                        prop:value=move || new_participant.get()
                        on:input=move |ev| set_new_participant.set(event_target_value(&ev))
                        class="flex-1 border rounded px-3 py-2"
                    />
                    <button type="submit" class="px-4 py-2 bg-blue-600 text-white rounded">
                        "Add Participant"
                    </button>
                </form>
            </div>

            <button on:click=on_delete class="px-4 py-2 bg-red-600 text-white rounded">
                "Delete Event"
            </button>
        </div>
    }
}
