//! Create Event Page

use leptos::*;
use leptos_router::*;

use crate::api::{self, parse_int, NewEvent, EVENT_TYPES};
use crate::components::ErrorMessage;
use crate::state::{use_auth, PageScope};

#[component]
pub fn EventCreate() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let scope = PageScope::new();

    let (name, set_name) = create_signal(String::new());
    let (description, set_description) = create_signal(String::new());
    let (start_date, set_start_date) = create_signal(String::new());
    let (end_date, set_end_date) = create_signal(String::new());
    let (event_type, set_event_type) = create_signal("VIRTUAL".to_string());
    let (capacity, set_capacity) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(token) = auth.bearer() else {
            return;
        };

        let payload = NewEvent {
            name: name.get_untracked(),
            description: description.get_untracked(),
            start_date: start_date.get_untracked(),
            end_date: end_date.get_untracked(),
            event_type: event_type.get_untracked(),
            capacity: parse_int(&capacity.get_untracked()),
        };

        let navigate = navigate.clone();
        scope.spawn(
            async move { api::create_event(&token, &payload).await },
            move |result| match result {
                Ok(()) => navigate("/dashboard/events", Default::default()),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to create event: {}", e).into());
                    set_error.set(Some(e));
                }
            },
        );
    };

    view! {
        <form on:submit=on_submit class="max-w-2xl mx-auto bg-white rounded-lg shadow p-6 space-y-4">
            <h1 class="text-2xl font-bold">"Create New Event"</h1>
            <div class="space-y-2">
                <label for="name" class="block text-sm font-medium">"Event Name"</label>
                <input
                    id="name"
                    required
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                    class="w-full border rounded px-3 py-2"
                />
            </div>
            <div class="space-y-2">
                <label for="description" class="block text-sm font-medium">"Description"</label>
                <textarea
                    id="description"
                    required
                    prop:value=move || description.get()
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                    class="w-full border rounded px-3 py-2"
                />
            </div>
            <div class="space-y-2">
                <label for="startDate" class="block text-sm font-medium">"Start Date"</label>
                <input
                    id="startDate"
                    type="datetime-local"
                    required
                    prop:value=move || start_date.get()
                    on:input=move |ev| set_start_date.set(event_target_value(&ev))
                    class="w-full border rounded px-3 py-2"
                />
            </div>
            <div class="space-y-2">
                <label for="endDate" class="block text-sm font-medium">"End Date"</label>
                <input
                    id="endDate"
                    type="datetime-local"
                    required
                    prop:value=move || end_date.get()
                    on:input=move |ev| set_end_date.set(event_target_value(&ev))
                    class="w-full border rounded px-3 py-2"
                />
            </div>
            <div class="space-y-2">
                <label for="type" class="block text-sm font-medium">"Event Type"</label>
                <select
                    id="type"
                    on:change=move |ev| set_event_type.set(event_target_value(&ev))
                    class="w-full border rounded px-3 py-2"
                >
                    {EVENT_TYPES
                        .iter()
                        .map(|&(value, label)| view! {
                            <option value=value selected=move || event_type.get() == value>
                                {label}
                            </option>
                        })
                        .collect_view()}
                </select>
            </div>
            <div class="space-y-2">
                <label for="capacity" class="block text-sm font-medium">"Capacity"</label>
                <input
                    id="capacity"
                    type="number"
                    required
                    prop:value=move || capacity.get()
                    on:input=move |ev| set_capacity.set(event_target_value(&ev))
                    class="w-full border rounded px-3 py-2"
                />
            </div>
            <ErrorMessage message=error />
            <button type="submit" class="px-4 py-2 bg-blue-600 text-white rounded">
                "Create Event"
            </button>
        </form>
    }
}
