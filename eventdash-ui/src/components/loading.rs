//! Pending and failure states shared by the pages.

use leptos::*;

/// Centered spinner with an optional caption
#[component]
pub fn Loading(#[prop(optional)] label: Option<&'static str>) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-12 text-gray-500" role="status">
            <div class="loading-spinner w-8 h-8" />
            {label.map(|text| view! { <span class="mt-3 text-sm">{text}</span> })}
        </div>
    }
}

/// Placeholder shaped like a summary card
#[component]
pub fn CardSkeleton() -> impl IntoView {
    view! {
        <div class="bg-white rounded-lg shadow p-6 animate-pulse" aria-hidden="true">
            <div class="h-5 bg-gray-200 rounded w-1/3" />
            <div class="h-10 bg-gray-200 rounded w-1/4 mt-3" />
        </div>
    }
}

/// Red inline notice; renders nothing while `message` is `None`
#[component]
pub fn ErrorMessage(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message.get().map(|msg| {
            view! {
                <p class="text-sm text-red-600 mt-2" role="alert">{msg}</p>
            }
        })
    }
}
