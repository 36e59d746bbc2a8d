//! Dashboard Layout
//!
//! Wraps every protected page. Without a session nothing below renders and
//! the browser is sent to `/login`; the check re-runs whenever the session
//! changes.

use leptos::*;
use leptos_router::*;

use crate::components::Loading;
use crate::state::use_auth;

/// Sidebar entries: (href, label)
const NAV_LINKS: [(&str, &str); 3] = [
    ("/dashboard", "Dashboard"),
    ("/dashboard/events", "Events"),
    ("/dashboard/analytics", "Analytics"),
];

/// Gated layout for everything under `/dashboard`
#[component]
pub fn DashboardLayout() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    create_effect(move |_| {
        if !auth.is_authenticated() {
            navigate("/login", Default::default());
        }
    });

    let on_logout = move |_| {
        auth.logout();
    };

    view! {
        <Show when=move || auth.is_authenticated() fallback=|| view! { <Loading /> }>
            <div class="flex h-screen">
                <aside class="w-64 bg-white shadow-md">
                    <div class="p-4 text-xl font-bold">"Event Admin"</div>
                    <nav class="mt-4">
                        {NAV_LINKS
                            .iter()
                            .map(|(href, label)| view! {
                                <A
                                    href=*href
                                    exact=true
                                    class="block px-4 py-2 text-gray-700 hover:bg-gray-200"
                                    active_class="bg-gray-200"
                                >
                                    {*label}
                                </A>
                            })
                            .collect_view()}
                    </nav>
                    <button
                        on:click=on_logout
                        class="block w-full text-left px-4 py-2 mt-4 text-gray-700 hover:bg-gray-200"
                    >
                        "Logout"
                    </button>
                </aside>
                <main class="flex-1 p-8 overflow-y-auto">
                    <Outlet />
                </main>
            </div>
        </Show>
    }
}
