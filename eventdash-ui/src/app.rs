//! Route table and session provider for the browser dashboard.

use leptos::*;
use leptos_router::*;

use crate::components::DashboardLayout;
use crate::pages::{Analytics, DashboardHome, EventCreate, EventDetail, Events, Login, Register};
use crate::state::provide_auth_state;

#[component]
pub fn App() -> impl IntoView {
    // Restore the stored session before anything renders
    provide_auth_state();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-100 text-gray-900">
                <Routes>
                    <Route path="/login" view=Login />
                    <Route path="/register" view=Register />

                    // Everything below is gated by the layout
                    <Route path="/dashboard" view=DashboardLayout>
                        <Route path="" view=DashboardHome />
                        <Route path="events" view=Events />
                        <Route path="events/create" view=EventCreate />
                        <Route path="events/:event_id" view=EventDetail />
                        <Route path="analytics" view=Analytics />
                    </Route>

                    <Route path="/" view=|| view! { <Redirect path="/dashboard" /> } />
                    <Route path="/*any" view=NotFound />
                </Routes>
            </div>
        </Router>
    }
}

/// Unknown paths land here; protected links still go through the layout gate
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center space-y-4">
            <h1 class="text-3xl font-bold">"No such page"</h1>
            <p class="text-gray-500">"Head back to your events."</p>
            <A href="/dashboard/events" class="px-6 py-3 bg-blue-600 text-white rounded-lg">
                "Events"
            </A>
        </div>
    }
}
