//! Login Page

use leptos::*;
use leptos_router::*;

use crate::components::ErrorMessage;
use crate::state::use_auth;

#[component]
pub fn Login() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);
        set_submitting.set(true);

        let navigate = navigate.clone();
        spawn_local(async move {
            match auth.login(&email.get_untracked(), &password.get_untracked()).await {
                Ok(()) => navigate("/dashboard", Default::default()),
                Err(e) => {
                    web_sys::console::error_1(&format!("Login failed: {}", e).into());
                    set_error.set(Some(e));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="flex items-center justify-center min-h-screen">
            <form on:submit=on_submit class="w-full max-w-sm bg-white rounded-lg shadow p-6 space-y-4">
                <h1 class="text-2xl font-bold">"Login"</h1>
                <div class="space-y-2">
                    <label for="email" class="block text-sm font-medium">"Email"</label>
                    <input
                        id="email"
                        type="email"
                        required
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        class="w-full border rounded px-3 py-2"
                    />
                </div>
                <div class="space-y-2">
                    <label for="password" class="block text-sm font-medium">"Password"</label>
                    <input
                        id="password"
                        type="password"
                        required
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        class="w-full border rounded px-3 py-2"
                    />
                </div>
                <ErrorMessage message=error />
                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full bg-blue-600 hover:bg-blue-700 text-white rounded py-2"
                >
                    "Login"
                </button>
                <p class="text-sm text-center">
                    "Don't have an account? "
                    <A href="/register" class="text-blue-600">"Register"</A>
                </p>
            </form>
        </div>
    }
}
