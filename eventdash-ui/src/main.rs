//! EventDash Dashboard
//!
//! Admin dashboard for events, participants and engagement analytics, built
//! with Leptos (WASM).
//!
//! # Features
//!
//! - Login and registration with a locally stored bearer token
//! - Event list, detail, creation and deletion
//! - Participant management
//! - Per-event analytics with a dual-axis session chart
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the events API over HTTP.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
