//! Pages
//!
//! Top-level page components for each route.

pub mod analytics;
pub mod dashboard;
pub mod event_create;
pub mod event_detail;
pub mod events;
pub mod login;
pub mod register;

pub use analytics::Analytics;
pub use dashboard::DashboardHome;
pub use event_create::EventCreate;
pub use event_detail::EventDetail;
pub use events::Events;
pub use login::Login;
pub use register::Register;
