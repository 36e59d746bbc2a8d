//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod chart;
pub mod layout;
pub mod loading;

pub use chart::SessionChart;
pub use layout::DashboardLayout;
pub use loading::{CardSkeleton, ErrorMessage, Loading};
