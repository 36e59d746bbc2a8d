//! Events list view

use crate::api::Event;
use crate::fetch::ViewScope;
use crate::routes::Route;

use super::{load, Activation, ViewContext};

/// All events, fetched on activation
pub struct EventsList {
    ctx: ViewContext,
    scope: ViewScope,
    events: Vec<Event>,
    last_error: Option<String>,
}

impl EventsList {
    pub fn new(ctx: &ViewContext) -> Self {
        Self {
            ctx: ctx.clone(),
            scope: ctx.scope(),
            events: Vec::new(),
            last_error: None,
        }
    }

    /// Fetch the list. Without a session nothing is requested.
    pub async fn activate(&mut self) -> Activation {
        let Some(token) = self.ctx.token() else {
            return Activation::NoSession;
        };

        match load(&self.scope, "events", &mut self.last_error, self.ctx.events(&token)).await {
            Ok(events) => {
                self.events = events.as_ref().clone();
                tracing::debug!(count = self.events.len(), "Events loaded");
                Activation::Loaded
            }
            Err(outcome) => outcome,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Navigation target for one event
    pub fn detail_route(event: &Event) -> Route {
        Route::EventDetail(event.id.clone())
    }

    pub fn create_route() -> Route {
        Route::EventCreate
    }

    pub fn teardown(&self) {
        self.scope.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::{logged_in, logged_out, sample_event, FakeEvents};

    #[tokio::test]
    async fn test_activation_loads_events() {
        let api = FakeEvents::with_events(vec![
            sample_event("e1", "Launch", &[]),
            sample_event("e2", "Retro", &["u1"]),
        ]);
        let (ctx, _store) = logged_in(api.clone()).await;

        let mut view = EventsList::new(&ctx);
        assert_eq!(view.activate().await, Activation::Loaded);
        assert_eq!(view.events().len(), 2);
        assert_eq!(
            EventsList::detail_route(&view.events()[1]).path(),
            "/dashboard/events/e2"
        );
        assert_eq!(EventsList::create_route(), Route::EventCreate);
        assert_eq!(api.calls(), vec!["list"]);
    }

    #[tokio::test]
    async fn test_no_session_requests_nothing() {
        let api = FakeEvents::with_events(vec![sample_event("e1", "Launch", &[])]);
        let (ctx, _store) = logged_out(api.clone());

        let mut view = EventsList::new(&ctx);
        assert_eq!(view.activate().await, Activation::NoSession);
        assert!(view.events().is_empty());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_list() {
        let api = FakeEvents::with_events(vec![sample_event("e1", "Launch", &[])]);
        let (ctx, _store) = logged_in(api.clone()).await;

        let mut view = EventsList::new(&ctx);
        view.activate().await;

        api.set_failing(true);
        assert_eq!(view.activate().await, Activation::Failed);
        assert_eq!(view.events().len(), 1);
        assert_eq!(view.last_error(), Some("API error 500: boom"));

        api.set_failing(false);
        assert_eq!(view.activate().await, Activation::Loaded);
        assert_eq!(view.last_error(), None);
    }

    #[tokio::test]
    async fn test_torn_down_view_ignores_response() {
        let api = FakeEvents::with_events(vec![sample_event("e1", "Launch", &[])]);
        let (ctx, _store) = logged_in(api).await;

        let mut view = EventsList::new(&ctx);
        view.teardown();
        assert_eq!(view.activate().await, Activation::TornDown);
        assert!(view.events().is_empty());
    }

    #[tokio::test]
    async fn test_shutdown_tears_down_every_view() {
        let api = FakeEvents::with_events(vec![]);
        let (ctx, _store) = logged_in(api).await;

        let mut view = EventsList::new(&ctx);
        ctx.shutdown();
        assert_eq!(view.activate().await, Activation::TornDown);
    }

    #[tokio::test]
    async fn test_reopened_list_refetches_after_abandoned_request() {
        use std::sync::atomic::Ordering;
        use std::time::Duration;

        let api = FakeEvents::with_events(vec![sample_event("e1", "Launch", &[])]);
        let (ctx, _store) = logged_in(api.clone()).await;
        api.stall_lists.store(true, Ordering::SeqCst);

        let mut closed = EventsList::new(&ctx);
        let abandoned = tokio::time::timeout(Duration::from_millis(10), closed.activate()).await;
        assert!(abandoned.is_err());
        closed.teardown();
        drop(closed);

        api.stall_lists.store(false, Ordering::SeqCst);
        api.events.lock().unwrap().push(sample_event("e2", "Retro", &[]));

        let mut reopened = EventsList::new(&ctx);
        assert_eq!(reopened.activate().await, Activation::Loaded);
        assert_eq!(reopened.events().len(), 2);
        assert_eq!(api.calls(), vec!["list", "list"]);
    }
}
