//! Analytics view
//!
//! Lists events for the selector, picks the first one by default and loads
//! the analytics snapshot of whichever event is selected.

use crate::api::{Event, EventAnalytics};
use crate::fetch::ViewScope;

use super::chart::DualAxisChart;
use super::{load, Activation, ViewContext};

/// Values shown on the summary cards
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsSummary {
    pub total_participants: u64,
    /// Overall engagement with two decimals
    pub overall_engagement: String,
    pub session_count: usize,
}

impl From<&EventAnalytics> for AnalyticsSummary {
    fn from(analytics: &EventAnalytics) -> Self {
        Self {
            total_participants: analytics.total_participants,
            overall_engagement: format!("{:.2}", analytics.overall_engagement),
            session_count: analytics.sessions.len(),
        }
    }
}

pub struct AnalyticsView {
    ctx: ViewContext,
    scope: ViewScope,
    events: Vec<Event>,
    selected: Option<String>,
    analytics: Option<EventAnalytics>,
    last_error: Option<String>,
}

impl AnalyticsView {
    pub fn new(ctx: &ViewContext) -> Self {
        Self {
            ctx: ctx.clone(),
            scope: ctx.scope(),
            events: Vec::new(),
            selected: None,
            analytics: None,
            last_error: None,
        }
    }

    /// Start with `event_id` selected; kept by [`activate`](Self::activate)
    /// as long as the event is still listed
    pub fn with_selection(mut self, event_id: impl Into<String>) -> Self {
        self.selected = Some(event_id.into());
        self
    }

    /// Load the event list, then the snapshot for the selection
    pub async fn activate(&mut self) -> Activation {
        let Some(token) = self.ctx.token() else {
            return Activation::NoSession;
        };

        match load(&self.scope, "events", &mut self.last_error, self.ctx.events(&token)).await {
            Ok(events) => self.events = events.as_ref().clone(),
            Err(outcome) => return outcome,
        }

        let still_listed = self
            .selected
            .as_ref()
            .is_some_and(|id| self.events.iter().any(|e| &e.id == id));
        if !still_listed {
            self.selected = self.events.first().map(|e| e.id.clone());
            self.analytics = None;
        }

        self.refresh(&token).await
    }

    /// Select an event and load its snapshot
    pub async fn select(&mut self, event_id: impl Into<String>) -> Activation {
        let Some(token) = self.ctx.token() else {
            return Activation::NoSession;
        };
        let event_id = event_id.into();
        if self.selected.as_deref() != Some(event_id.as_str()) {
            self.selected = Some(event_id);
            self.analytics = None;
        }
        self.refresh(&token).await
    }

    async fn refresh(&mut self, token: &str) -> Activation {
        let Some(event_id) = self.selected.clone() else {
            return Activation::Loaded;
        };

        let what = format!("analytics for {}", event_id);
        let fetch = self.ctx.analytics(token, &event_id);
        match load(&self.scope, &what, &mut self.last_error, fetch).await {
            Ok(analytics) => {
                self.analytics = Some(analytics.as_ref().clone());
                Activation::Loaded
            }
            Err(outcome) => outcome,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn analytics(&self) -> Option<&EventAnalytics> {
        self.analytics.as_ref()
    }

    pub fn summary(&self) -> Option<AnalyticsSummary> {
        self.analytics.as_ref().map(AnalyticsSummary::from)
    }

    /// Session chart; only when the snapshot has sessions
    pub fn chart(&self) -> Option<DualAxisChart> {
        self.analytics
            .as_ref()
            .and_then(|a| DualAxisChart::from_sessions(&a.sessions))
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn teardown(&self) {
        self.scope.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SessionAnalytics;
    use crate::views::testing::{logged_in, logged_out, sample_event, FakeEvents};
    use std::sync::Arc;

    fn snapshot(total: u64, engagement: f64, sessions: usize) -> EventAnalytics {
        EventAnalytics {
            total_participants: total,
            sessions: (0..sessions)
                .map(|i| SessionAnalytics {
                    id: format!("s{}", i),
                    name: format!("Session {}", i),
                    interaction_count: 10 * (i as u64 + 1),
                    unique_participants: i as u64 + 1,
                    average_sentiment: 0.0,
                })
                .collect(),
            overall_engagement: engagement,
        }
    }

    fn api_with_analytics() -> Arc<FakeEvents> {
        let api = FakeEvents::with_events(vec![
            sample_event("e1", "Launch", &[]),
            sample_event("e2", "Retro", &[]),
        ]);
        {
            let mut analytics = api.analytics.lock().unwrap();
            analytics.insert("e1".to_string(), snapshot(42, 0.8765, 3));
            analytics.insert("e2".to_string(), snapshot(7, 1.0, 0));
        }
        api
    }

    #[tokio::test]
    async fn test_first_event_selected_by_default() {
        let api = api_with_analytics();
        let (ctx, _store) = logged_in(api.clone()).await;

        let mut view = AnalyticsView::new(&ctx);
        assert_eq!(view.activate().await, Activation::Loaded);
        assert_eq!(view.selected(), Some("e1"));
        assert_eq!(api.calls(), vec!["list", "analytics e1"]);

        let summary = view.summary().unwrap();
        assert_eq!(summary.total_participants, 42);
        assert_eq!(summary.overall_engagement, "0.88");
        assert_eq!(summary.session_count, 3);
        assert_eq!(view.chart().unwrap().labels.len(), 3);
    }

    #[tokio::test]
    async fn test_select_loads_other_snapshot() {
        let api = api_with_analytics();
        let (ctx, _store) = logged_in(api).await;

        let mut view = AnalyticsView::new(&ctx);
        view.activate().await;
        assert_eq!(view.select("e2").await, Activation::Loaded);

        assert_eq!(view.selected(), Some("e2"));
        assert_eq!(view.summary().unwrap().overall_engagement, "1.00");
        assert!(view.chart().is_none());
    }

    #[tokio::test]
    async fn test_no_events_means_no_selection() {
        let api = FakeEvents::with_events(vec![]);
        let (ctx, _store) = logged_in(api.clone()).await;

        let mut view = AnalyticsView::new(&ctx);
        assert_eq!(view.activate().await, Activation::Loaded);
        assert_eq!(view.selected(), None);
        assert!(view.summary().is_none());
        assert_eq!(api.calls(), vec!["list"]);
    }

    #[tokio::test]
    async fn test_failed_snapshot_keeps_previous() {
        let api = api_with_analytics();
        let (ctx, _store) = logged_in(api.clone()).await;

        let mut view = AnalyticsView::new(&ctx);
        view.activate().await;
        api.set_failing(true);

        assert_eq!(view.select("e1").await, Activation::Failed);
        assert_eq!(view.summary().unwrap().total_participants, 42);
        assert!(view.last_error().is_some());
    }

    #[tokio::test]
    async fn test_logged_out_view_stays_empty() {
        let api = api_with_analytics();
        let (ctx, _store) = logged_out(api.clone());

        let mut view = AnalyticsView::new(&ctx);
        assert_eq!(view.activate().await, Activation::NoSession);
        assert_eq!(view.select("e1").await, Activation::NoSession);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_preselected_event_skips_first_snapshot() {
        let api = api_with_analytics();
        api.analytics.lock().unwrap().remove("e1");
        let (ctx, _store) = logged_in(api.clone()).await;

        let mut view = AnalyticsView::new(&ctx).with_selection("e2");
        assert_eq!(view.activate().await, Activation::Loaded);
        assert_eq!(view.selected(), Some("e2"));
        assert_eq!(view.summary().unwrap().total_participants, 7);
        assert_eq!(api.calls(), vec!["list", "analytics e2"]);
    }

    #[tokio::test]
    async fn test_unlisted_preselection_falls_back_to_first() {
        let api = api_with_analytics();
        let (ctx, _store) = logged_in(api.clone()).await;

        let mut view = AnalyticsView::new(&ctx).with_selection("gone");
        assert_eq!(view.activate().await, Activation::Loaded);
        assert_eq!(view.selected(), Some("e1"));
        assert_eq!(api.calls(), vec!["list", "analytics e1"]);
    }
}
