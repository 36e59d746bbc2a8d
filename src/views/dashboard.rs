//! Dashboard landing summary

use crate::fetch::ViewScope;

use super::{load, Activation, ViewContext};

/// Landing page; shows only how many events exist
pub struct DashboardSummary {
    ctx: ViewContext,
    scope: ViewScope,
    event_count: usize,
    last_error: Option<String>,
}

impl DashboardSummary {
    pub fn new(ctx: &ViewContext) -> Self {
        Self {
            ctx: ctx.clone(),
            scope: ctx.scope(),
            event_count: 0,
            last_error: None,
        }
    }

    pub async fn activate(&mut self) -> Activation {
        let Some(token) = self.ctx.token() else {
            return Activation::NoSession;
        };

        match load(&self.scope, "events", &mut self.last_error, self.ctx.events(&token)).await {
            Ok(events) => {
                self.event_count = events.len();
                Activation::Loaded
            }
            Err(outcome) => outcome,
        }
    }

    pub fn event_count(&self) -> usize {
        self.event_count
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn teardown(&self) {
        self.scope.teardown();
    }
}
