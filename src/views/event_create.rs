//! Event creation form

use crate::api::{Capacity, EventType, NewEvent};
use crate::fetch::ViewScope;
use crate::routes::Route;

use super::{mutate, ViewContext, ViewError};

/// Raw form values, as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventForm {
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub event_type: EventType,
    /// Capacity text; parsed only at submit
    pub capacity: String,
}

impl EventForm {
    /// Check that every required field has a value
    pub fn validate(&self) -> Result<(), ViewError> {
        let required = [
            ("Event Name", &self.name),
            ("Description", &self.description),
            ("Start Date", &self.start_date),
            ("End Date", &self.end_date),
            ("Capacity", &self.capacity),
        ];
        match required.iter().find(|(_, value)| value.is_empty()) {
            Some((field, _)) => Err(ViewError::MissingField(*field)),
            None => Ok(()),
        }
    }

    /// Payload sent to the API. Capacity text without a leading integer
    /// becomes [`Capacity::NotANumber`].
    pub fn to_payload(&self) -> NewEvent {
        NewEvent {
            name: self.name.clone(),
            description: self.description.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            event_type: self.event_type,
            capacity: Capacity::parse(&self.capacity),
        }
    }
}

pub struct EventCreate {
    ctx: ViewContext,
    scope: ViewScope,
    pub form: EventForm,
}

impl EventCreate {
    pub fn new(ctx: &ViewContext) -> Self {
        Self {
            ctx: ctx.clone(),
            scope: ctx.scope(),
            form: EventForm::default(),
        }
    }

    /// Post the form; on success navigate to the events list
    pub async fn submit(&mut self) -> Result<Route, ViewError> {
        self.form.validate()?;
        let token = self.ctx.token().ok_or(ViewError::NoSession)?;

        let payload = self.form.to_payload();
        if payload.capacity.is_nan() {
            tracing::warn!(capacity = %self.form.capacity, "Capacity is not a number");
        }

        let api = self.ctx.api();
        let created = mutate(&self.scope, "create event", api.create_event(&token, &payload)).await?;

        tracing::info!(event_id = %created.id, name = %created.name, "Event created");
        Ok(Route::Events)
    }

    pub fn teardown(&self) {
        self.scope.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::{logged_in, FakeEvents};

    fn filled_form() -> EventForm {
        EventForm {
            name: "Launch".to_string(),
            description: "Product launch".to_string(),
            start_date: "2024-06-01T09:00".to_string(),
            end_date: "2024-06-01T17:00".to_string(),
            event_type: EventType::Hybrid,
            capacity: "250".to_string(),
        }
    }

    #[test]
    fn test_default_type_is_virtual() {
        assert_eq!(EventForm::default().event_type, EventType::Virtual);
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        let mut form = filled_form();
        assert!(form.validate().is_ok());

        form.start_date.clear();
        form.capacity.clear();
        let err = form.validate().unwrap_err();
        assert_eq!(err.to_string(), "Start Date is required");
    }

    #[test]
    fn test_payload_capacity_uses_parse_int_rules() {
        let mut form = filled_form();
        form.capacity = "12 seats".to_string();
        assert_eq!(form.to_payload().capacity, Capacity::Count(12));

        form.capacity = "abc".to_string();
        let json = serde_json::to_value(form.to_payload()).unwrap();
        assert!(json["capacity"].is_null());
        assert_eq!(json["type"], "HYBRID");
        assert_eq!(json["startDate"], "2024-06-01T09:00");
    }

    #[tokio::test]
    async fn test_submit_posts_and_navigates() {
        let api = FakeEvents::with_events(vec![]);
        let (ctx, _store) = logged_in(api.clone()).await;

        let mut view = EventCreate::new(&ctx);
        view.form = filled_form();
        assert_eq!(view.submit().await.unwrap(), Route::Events);

        let created = api.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].capacity, Capacity::Count(250));
    }

    #[tokio::test]
    async fn test_incomplete_form_is_not_sent() {
        let api = FakeEvents::with_events(vec![]);
        let (ctx, _store) = logged_in(api.clone()).await;

        let mut view = EventCreate::new(&ctx);
        let err = view.submit().await.unwrap_err();
        assert!(matches!(err, ViewError::MissingField("Event Name")));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_submit_keeps_form() {
        let api = FakeEvents::with_events(vec![]);
        api.set_failing(true);
        let (ctx, _store) = logged_in(api).await;

        let mut view = EventCreate::new(&ctx);
        view.form = filled_form();
        assert!(matches!(view.submit().await, Err(ViewError::Api(_))));
        assert_eq!(view.form, filled_form());
    }
}
