//! Event detail view
//!
//! Shows one event with its participants and exposes the two mutations that
//! operate on it: adding a participant and deleting the event.

use crate::api::Event;
use crate::fetch::ViewScope;
use crate::routes::Route;

use super::{load, mutate, Activation, ViewContext, ViewError};

pub struct EventDetail {
    ctx: ViewContext,
    scope: ViewScope,
    event_id: String,
    event: Option<Event>,
    participants: Vec<String>,
    new_participant: String,
    last_error: Option<String>,
}

impl EventDetail {
    pub fn new(ctx: &ViewContext, event_id: impl Into<String>) -> Self {
        Self {
            ctx: ctx.clone(),
            scope: ctx.scope(),
            event_id: event_id.into(),
            event: None,
            participants: Vec::new(),
            new_participant: String::new(),
            last_error: None,
        }
    }

    /// Fetch the event and its participant ids
    pub async fn activate(&mut self) -> Activation {
        let Some(token) = self.ctx.token() else {
            return Activation::NoSession;
        };

        let what = format!("event {}", self.event_id);
        let fetch = self.ctx.event(&token, &self.event_id);
        match load(&self.scope, &what, &mut self.last_error, fetch).await {
            Ok(event) => {
                self.participants = event.participant_ids();
                self.event = Some(event.as_ref().clone());
                Activation::Loaded
            }
            Err(outcome) => outcome,
        }
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn event(&self) -> Option<&Event> {
        self.event.as_ref()
    }

    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    /// Draft user id for the add-participant input
    pub fn new_participant(&self) -> &str {
        &self.new_participant
    }

    pub fn set_new_participant(&mut self, user_id: impl Into<String>) {
        self.new_participant = user_id.into();
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Add the drafted user id.
    ///
    /// On success the id is appended locally and the draft cleared; the
    /// event is not fetched again.
    pub async fn add_participant(&mut self) -> Result<(), ViewError> {
        let user_id = self.new_participant.trim().to_string();
        if user_id.is_empty() {
            return Err(ViewError::MissingField("User ID"));
        }
        let token = self.ctx.token().ok_or(ViewError::NoSession)?;

        let api = self.ctx.api();
        let ids = [user_id.clone()];
        mutate(
            &self.scope,
            "add participant",
            api.add_participants(&token, &self.event_id, &ids),
        )
        .await?;

        tracing::info!(event_id = %self.event_id, user_id = %user_id, "Participant added");
        self.participants.push(user_id);
        self.new_participant.clear();
        Ok(())
    }

    /// Delete the event; on success navigate back to the list
    pub async fn delete(&mut self) -> Result<Route, ViewError> {
        let token = self.ctx.token().ok_or(ViewError::NoSession)?;

        let api = self.ctx.api();
        mutate(
            &self.scope,
            "delete event",
            api.delete_event(&token, &self.event_id),
        )
        .await?;

        tracing::info!(event_id = %self.event_id, "Event deleted");
        Ok(Route::Events)
    }

    pub fn teardown(&self) {
        self.scope.teardown();
    }
}
