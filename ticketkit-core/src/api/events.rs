//! Event and ticket-type management endpoints.
//!
//! Ticket types are addressed by their name within the event, so names
//! are percent-encoded into the path.

use serde_json::Value;

use super::{path_segment, query_string};
use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{
    Event, EventForm, EventQuery, EventUpdate, Paginated, TicketTypeForm, TicketTypeUpdate,
};

const EVENTS_ENDPOINT: &str = "/tickets/events";

impl ApiClient {
    /// Lists the vendor's events, filtered and paginated by `query`.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error.
    pub async fn events(&self, query: &EventQuery) -> Result<Paginated<Event>> {
        self.get(&format!("{EVENTS_ENDPOINT}{}", query_string(&query.pairs())))
            .await
    }

    /// Fetches one event.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error.
    pub async fn event(&self, id: &str) -> Result<Event> {
        self.get(&format!("{EVENTS_ENDPOINT}/{}", path_segment(id)))
            .await
    }

    /// Creates an event in draft state.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error.
    pub async fn create_event(&self, form: &EventForm) -> Result<Event> {
        self.post(EVENTS_ENDPOINT, form).await
    }

    /// Applies a partial update to an event.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error.
    pub async fn update_event(&self, id: &str, update: &EventUpdate) -> Result<Event> {
        self.put(&format!("{EVENTS_ENDPOINT}/{}", path_segment(id)), update)
            .await
    }

    /// Deletes an event.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error.
    pub async fn delete_event(&self, id: &str) -> Result<()> {
        let _: Value = self
            .delete(&format!("{EVENTS_ENDPOINT}/{}", path_segment(id)))
            .await?;
        Ok(())
    }

    /// Puts an event on sale.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error.
    pub async fn publish_event(&self, id: &str) -> Result<Event> {
        self.put_empty(&format!("{EVENTS_ENDPOINT}/{}/publish", path_segment(id)))
            .await
    }

    /// Takes an event off sale, back to draft.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error.
    pub async fn unpublish_event(&self, id: &str) -> Result<Event> {
        self.put_empty(&format!(
            "{EVENTS_ENDPOINT}/{}/unpublish",
            path_segment(id)
        ))
        .await
    }

    /// Adds a ticket tier to an event. Returns the updated event.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error.
    pub async fn add_ticket_type(&self, event_id: &str, form: &TicketTypeForm) -> Result<Event> {
        self.post(
            &format!("{EVENTS_ENDPOINT}/{}/tickets", path_segment(event_id)),
            form,
        )
        .await
    }

    /// Applies a partial update to the tier named `name`.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error.
    pub async fn update_ticket_type(
        &self,
        event_id: &str,
        name: &str,
        update: &TicketTypeUpdate,
    ) -> Result<Event> {
        self.put(
            &format!(
                "{EVENTS_ENDPOINT}/{}/tickets/{}",
                path_segment(event_id),
                path_segment(name)
            ),
            update,
        )
        .await
    }

    /// Removes the tier named `name`. Returns the updated event.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error.
    pub async fn delete_ticket_type(&self, event_id: &str, name: &str) -> Result<Event> {
        self.delete(&format!(
            "{EVENTS_ENDPOINT}/{}/tickets/{}",
            path_segment(event_id),
            path_segment(name)
        ))
        .await
    }

    /// Adjusts the tier's total quantity by a signed delta.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error, including rejection of an adjustment
    /// below the number already sold.
    pub async fn adjust_ticket_quantity(
        &self,
        event_id: &str,
        name: &str,
        adjustment: i32,
    ) -> Result<Event> {
        self.patch(
            &format!(
                "{EVENTS_ENDPOINT}/{}/tickets/{}/adjust",
                path_segment(event_id),
                path_segment(name)
            ),
            &serde_json::json!({ "adjustment": adjustment }),
        )
        .await
    }

    /// Sets or clears the tier's manual sold-out override.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error.
    pub async fn set_ticket_sold_out(
        &self,
        event_id: &str,
        name: &str,
        is_sold_out: bool,
    ) -> Result<Event> {
        self.patch(
            &format!(
                "{EVENTS_ENDPOINT}/{}/tickets/{}/sold-out",
                path_segment(event_id),
                path_segment(name)
            ),
            &serde_json::json!({ "isSoldOut": is_sold_out }),
        )
        .await
    }
}
