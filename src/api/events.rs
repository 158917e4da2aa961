//! Event operations.

use reqwest::Method;

use super::{ApiClient, ApiError};
use crate::models::{Event, EventUpdate, NewEvent};

impl ApiClient {
    /// `GET /events`.
    pub async fn list_events(&self) -> Result<Vec<Event>, ApiError> {
        self.get_json("/events").await
    }

    /// `GET /events/:id`.
    pub async fn get_event(&self, id: &str) -> Result<Event, ApiError> {
        self.get_json(&format!("/events/{}", id)).await
    }

    /// `POST /events` (admin).
    pub async fn create_event(&self, event: &NewEvent) -> Result<Event, ApiError> {
        self.send_json(Method::POST, "/events", event).await
    }

    /// `PUT /events/:id` (admin). Only the fields set in `update` go on the
    /// wire.
    pub async fn update_event(&self, id: &str, update: &EventUpdate) -> Result<Event, ApiError> {
        self.send_json(Method::PUT, &format!("/events/{}", id), update)
            .await
    }

    /// `DELETE /events/:id` (admin).
    pub async fn delete_event(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/events/{}", id)).await
    }
}
