//! Booking operations.

use reqwest::Method;
use serde::Serialize;

use super::{ApiClient, ApiError};
use crate::models::Booking;

#[derive(Debug, Serialize)]
struct CreateBookingRequest<'a> {
    #[serde(rename = "eventId")]
    event_id: &'a str,
}

impl ApiClient {
    /// `POST /bookings`. Whether double-booking the same event is allowed is
    /// the backend's call; the client does not second-guess it.
    pub async fn create_booking(&self, event_id: &str) -> Result<Booking, ApiError> {
        self.send_json(Method::POST, "/bookings", &CreateBookingRequest { event_id })
            .await
    }

    /// `GET /bookings/user`: bookings belonging to the authenticated user.
    pub async fn list_my_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        self.get_json("/bookings/user").await
    }
}
