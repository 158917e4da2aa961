use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::Event;

/// A booking, created only via the booking operation and never mutated
/// client-side.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub event_id: String,
    pub event: Event,
    pub created_at: DateTime<Utc>,
}
