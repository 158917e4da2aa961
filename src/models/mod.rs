//! Wire types for the event booking API.
//!
//! These mirror the backend's JSON shapes exactly (camelCase on the wire
//! where the server uses it). Server-owned resources are read-mostly on the
//! client; updates send only the edited subset back.

mod booking;
mod event;
mod tag;
mod user;

pub use booking::Booking;
pub use event::{Event, EventUpdate, NewEvent};
pub use tag::{NewTag, Tag};
pub use user::{AuthResponse, Credentials, Registration, Role, User};
