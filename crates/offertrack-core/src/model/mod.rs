//! Offer, follow-up, and notification records.
//!
//! The serialized shape of these types is the persisted record format; field
//! names (camelCase, including the legacy `followupDate`) must stay stable so
//! existing stores keep loading.

mod followup;
mod notification;
mod offer;

pub use followup::{ActiveFollowup, FollowupItem};
pub use notification::Notification;
pub use offer::{Csat, Offer};
