//! offertrack-core library.
//!
//! Domain model and follow-up lifecycle engine for the `ot` tracker:
//! offers with follow-up history, status classification against a given day,
//! agenda buckets, notification derivation, analytics, and the JSON store.
//!
//! # Conventions
//!
//! - **Errors**: typed [`error::Error`] for store/config/lookup failures;
//!   engine validation failures are boolean `false` returns, never errors.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`).
//! - **Time**: commands inject a [`clock::Clock`]; nothing below the CLI
//!   reads the wall clock directly.

pub mod analytics;
pub mod clock;
pub mod config;
pub mod error;
pub mod id;
pub mod lifecycle;
pub mod lock;
pub mod model;
pub mod notify;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Error, ErrorCode};
pub use lifecycle::{FollowupBuckets, FollowupStatus, bucketize, classify};
pub use model::{ActiveFollowup, Csat, FollowupItem, Notification, Offer};
pub use notify::{NotificationLedger, Ticker};
pub use store::Store;
