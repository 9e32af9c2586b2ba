//! The follow-up lifecycle engine.
//!
//! Three layers, all pure with respect to the store:
//!
//! - [`classify`] — one offer's status against a given day.
//! - [`bucketize`] — list-level partition into agenda buckets.
//! - [`ops`] — the boolean-success mutations (add / complete / clear).

mod buckets;
mod classify;
pub mod ops;

pub use buckets::{FollowupBuckets, bucketize};
pub use classify::{FollowupStatus, UnknownStatus, classify};
