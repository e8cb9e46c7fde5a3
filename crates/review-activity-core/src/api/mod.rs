//! Review API access.
//!
//! One endpoint is used: the list of the reviewer's completed submissions.

mod client;
mod events;

pub use client::ReviewClient;
pub use events::{decode_events, ReviewEvent};
