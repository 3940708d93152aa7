//! Pipeline entry points.
//!
//! - `run_broadcast`: Fetch both sub-feeds, notify new items, persist history
//! - `run_validate`: Check configuration without touching the network

pub mod broadcast;
pub mod diff;
pub mod validate;

pub use broadcast::{RunSummary, run_broadcast};
pub use diff::{FeedOutcome, FeedReport};
pub use validate::run_validate;
