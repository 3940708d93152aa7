// src/services/feed.rs

//! Shared contract for sub-feed processors.

use thiserror::Error;

use crate::models::{FeedSnapshot, NotificationRecord, SubFeed};

/// A feed item reduced to what change detection and delivery need.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Stable identifier recorded in history
    pub id: String,
    pub record: NotificationRecord,
}

/// Why a sub-feed was left alone for this run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("no response from upstream")]
    Unavailable,

    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("response has no '{0}' array")]
    MissingItems(&'static str),

    #[error("expected exactly {expected} items, found {actual}")]
    UnexpectedCount { expected: usize, actual: usize },

    #[error("item list is empty")]
    Empty,

    #[error("item {index} is malformed: {message}")]
    MalformedItem { index: usize, message: String },
}

/// Turns one sub-feed of a snapshot into notification candidates.
pub trait FeedProcessor: Send + Sync {
    /// Sub-feed handled by this processor.
    fn feed(&self) -> SubFeed;

    /// Validate the snapshot and extract candidates in feed order.
    fn candidates(&self, snapshot: &FeedSnapshot) -> Result<Vec<Candidate>, SkipReason>;
}
