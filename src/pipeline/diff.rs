//! Change detection for a single sub-feed.
//!
//! Compares the candidates of the current snapshot with the identifiers
//! recorded on the previous run and dispatches a notification for every
//! identifier that was not seen before.
//!
//! History only advances past items whose notification was accepted. A
//! failed item is left out of the proposed history so that it is detected as
//! new again on the next run.

use std::collections::HashSet;
use std::fmt;

use crate::models::SubFeed;
use crate::services::{Candidate, Notifier, SkipReason};
use crate::utils::log::success;

/// What happened to a sub-feed during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedOutcome {
    /// Nothing was fetched or the response was rejected
    Skipped(SkipReason),
    /// First tracked run: identifiers recorded, nothing sent
    Baseline { tracked: usize },
    /// No identifiers outside history
    Unchanged,
    /// New identifiers were dispatched, at least one successfully
    Updated { delivered: usize, failed: usize },
    /// New identifiers were found but none was delivered
    Undelivered { failed: usize },
}

impl fmt::Display for FeedOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedOutcome::Skipped(reason) => write!(f, "skipped ({})", reason),
            FeedOutcome::Baseline { tracked } => write!(f, "baseline of {} items", tracked),
            FeedOutcome::Unchanged => f.write_str("not updated"),
            FeedOutcome::Updated { delivered, failed } => {
                write!(f, "{} delivered, {} failed", delivered, failed)
            }
            FeedOutcome::Undelivered { failed } => {
                write!(f, "not updated, {} failed", failed)
            }
        }
    }
}

/// Result of processing one sub-feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedReport {
    pub feed: SubFeed,
    pub outcome: FeedOutcome,
    /// Replacement history; `None` leaves the recorded identifiers untouched
    pub history: Option<Vec<String>>,
}

impl FeedReport {
    /// Report for a sub-feed that was not processed.
    pub fn skipped(feed: SubFeed, reason: SkipReason) -> Self {
        Self {
            feed,
            outcome: FeedOutcome::Skipped(reason),
            history: None,
        }
    }
}

/// Candidates whose identifiers are absent from `past`, in feed order.
///
/// Repeated identifiers within the snapshot are returned once.
pub fn new_candidates<'a>(past: &[String], candidates: &'a [Candidate]) -> Vec<&'a Candidate> {
    let seen: HashSet<&str> = past.iter().map(String::as_str).collect();
    let mut emitted = HashSet::new();

    candidates
        .iter()
        .filter(|c| !seen.contains(c.id.as_str()))
        .filter(|c| emitted.insert(c.id.as_str()))
        .collect()
}

/// Detect new items, dispatch them, and propose the next history.
pub async fn apply_delta(
    feed: SubFeed,
    past: &[String],
    candidates: Vec<Candidate>,
    notifier: &dyn Notifier,
) -> FeedReport {
    let current: Vec<String> = candidates.iter().map(|c| c.id.clone()).collect();

    if past.is_empty() {
        log::info!(
            "{} previously untracked, latest feed will be saved to history",
            feed.label()
        );
        return FeedReport {
            feed,
            outcome: FeedOutcome::Baseline {
                tracked: current.len(),
            },
            history: Some(current),
        };
    }

    let fresh = new_candidates(past, &candidates);
    if fresh.is_empty() {
        log::info!("{} not updated", feed.label());
        return FeedReport {
            feed,
            outcome: FeedOutcome::Unchanged,
            history: None,
        };
    }

    let mut failed: HashSet<&str> = HashSet::new();
    for candidate in &fresh {
        success(&format!("New {}, {}", feed.label(), candidate.id));
        if !notifier.notify(&candidate.record).await {
            log::error!(
                "{} item {} was not delivered, it will be retried next run",
                feed.label(),
                candidate.id
            );
            failed.insert(candidate.id.as_str());
        }
    }

    let delivered = fresh.len() - failed.len();
    if delivered == 0 {
        log::info!("{} not updated, every new item failed", feed.label());
        return FeedReport {
            feed,
            outcome: FeedOutcome::Undelivered {
                failed: failed.len(),
            },
            history: None,
        };
    }

    let history = current
        .iter()
        .filter(|id| !failed.contains(id.as_str()))
        .cloned()
        .collect();

    FeedReport {
        feed,
        outcome: FeedOutcome::Updated {
            delivered,
            failed: failed.len(),
        },
        history: Some(history),
    }
}
