// src/pipeline/broadcast.rs

//! Single-run orchestration.
//!
//! Sub-feeds are processed one after another against one in-memory history.
//! History is written once, after every sub-feed has finished, so an
//! interrupted run never leaves a partially updated record behind.

use crate::error::Result;
use crate::models::{Config, FeedSnapshot, HistoryState, SubFeed};
use crate::pipeline::diff::{FeedReport, apply_delta};
use crate::services::{
    DiscordNotifier, FeedProcessor, Notifier, SkipReason, Transport, processor_for,
};
use crate::storage::{HistoryStore, LoadedHistory};
use crate::utils::log::{header, success, summary};

/// State shared by the sub-feeds of one run.
#[derive(Debug)]
pub struct RunContext<'a> {
    pub config: &'a Config,
    pub history: HistoryState,
    /// History differs from what is persisted
    pub changed: bool,
}

impl<'a> RunContext<'a> {
    pub fn new(config: &'a Config, loaded: LoadedHistory) -> Self {
        Self {
            config,
            history: loaded.state,
            changed: loaded.created,
        }
    }

    /// Apply a processor's proposed history.
    pub fn commit(&mut self, report: &FeedReport) {
        if let Some(ids) = &report.history {
            self.history.set(report.feed, ids.clone());
            self.changed = true;
        }
    }
}

/// Outcome of a complete run.
#[derive(Debug)]
pub struct RunSummary {
    pub reports: Vec<FeedReport>,
    pub history: HistoryState,
    pub changed: bool,
    /// History was written to storage
    pub saved: bool,
}

/// Fetch, validate and diff one sub-feed.
pub async fn process_feed(
    processor: &dyn FeedProcessor,
    language: &str,
    ctx: &RunContext<'_>,
    transport: &dyn Transport,
    notifier: &dyn Notifier,
) -> FeedReport {
    let feed = processor.feed();
    let url = ctx.config.feed.feed_url(language);

    let Some(raw) = transport.get_json(&url).await else {
        log::debug!("{} unavailable, skipping", feed.label());
        return FeedReport::skipped(feed, SkipReason::Unavailable);
    };

    let Some(snapshot) = FeedSnapshot::from_value(raw) else {
        log::debug!("{} response invalid, {}", feed.label(), SkipReason::NotAnObject);
        return FeedReport::skipped(feed, SkipReason::NotAnObject);
    };

    let candidates = match processor.candidates(&snapshot) {
        Ok(candidates) => candidates,
        Err(reason) => {
            log::debug!("{} response invalid, {}", feed.label(), reason);
            return FeedReport::skipped(feed, reason);
        }
    };

    apply_delta(feed, ctx.history.get(feed), candidates, notifier).await
}

/// Run every enabled sub-feed and persist history if it changed.
pub async fn run_broadcast(
    config: &Config,
    storage: &dyn HistoryStore,
    transport: &dyn Transport,
) -> Result<RunSummary> {
    header("Broadcast");

    let loaded = storage.load().await?;
    let mut ctx = RunContext::new(config, loaded);
    let notifier = DiscordNotifier::new(transport, config.discord.clone());

    let mut reports = Vec::new();
    for feed in SubFeed::ALL {
        let source = config.sources.get(feed);
        if !source.enable {
            log::debug!("{} disabled", feed.label());
            continue;
        }

        let processor = processor_for(feed, &config.feed);
        let report =
            process_feed(processor.as_ref(), &source.language, &ctx, transport, &notifier).await;
        ctx.commit(&report);
        reports.push(report);
    }

    let saved = persist(&ctx, storage).await?;

    summary(
        "Run",
        &reports
            .iter()
            .map(|r| (r.feed.history_key(), r.outcome.to_string()))
            .collect::<Vec<_>>(),
    );
    success("Finished processing feeds");

    Ok(RunSummary {
        reports,
        history: ctx.history,
        changed: ctx.changed,
        saved,
    })
}

/// Write history when changed, unless running in debug mode.
async fn persist(ctx: &RunContext<'_>, storage: &dyn HistoryStore) -> Result<bool> {
    if !ctx.changed {
        return Ok(false);
    }
    if ctx.config.debug {
        log::warn!("Debug is active, not saving feed history");
        return Ok(false);
    }

    storage.save(&ctx.history).await?;
    success("Saved feed history");
    Ok(true)
}
