// src/services/relay.rs

//! Log forwarding to a Discord webhook.
//!
//! `log::Log::log` is synchronous while delivery goes through the async
//! [`Transport`], so records are queued during the run and posted by
//! [`LogRelay::flush`] once it ends, one message per record.

use std::mem;
use std::sync::{Arc, Mutex, RwLock};

use chrono::Utc;
use log::{LevelFilter, Log, Metadata, Record};
use serde_json::json;

use crate::services::Transport;
use crate::utils::log::apply_severity;

/// Discord's message content limit
pub const CONTENT_LIMIT: usize = 2000;

const FENCE: &str = "```";

/// Thresholds and pending records shared with the installed logger.
#[derive(Debug)]
pub struct LogRelay {
    console: RwLock<LevelFilter>,
    remote: RwLock<LevelFilter>,
    pending: Mutex<Vec<String>>,
}

impl Default for LogRelay {
    fn default() -> Self {
        Self {
            console: RwLock::new(LevelFilter::Info),
            remote: RwLock::new(LevelFilter::Off),
            pending: Mutex::default(),
        }
    }
}

impl LogRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the console and webhook thresholds.
    ///
    /// The global max level follows the more verbose of the two.
    pub fn configure(&self, console: LevelFilter, remote: LevelFilter) {
        if let Ok(mut level) = self.console.write() {
            *level = console;
        }
        if let Ok(mut level) = self.remote.write() {
            *level = remote;
        }
        apply_severity(console.max(remote));
    }

    fn console(&self) -> LevelFilter {
        self.console.read().map(|l| *l).unwrap_or(LevelFilter::Off)
    }

    fn remote(&self) -> LevelFilter {
        self.remote.read().map(|l| *l).unwrap_or(LevelFilter::Off)
    }

    /// Queue a record of this crate if it passes the webhook threshold.
    pub fn capture(&self, record: &Record) {
        if record.level() > self.remote() || !is_own_target(record.target()) {
            return;
        }
        if let Ok(mut pending) = self.pending.lock() {
            pending.push(format_record(record));
        }
    }

    /// Number of queued messages.
    pub fn pending(&self) -> usize {
        self.pending.lock().map(|p| p.len()).unwrap_or(0)
    }

    /// Post every queued message, returning how many were accepted.
    pub async fn flush(&self, transport: &dyn Transport, webhook_url: &str) -> usize {
        let messages = match self.pending.lock() {
            Ok(mut pending) => mem::take(&mut *pending),
            Err(_) => return 0,
        };

        let mut delivered = 0;
        for content in messages {
            if transport
                .post_json(webhook_url, &json!({ "content": content }))
                .await
            {
                delivered += 1;
            }
        }
        delivered
    }
}

/// Logger that writes to `inner` and feeds a [`LogRelay`].
pub struct RelayLogger<L> {
    inner: L,
    relay: Arc<LogRelay>,
}

impl<L: Log> RelayLogger<L> {
    pub fn new(inner: L, relay: Arc<LogRelay>) -> Self {
        Self { inner, relay }
    }
}

impl<L: Log> Log for RelayLogger<L> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.relay.console().max(self.relay.remote())
    }

    fn log(&self, record: &Record) {
        if record.level() <= self.relay.console() && self.inner.enabled(record.metadata()) {
            self.inner.log(record);
        }
        self.relay.capture(record);
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

fn is_own_target(target: &str) -> bool {
    let name = env!("CARGO_CRATE_NAME");
    target == name
        || target
            .strip_prefix(name)
            .is_some_and(|rest| rest.starts_with("::"))
}

/// Render a record as a code block that fits one message.
fn format_record(record: &Record) -> String {
    let line = format!(
        "{} | {:<8} | {} - {}",
        Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.target(),
        record.args()
    );

    let budget = CONTENT_LIMIT - 2 * (FENCE.len() + 1);
    let line = if line.chars().count() > budget {
        line.chars().take(budget - 1).chain(['…']).collect()
    } else {
        line
    };
    format!("{FENCE}\n{line}\n{FENCE}")
}
