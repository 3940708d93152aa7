//! Service layer for the feed watcher.
//!
//! This module contains the business logic for:
//! - HTTP access with a single retry (`HttpTransport`)
//! - Sub-feed validation and candidate extraction (`BlogProcessor`, `MotdProcessor`)
//! - Webhook delivery (`DiscordNotifier`)
//! - Log forwarding to a webhook (`LogRelay`)

mod blog;
pub mod feed;
mod motd;
pub mod notifier;
pub mod relay;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use blog::BlogProcessor;
pub use feed::{Candidate, FeedProcessor, SkipReason};
pub use motd::MotdProcessor;
pub use notifier::{DiscordNotifier, Notifier, WebhookPayload};
pub use relay::{LogRelay, RelayLogger};
pub use transport::{HttpTransport, Transport};

use crate::models::{FeedConfig, SubFeed};

/// Processor responsible for a sub-feed.
pub fn processor_for(feed: SubFeed, config: &FeedConfig) -> Box<dyn FeedProcessor> {
    match feed {
        SubFeed::Blog => Box::new(BlogProcessor::new(config.clone())),
        SubFeed::Motd => Box::new(MotdProcessor::new(config.clone())),
    }
}
