// src/models/mod.rs

//! Domain models for the feed watcher.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod feed;
mod history;
mod notification;

// Re-export all public types
pub use config::{
    Config, DiscordConfig, DiscordLogConfig, FeedConfig, LoggingConfig, SourceConfig,
    SourcesConfig, TransportConfig,
};
pub use feed::{BlogItem, FeedSnapshot, MotdData, MotdItem, SubFeed};
pub use history::HistoryState;
pub use notification::{NotificationField, NotificationRecord};
