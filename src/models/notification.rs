//! Notification records handed from feed processing to the notifier.

use chrono::{DateTime, Utc};

/// A single new feed item, ready to be delivered.
///
/// This is the internal representation only; the webhook wire format lives in
/// [`crate::services::notifier`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationRecord {
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub author: Option<String>,
    pub color: u32,
    pub fields: Vec<NotificationField>,
    /// Delivery time is used when unset
    pub timestamp: Option<DateTime<Utc>>,
}

impl NotificationRecord {
    /// Timestamp to report, defaulting to now.
    pub fn resolved_timestamp(&self) -> DateTime<Utc> {
        self.timestamp.unwrap_or_else(Utc::now)
    }
}

/// A labelled inline value shown beneath the description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl NotificationField {
    pub fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: true,
        }
    }
}
