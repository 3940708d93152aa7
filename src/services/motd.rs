// src/services/motd.rs

//! Message of the Day processor.

use serde::Deserialize;

use crate::models::{
    FeedConfig, FeedSnapshot, MotdItem, NotificationField, NotificationRecord, SubFeed,
};
use crate::services::feed::{Candidate, FeedProcessor, SkipReason};
use crate::utils::text::strip_html;
use crate::utils::url::media_url;

/// Processor for the `mobileMotd` sub-feed.
pub struct MotdProcessor {
    config: FeedConfig,
}

impl MotdProcessor {
    pub fn new(config: FeedConfig) -> Self {
        Self { config }
    }

    fn candidate(&self, item: MotdItem) -> Candidate {
        let MotdItem { name, data } = item;

        let description = Some(strip_html(&data.entry_text)).filter(|d| !d.is_empty());
        let image = data
            .image
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(|path| media_url(&self.config.media_origin, path));
        let fields = data
            .priority
            .map(|p| vec![NotificationField::inline("Priority", p.to_string())])
            .unwrap_or_default();

        Candidate {
            id: name,
            record: NotificationRecord {
                title: data.title,
                description,
                url: None,
                image,
                author: None,
                color: self.config.accent_color,
                fields,
                timestamp: None,
            },
        }
    }
}

impl FeedProcessor for MotdProcessor {
    fn feed(&self) -> SubFeed {
        SubFeed::Motd
    }

    fn candidates(&self, snapshot: &FeedSnapshot) -> Result<Vec<Candidate>, SkipReason> {
        let items = snapshot
            .items(SubFeed::Motd)
            .ok_or(SkipReason::MissingItems(SubFeed::Motd.snapshot_key()))?;

        if items.is_empty() {
            return Err(SkipReason::Empty);
        }

        items
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                MotdItem::deserialize(raw)
                    .map(|item| self.candidate(item))
                    .map_err(|e| SkipReason::MalformedItem {
                        index,
                        message: e.to_string(),
                    })
            })
            .collect()
    }
}
