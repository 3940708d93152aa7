// src/services/blog.rs

//! Editorial post processor.
//!
//! The upstream blog array has a fixed page size. Any other length is treated
//! as schema drift rather than as fewer posts, and only the leading window of
//! posts is considered for notifications.

use serde::Deserialize;

use crate::models::{
    BlogItem, FeedConfig, FeedSnapshot, NotificationField, NotificationRecord, SubFeed,
};
use crate::services::feed::{Candidate, FeedProcessor, SkipReason};
use crate::utils::text::unslug;
use crate::utils::url::strip_tracking_params;

/// Processor for the `blog` sub-feed.
pub struct BlogProcessor {
    config: FeedConfig,
}

impl BlogProcessor {
    pub fn new(config: FeedConfig) -> Self {
        Self { config }
    }

    fn candidate(&self, item: BlogItem) -> Candidate {
        let id = strip_tracking_params(&item.url, &self.config.tracking_params);

        let mut fields = Vec::new();
        if let Some(kind) = non_empty(item.content_type.as_deref()) {
            fields.push(NotificationField::inline("Type", unslug(kind)));
        }
        if let Some(game) = non_empty(item.game.as_deref()) {
            fields.push(NotificationField::inline("Game", unslug(game)));
        }

        Candidate {
            record: NotificationRecord {
                title: item.title,
                description: item.sub_title,
                url: Some(id.clone()),
                image: item.dimg,
                author: item.author,
                color: self.config.accent_color,
                fields,
                timestamp: None,
            },
            id,
        }
    }
}

impl FeedProcessor for BlogProcessor {
    fn feed(&self) -> SubFeed {
        SubFeed::Blog
    }

    fn candidates(&self, snapshot: &FeedSnapshot) -> Result<Vec<Candidate>, SkipReason> {
        let items = snapshot
            .items(SubFeed::Blog)
            .ok_or(SkipReason::MissingItems(SubFeed::Blog.snapshot_key()))?;

        if items.len() != self.config.blog_expected_count {
            return Err(SkipReason::UnexpectedCount {
                expected: self.config.blog_expected_count,
                actual: items.len(),
            });
        }

        items
            .iter()
            .take(self.config.blog_window)
            .enumerate()
            .map(|(index, raw)| {
                BlogItem::deserialize(raw)
                    .map(|item| self.candidate(item))
                    .map_err(|e| SkipReason::MalformedItem {
                        index,
                        message: e.to_string(),
                    })
            })
            .collect()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
