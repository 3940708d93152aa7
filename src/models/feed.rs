//! Upstream feed structures.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One of the two independently tracked item streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubFeed {
    /// Editorial posts
    Blog,
    /// Rotating in-app notices (Message of the Day)
    Motd,
}

impl SubFeed {
    /// Processing order within a run.
    pub const ALL: [SubFeed; 2] = [SubFeed::Blog, SubFeed::Motd];

    /// Key used in the history file.
    pub fn history_key(self) -> &'static str {
        match self {
            SubFeed::Blog => "blog",
            SubFeed::Motd => "motd",
        }
    }

    /// Key of the item array in the upstream snapshot.
    pub fn snapshot_key(self) -> &'static str {
        match self {
            SubFeed::Blog => "blog",
            SubFeed::Motd => "mobileMotd",
        }
    }

    /// Human-readable label for log lines.
    pub fn label(self) -> &'static str {
        match self {
            SubFeed::Blog => "Call of Duty blog",
            SubFeed::Motd => "Call of Duty Message of the Day",
        }
    }
}

impl fmt::Display for SubFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.history_key())
    }
}

/// Decoded response of the franchise feed endpoint.
///
/// Items are kept as raw JSON so that drift in one sub-feed's schema does not
/// prevent the other from being processed.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    sections: Map<String, Value>,
}

impl FeedSnapshot {
    /// Wrap a decoded response. Returns `None` unless it is a JSON object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(sections) => Some(Self { sections }),
            _ => None,
        }
    }

    /// Item array of a sub-feed, if present and an array.
    pub fn items(&self, feed: SubFeed) -> Option<&[Value]> {
        self.sections
            .get(feed.snapshot_key())
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }
}

/// An editorial post.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BlogItem {
    pub url: String,

    pub title: String,

    #[serde(default)]
    pub sub_title: Option<String>,

    /// Hero image URL
    #[serde(default)]
    pub dimg: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    /// Slug list such as "news,patch-notes"
    #[serde(default)]
    pub content_type: Option<String>,

    /// Slug list such as "call-of-duty,cdl"
    #[serde(default)]
    pub game: Option<String>,
}

/// A rotating in-app notice.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MotdItem {
    pub name: String,

    pub data: MotdData,
}

/// Display payload of a notice.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MotdData {
    pub title: String,

    /// HTML-bearing body
    #[serde(default)]
    pub entry_text: String,

    /// Path relative to the media origin
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub priority: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snapshot_requires_object() {
        assert!(FeedSnapshot::from_value(json!([])).is_none());
        assert!(FeedSnapshot::from_value(json!(null)).is_none());
        assert!(FeedSnapshot::from_value(json!({})).is_some());
    }

    #[test]
    fn snapshot_items_by_sub_feed() {
        let snapshot = FeedSnapshot::from_value(json!({
            "blog": [{"url": "a"}],
            "mobileMotd": "not an array",
        }))
        .unwrap();

        assert_eq!(snapshot.items(SubFeed::Blog).map(|i| i.len()), Some(1));
        assert!(snapshot.items(SubFeed::Motd).is_none());
    }

    #[test]
    fn blog_item_optional_fields() {
        let item = BlogItem::deserialize(&json!({
            "url": "https://example.com/post",
            "title": "Season One",
            "subTitle": "Everything new",
            "contentType": "news",
        }))
        .unwrap();

        assert_eq!(item.sub_title.as_deref(), Some("Everything new"));
        assert_eq!(item.content_type.as_deref(), Some("news"));
        assert!(item.dimg.is_none());
        assert!(item.game.is_none());
    }

    #[test]
    fn motd_item_nested_data() {
        let item = MotdItem::deserialize(&json!({
            "name": "motd_s1",
            "data": {
                "title": "Welcome",
                "entryText": "<p>Hi</p>",
                "image": "/content/img.jpg",
                "priority": 3
            }
        }))
        .unwrap();

        assert_eq!(item.name, "motd_s1");
        assert_eq!(item.data.priority, Some(3));
        assert_eq!(item.data.image.as_deref(), Some("/content/img.jpg"));
    }

    #[test]
    fn sub_feed_keys() {
        assert_eq!(SubFeed::Motd.history_key(), "motd");
        assert_eq!(SubFeed::Motd.snapshot_key(), "mobileMotd");
        assert_eq!(SubFeed::Blog.to_string(), "blog");
    }
}
