// src/services/notifier.rs

//! Discord webhook notifier.
//!
//! Maps a [`NotificationRecord`] onto Discord's execute-webhook body: one
//! embed per message, identity taken from configuration.

use async_trait::async_trait;
use chrono::SecondsFormat;
use serde::Serialize;

use crate::models::{DiscordConfig, NotificationRecord};
use crate::services::Transport;
use crate::utils::log::success;

/// Footer text shown on every embed
pub const FOOTER_TEXT: &str = "Broadcast";
/// Footer icon shown on every embed
pub const FOOTER_ICON: &str = "https://i.imgur.com/6CNKsKZ.png";

/// Delivery of a single notification.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Returns `true` only when the sink accepted the message.
    async fn notify(&self, record: &NotificationRecord) -> bool;
}

/// Execute-webhook request body.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WebhookPayload {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Embed {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub timestamp: String,
    pub color: u32,
    pub footer: EmbedFooter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedFooter {
    pub text: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedImage {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedAuthor {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl WebhookPayload {
    /// Build the wire payload for a record.
    pub fn build(settings: &DiscordConfig, record: &NotificationRecord) -> Self {
        let embed = Embed {
            title: record.title.clone(),
            description: record.description.clone(),
            url: record.url.clone(),
            timestamp: record
                .resolved_timestamp()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            color: record.color,
            footer: EmbedFooter {
                text: FOOTER_TEXT.to_string(),
                icon_url: FOOTER_ICON.to_string(),
            },
            image: record.image.clone().map(|url| EmbedImage { url }),
            author: record.author.clone().map(|name| EmbedAuthor { name }),
            fields: record
                .fields
                .iter()
                .map(|f| EmbedField {
                    name: f.name.clone(),
                    value: f.value.clone(),
                    inline: f.inline,
                })
                .collect(),
        };

        Self {
            username: settings.username.clone(),
            avatar_url: settings.avatar_url.clone(),
            embeds: vec![embed],
        }
    }
}

/// Notifier posting to a Discord webhook.
pub struct DiscordNotifier<'a> {
    transport: &'a dyn Transport,
    settings: DiscordConfig,
}

impl<'a> DiscordNotifier<'a> {
    pub fn new(transport: &'a dyn Transport, settings: DiscordConfig) -> Self {
        Self {
            transport,
            settings,
        }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier<'_> {
    async fn notify(&self, record: &NotificationRecord) -> bool {
        let payload = WebhookPayload::build(&self.settings, record);
        let body = match serde_json::to_value(&payload) {
            Ok(body) => body,
            Err(e) => {
                log::error!("Failed to encode notification '{}', {}", record.title, e);
                return false;
            }
        };

        if self
            .transport
            .post_json(&self.settings.webhook_url, &body)
            .await
        {
            success(&format!("Delivered notification '{}'", record.title));
            true
        } else {
            log::error!("Failed to deliver notification '{}'", record.title);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;
    use crate::models::NotificationField;
    use crate::services::testing::RecordingTransport;

    fn settings() -> DiscordConfig {
        DiscordConfig {
            username: "Broadcast".into(),
            avatar_url: Some("https://example.com/avatar.png".into()),
            webhook_url: "https://discord.com/api/webhooks/1/abc".into(),
        }
    }

    fn full_record() -> NotificationRecord {
        NotificationRecord {
            title: "Season Four Reloaded".into(),
            description: Some("Patch notes".into()),
            url: Some("https://www.callofduty.com/blog/s4r".into()),
            image: Some("https://cdn.example.com/hero.jpg".into()),
            author: Some("Activision".into()),
            color: 0xFFFFFF,
            fields: vec![NotificationField::inline("Game", "Call Of Duty, CDL")],
            timestamp: Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap()),
        }
    }

    #[test]
    fn test_payload_wire_shape() {
        let payload = WebhookPayload::build(&settings(), &full_record());

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "username": "Broadcast",
                "avatar_url": "https://example.com/avatar.png",
                "embeds": [{
                    "title": "Season Four Reloaded",
                    "description": "Patch notes",
                    "url": "https://www.callofduty.com/blog/s4r",
                    "timestamp": "2024-06-01T12:30:00.000Z",
                    "color": 16777215,
                    "footer": {
                        "text": "Broadcast",
                        "icon_url": "https://i.imgur.com/6CNKsKZ.png"
                    },
                    "image": {"url": "https://cdn.example.com/hero.jpg"},
                    "author": {"name": "Activision"},
                    "fields": [{"name": "Game", "value": "Call Of Duty, CDL", "inline": true}]
                }]
            })
        );
    }

    #[test]
    fn test_payload_omits_absent_values() {
        let record = NotificationRecord {
            title: "Double XP".into(),
            ..NotificationRecord::default()
        };
        let mut discord = settings();
        discord.avatar_url = None;

        let value = serde_json::to_value(WebhookPayload::build(&discord, &record)).unwrap();
        let embed = &value["embeds"][0];

        assert!(value.get("avatar_url").is_none());
        assert!(embed.get("description").is_none());
        assert!(embed.get("url").is_none());
        assert!(embed.get("image").is_none());
        assert!(embed.get("author").is_none());
        assert_eq!(embed["fields"], json!([]));
    }

    #[test]
    fn test_payload_defaults_timestamp_to_now() {
        let before = Utc::now();
        let record = NotificationRecord {
            title: "Now".into(),
            ..NotificationRecord::default()
        };

        let payload = WebhookPayload::build(&settings(), &record);
        let stamped = chrono::DateTime::parse_from_rfc3339(&payload.embeds[0].timestamp)
            .unwrap()
            .with_timezone(&Utc);

        assert!(stamped >= before - chrono::Duration::seconds(1));
        assert!(payload.embeds[0].timestamp.ends_with('Z'));
    }

    #[tokio::test]
    async fn test_notify_posts_to_webhook() {
        let transport = RecordingTransport::new(None);
        let notifier = DiscordNotifier::new(&transport, settings());

        assert!(notifier.notify(&full_record()).await);

        let posts = transport.posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].0, "https://discord.com/api/webhooks/1/abc");
        assert_eq!(posts[0].1["embeds"][0]["title"], "Season Four Reloaded");
    }

    #[tokio::test]
    async fn test_notify_reports_failure() {
        let transport = RecordingTransport::new(None);
        transport.reject("Season Four Reloaded");
        let notifier = DiscordNotifier::new(&transport, settings());

        assert!(!notifier.notify(&full_record()).await);
        assert_eq!(transport.posts().len(), 1);
    }
}
