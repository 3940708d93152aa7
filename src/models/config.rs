//! Application configuration structures.

use std::fs;
use std::path::Path;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::SubFeed;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Per sub-feed enable flags and locales
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Webhook identity and destination
    pub discord: DiscordConfig,

    /// Log severity
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Dry-run: never persist history
    #[serde(default)]
    pub debug: bool,

    /// Upstream feed endpoint and parsing rules
    #[serde(default)]
    pub feed: FeedConfig,

    /// HTTP client behavior
    #[serde(default)]
    pub transport: TransportConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// Unlike history, there is no sensible fallback: a run without a webhook
    /// has nowhere to report to, so any failure here is fatal.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.discord.webhook_url.trim().is_empty() {
            return Err(AppError::validation("discord.webhookUrl is empty"));
        }
        url::Url::parse(&self.discord.webhook_url)?;
        if self.discord.username.trim().is_empty() {
            return Err(AppError::validation("discord.username is empty"));
        }
        for feed in SubFeed::ALL {
            let source = self.sources.get(feed);
            if source.enable && source.language.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "sources.{feed}.language is empty"
                )));
            }
        }
        if self.logging.level_filter().is_none() {
            return Err(AppError::validation(format!(
                "logging.severity '{}' is not one of debug, info, warn, error",
                self.logging.severity
            )));
        }
        let sink = &self.logging.discord;
        if sink.enable {
            url::Url::parse(&sink.webhook_url)?;
            if parse_severity(&sink.severity).is_none() {
                return Err(AppError::validation(format!(
                    "logging.discord.severity '{}' is not one of debug, info, warn, error",
                    sink.severity
                )));
            }
        }
        if self.feed.blog_window == 0 {
            return Err(AppError::validation("feed.blogWindow must be > 0"));
        }
        if self.feed.blog_window > self.feed.blog_expected_count {
            return Err(AppError::validation(
                "feed.blogWindow must not exceed feed.blogExpectedCount",
            ));
        }
        url::Url::parse(&self.feed.base_url)?;
        if self.transport.timeout_secs == 0 {
            return Err(AppError::validation("transport.timeoutSecs must be > 0"));
        }
        Ok(())
    }
}

/// Enable flags for both sub-feeds.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SourcesConfig {
    #[serde(default)]
    pub blog: SourceConfig,

    #[serde(default)]
    pub motd: SourceConfig,
}

impl SourcesConfig {
    /// Settings for a sub-feed.
    pub fn get(&self, feed: SubFeed) -> &SourceConfig {
        match feed {
            SubFeed::Blog => &self.blog,
            SubFeed::Motd => &self.motd,
        }
    }
}

/// A single sub-feed toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "defaults::enable")]
    pub enable: bool,

    /// Locale segment of the feed URL (e.g. "en")
    #[serde(default = "defaults::language")]
    pub language: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            enable: defaults::enable(),
            language: defaults::language(),
        }
    }
}

/// Discord webhook identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscordConfig {
    #[serde(default = "defaults::username")]
    pub username: String,

    #[serde(default)]
    pub avatar_url: Option<String>,

    pub webhook_url: String,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::severity")]
    pub severity: String,

    /// Forwarding of log records to a webhook
    #[serde(default)]
    pub discord: DiscordLogConfig,
}

impl LoggingConfig {
    /// Map the configured severity onto a `log` filter.
    pub fn level_filter(&self) -> Option<LevelFilter> {
        parse_severity(&self.severity)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            severity: defaults::severity(),
            discord: DiscordLogConfig::default(),
        }
    }
}

/// Webhook log sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscordLogConfig {
    #[serde(default)]
    pub enable: bool,

    /// Lowest severity forwarded
    #[serde(default = "defaults::discord_severity")]
    pub severity: String,

    #[serde(default)]
    pub webhook_url: String,
}

impl DiscordLogConfig {
    /// Forwarding filter; `Off` when the sink is disabled.
    pub fn level_filter(&self) -> LevelFilter {
        if !self.enable {
            return LevelFilter::Off;
        }
        parse_severity(&self.severity).unwrap_or(LevelFilter::Off)
    }

    /// Webhook to forward to, when enabled.
    pub fn webhook(&self) -> Option<&str> {
        self.enable.then_some(self.webhook_url.as_str())
    }
}

impl Default for DiscordLogConfig {
    fn default() -> Self {
        Self {
            enable: false,
            severity: defaults::discord_severity(),
            webhook_url: String::new(),
        }
    }
}

fn parse_severity(severity: &str) -> Option<LevelFilter> {
    match severity.to_lowercase().as_str() {
        "trace" => Some(LevelFilter::Trace),
        "debug" => Some(LevelFilter::Debug),
        "info" | "success" => Some(LevelFilter::Info),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "error" | "critical" => Some(LevelFilter::Error),
        _ => None,
    }
}

/// Upstream feed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedConfig {
    /// Endpoint prefix; the locale feed lives at `{base_url}/franchiseFeed/{locale}`
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Origin prepended to relative notice image paths
    #[serde(default = "defaults::media_origin")]
    pub media_origin: String,

    /// Exact number of blog items a well-formed response carries
    #[serde(default = "defaults::blog_expected_count")]
    pub blog_expected_count: usize,

    /// Number of leading blog items considered for notifications
    #[serde(default = "defaults::blog_window")]
    pub blog_window: usize,

    /// Query parameters stripped from blog URLs before comparison
    #[serde(default = "defaults::tracking_params")]
    pub tracking_params: Vec<String>,

    /// Embed accent color
    #[serde(default = "defaults::accent_color")]
    pub accent_color: u32,
}

impl FeedConfig {
    /// Build the feed URL for a locale.
    pub fn feed_url(&self, language: &str) -> String {
        format!(
            "{}/franchiseFeed/{}",
            self.base_url.trim_end_matches('/'),
            language
        )
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            media_origin: defaults::media_origin(),
            blog_expected_count: defaults::blog_expected_count(),
            blog_window: defaults::blog_window(),
            tracking_params: defaults::tracking_params(),
            accent_color: defaults::accent_color(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportConfig {
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Pause before the single retry of a failed request
    #[serde(default = "defaults::retry_delay")]
    pub retry_delay_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            retry_delay_secs: defaults::retry_delay(),
        }
    }
}

mod defaults {
    // Source defaults
    pub fn enable() -> bool {
        true
    }
    pub fn language() -> String {
        "en".into()
    }

    // Discord defaults
    pub fn username() -> String {
        "Broadcast".into()
    }

    // Logging defaults
    pub fn severity() -> String {
        "info".into()
    }
    pub fn discord_severity() -> String {
        "warn".into()
    }

    // Feed defaults
    pub fn base_url() -> String {
        "https://www.callofduty.com/site/cod".into()
    }
    pub fn media_origin() -> String {
        "https://callofduty.com".into()
    }
    pub fn blog_expected_count() -> usize {
        105
    }
    pub fn blog_window() -> usize {
        5
    }
    pub fn tracking_params() -> Vec<String> {
        vec![
            "utm_source".into(),
            "utm_medium".into(),
            "utm_campaign".into(),
        ]
    }
    pub fn accent_color() -> u32 {
        0xFFFFFF
    }

    // Transport defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; Broadcast/1.0)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn retry_delay() -> u64 {
        10
    }
}
