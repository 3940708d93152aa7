// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::{Config, SubFeed};
use crate::utils::log::{header, success};

/// Check configuration sanity and print the effective settings.
pub fn run_validate(config: &Config) -> Result<()> {
    header("Validating configuration");

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }
    success("Config OK");

    for feed in SubFeed::ALL {
        let source = config.sources.get(feed);
        if source.enable {
            log::info!(
                "    {}: {}",
                feed.label(),
                config.feed.feed_url(&source.language)
            );
        } else {
            log::info!("    {}: disabled", feed.label());
        }
    }
    log::info!("    Webhook user: {}", config.discord.username);
    log::info!(
        "    Blog: exactly {} items, newest {} tracked",
        config.feed.blog_expected_count,
        config.feed.blog_window
    );
    log::info!(
        "    Timeout: {}s, retry after {}s",
        config.transport.timeout_secs,
        config.transport.retry_delay_secs
    );
    if let Some(webhook) = config.logging.discord.webhook() {
        let host = url::Url::parse(webhook)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default();
        log::info!(
            "    Log relay: {} and above to {}",
            config.logging.discord.severity,
            host
        );
    }
    if config.debug {
        log::warn!("    Debug is active, history will not be saved");
    }

    Ok(())
}
