//! In-memory transport for unit tests.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use crate::services::Transport;

/// Serves a fixed feed document and records every POST.
///
/// A POST is rejected when its first embed title was registered with
/// [`RecordingTransport::reject`].
#[derive(Default)]
pub struct RecordingTransport {
    feed: Mutex<Option<Value>>,
    rejected: Mutex<HashSet<String>>,
    posts: Mutex<Vec<(String, Value)>>,
    gets: AtomicUsize,
}

impl RecordingTransport {
    pub fn new(feed: Option<Value>) -> Self {
        Self {
            feed: Mutex::new(feed),
            ..Self::default()
        }
    }

    pub fn set_feed(&self, feed: Option<Value>) {
        *self.feed.lock().unwrap() = feed;
    }

    pub fn reject(&self, title: &str) {
        self.rejected.lock().unwrap().insert(title.to_string());
    }

    pub fn accept_all(&self) {
        self.rejected.lock().unwrap().clear();
    }

    pub fn posts(&self) -> Vec<(String, Value)> {
        self.posts.lock().unwrap().clone()
    }

    /// Embed titles of every POST, in order.
    pub fn posted_titles(&self) -> Vec<String> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .filter_map(|(_, body)| body["embeds"][0]["title"].as_str().map(String::from))
            .collect()
    }

    pub fn clear_posts(&self) {
        self.posts.lock().unwrap().clear();
    }

    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn get_json(&self, _url: &str) -> Option<Value> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.feed.lock().unwrap().clone()
    }

    async fn post_json(&self, url: &str, payload: &Value) -> bool {
        self.posts
            .lock()
            .unwrap()
            .push((url.to_string(), payload.clone()));
        let title = payload["embeds"][0]["title"].as_str().unwrap_or_default();
        !self.rejected.lock().unwrap().contains(title)
    }
}
