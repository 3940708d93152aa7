//! Storage abstractions for feed history persistence.
//!
//! History is a single JSON document holding the identifiers seen per
//! sub-feed:
//!
//! ```text
//! storage/
//! ├── config.toml           # Run configuration
//! └── history.json          # {"blog": [...], "motd": [...]}
//! ```

pub mod local;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::HistoryState;

// Re-export for convenience
pub use local::LocalStorage;
#[cfg(test)]
pub use memory::MemoryStorage;

/// History as read at the start of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedHistory {
    pub state: HistoryState,
    /// No history existed yet; the run must write one even without changes
    pub created: bool,
}

/// Trait for history storage backends.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Read persisted history.
    ///
    /// A missing record yields an empty state with `created` set. A record
    /// that exists but cannot be decoded is an error.
    async fn load(&self) -> Result<LoadedHistory>;

    /// Replace persisted history with `state`.
    async fn save(&self, state: &HistoryState) -> Result<()>;
}
