//! In-memory history store for unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::HistoryState;
use crate::storage::{HistoryStore, LoadedHistory};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: Mutex<Option<HistoryState>>,
    saves: AtomicUsize,
}

impl MemoryStorage {
    /// Storage that starts without any history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that starts with the given history.
    pub fn with_state(state: HistoryState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
            saves: AtomicUsize::new(0),
        }
    }

    /// Currently stored history, if any.
    pub fn state(&self) -> Option<HistoryState> {
        self.state.lock().ok().and_then(|s| s.clone())
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HistoryStore for MemoryStorage {
    async fn load(&self) -> Result<LoadedHistory> {
        let guard = self
            .state
            .lock()
            .map_err(|_| AppError::history("history lock poisoned"))?;
        Ok(match guard.as_ref() {
            Some(state) => LoadedHistory {
                state: state.clone(),
                created: false,
            },
            None => LoadedHistory {
                state: HistoryState::default(),
                created: true,
            },
        })
    }

    async fn save(&self, state: &HistoryState) -> Result<()> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| AppError::history("history lock poisoned"))?;
        *guard = Some(state.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_then_saved() {
        let storage = MemoryStorage::new();
        assert!(storage.load().await.unwrap().created);

        let state = HistoryState {
            blog: vec!["a".into()],
            motd: vec![],
        };
        storage.save(&state).await.unwrap();

        let loaded = storage.load().await.unwrap();
        assert!(!loaded.created);
        assert_eq!(loaded.state, state);
        assert_eq!(storage.save_count(), 1);
    }
}
