//! Backing stores for the subscriber list.
//! A store only knows how to read and replace the full list, deduplication and locking live in `ModelManager`.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use async_trait::async_trait;

use super::Subscriber;

/// Persistence for the subscriber list.
/// `save` replaces the whole list, it must either commit all of it or nothing.
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    /// Loads the full list in insertion order. A list that was never written is empty.
    async fn load(&self) -> StoreResult<Vec<Subscriber>>;

    async fn save(&self, subscribers: &[Subscriber]) -> StoreResult<()>;

    /// Short description used in logs.
    fn name(&self) -> &str;
}

// ###################################
// ->   ERROR
// ###################################
pub type StoreResult<T> = core::result::Result<T, StoreError>;

#[derive(thiserror::Error)]
pub enum StoreError {
    #[error("failed to read subscribers from '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse subscribers from '{path}'")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize subscribers")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write subscribers to '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl std::fmt::Debug for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        crate::utils::error_chain_fmt(self, f)
    }
}
