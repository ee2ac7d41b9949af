use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, StoreResult, SubscriberStore};
use crate::model::Subscriber;

/// Subscriber list kept in memory. Clones share the same list.
/// Saves can be switched to fail, which is how storage failures get exercised.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    subscribers: Arc<RwLock<Vec<Subscriber>>>,
    fail_saves: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an already persisted list, records are kept as given (legacy fields included).
    pub fn with_subscribers(subscribers: Vec<Subscriber>) -> Self {
        MemoryStore {
            subscribers: Arc::new(RwLock::new(subscribers)),
            fail_saves: Arc::default(),
        }
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// The list exactly as it was last saved.
    pub async fn snapshot(&self) -> Vec<Subscriber> {
        self.subscribers.read().await.clone()
    }
}

#[async_trait]
impl SubscriberStore for MemoryStore {
    async fn load(&self) -> StoreResult<Vec<Subscriber>> {
        Ok(self.subscribers.read().await.clone())
    }

    async fn save(&self, subscribers: &[Subscriber]) -> StoreResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("saves are disabled".to_string()));
        }

        *self.subscribers.write().await = subscribers.to_vec();
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
