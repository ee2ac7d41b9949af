//! The subscription core.
//! `ModelManager` owns the backing store and serializes every read-modify-write cycle on it,
//! so any `SubscriberStore` behaves as a single-writer store.

pub mod store;
mod subscriber;

pub use store::{JsonFileStore, MemoryStore, StoreError, SubscriberStore};
pub use subscriber::{DataParsingError, Subscriber, ValidEmail, DATE_FORMAT, LEGACY_IP_FIELD};

use std::sync::Arc;

use chrono::Local;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::AppConfig;

/// Outcome of a subscribe call that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    /// The email was appended, `total` is the length of the persisted list afterwards.
    Accepted { total: usize },
    /// The email is already on the list, nothing was written.
    AlreadySubscribed,
}

#[derive(Clone)]
pub struct ModelManager {
    store: Arc<dyn SubscriberStore>,
    write_lock: Arc<Mutex<()>>,
}

impl std::fmt::Debug for ModelManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelManager")
            .field("store", &self.store.name())
            .finish()
    }
}

impl ModelManager {
    pub fn new(store: impl SubscriberStore + 'static) -> Self {
        ModelManager {
            store: Arc::new(store),
            write_lock: Arc::default(),
        }
    }

    /// Builds a manager backed by the JSON file configured in `store_config`.
    pub fn init(config: &AppConfig) -> Self {
        let path = config.store_config.subscribers_file();
        info!("{:<20} - Using subscriber list at {:?}", "ModelManager", path);
        Self::new(JsonFileStore::new(path))
    }

    /// Validates `email_raw` and appends it to the subscriber list unless it is already there.
    ///
    /// Input errors return before the store is touched. The lock is held from load to save,
    /// so concurrent calls can't drop each other's records or accept the same email twice.
    pub async fn subscribe(&self, email_raw: Option<&str>) -> Result<SubscribeOutcome> {
        let email_raw = email_raw.ok_or(Error::EmailMissing)?;
        let email = ValidEmail::parse(email_raw)?;

        let _guard = self.write_lock.lock().await;

        let mut subscribers = self.load_scrubbed().await?;

        if subscribers.iter().any(|sub| sub.has_email(&email)) {
            debug!("{:<20} - {email} is already subscribed", "subscribe");
            return Ok(SubscribeOutcome::AlreadySubscribed);
        }

        subscribers.push(Subscriber::new(&email, Local::now()));
        self.store.save(&subscribers).await.map_err(Error::Save)?;

        let total = subscribers.len();
        info!("{:<20} - {email} added, {total} subscribers", "subscribe");
        Ok(SubscribeOutcome::Accepted { total })
    }

    /// The persisted list with legacy fields removed.
    pub async fn subscribers(&self) -> Result<Vec<Subscriber>> {
        self.load_scrubbed().await
    }

    async fn load_scrubbed(&self) -> Result<Vec<Subscriber>> {
        let mut subscribers = self.store.load().await.map_err(Error::Load)?;
        subscribers
            .iter_mut()
            .for_each(Subscriber::scrub_legacy_fields);
        Ok(subscribers)
    }
}

// ###################################
// ->   ERROR
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("email is missing")]
    EmailMissing,
    #[error("invalid email: {0}")]
    EmailInvalid(#[from] DataParsingError),

    #[error("failed to load subscribers: {0}")]
    Load(#[source] StoreError),
    #[error("failed to save subscribers: {0}")]
    Save(#[source] StoreError),
}
