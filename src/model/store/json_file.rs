use std::{
    ffi::OsString,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use super::{StoreError, StoreResult, SubscriberStore};
use crate::model::Subscriber;

/// Keeps the subscriber list as a pretty-printed JSON array in a single file.
///
/// Writes go to a sibling `<file>.tmp` first and are renamed over the target,
/// so a failed write leaves the previous list untouched.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("subscribers"));
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }
}

#[async_trait]
impl SubscriberStore for JsonFileStore {
    async fn load(&self) -> StoreResult<Vec<Subscriber>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(er) if er.kind() == ErrorKind::NotFound => {
                debug!("{:<20} - no list at {:?}, starting empty", "JsonFileStore", self.path);
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, subscribers: &[Subscriber]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(write_err(parent))?;
        }

        let bytes = to_pretty_json(subscribers)?;
        let tmp_path = self.tmp_path();

        write_synced(&tmp_path, &bytes)
            .await
            .map_err(write_err(&tmp_path))?;

        if let Err(source) = tokio::fs::rename(&tmp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(StoreError::Write {
                path: self.path.clone(),
                source,
            });
        }

        debug!(
            "{:<20} - wrote {} subscribers to {:?}",
            "JsonFileStore",
            subscribers.len(),
            self.path
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "json-file"
    }
}

/// Writes `bytes` to a fresh file at `path` and flushes it to disk before returning,
/// a rename must never publish a file whose content is still in flight.
async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

fn write_err(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError {
    let path = path.to_path_buf();
    move |source| StoreError::Write { path, source }
}

/// Four space indentation, same as the lists written before this service existed.
fn to_pretty_json(subscribers: &[Subscriber]) -> StoreResult<Vec<u8>> {
    let mut bytes = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut bytes, formatter);
    subscribers
        .serialize(&mut ser)
        .map_err(StoreError::Serialize)?;
    bytes.push(b'\n');
    Ok(bytes)
}
