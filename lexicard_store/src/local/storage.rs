use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
    sync::Mutex as StdMutex,
    time::Duration,
};

use lexicard_configuration::LocalStorageConfiguration;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tokio::sync::{watch, Mutex};
use tracing::{debug, warn};


#[derive(Debug, Error)]
pub enum LocalStorageError {
    #[error("unable to read {}", .path.display())]
    UnableToRead {
        path: PathBuf,

        #[source]
        error: io::Error,
    },

    #[error("unable to write {}", .path.display())]
    UnableToWrite {
        path: PathBuf,

        #[source]
        error: io::Error,
    },

    #[error("contents of \"{}\" are not valid JSON", .key)]
    CorruptDocument {
        key: String,

        #[source]
        error: serde_json::Error,
    },

    #[error("unable to serialize contents of \"{}\"", .key)]
    SerializationError {
        key: String,

        #[source]
        error: serde_json::Error,
    },

    #[error(
        "storage quota exceeded for \"{}\": {} bytes required, {} allowed",
        .key,
        .required_bytes,
        .quota_bytes
    )]
    QuotaExceeded {
        key: String,
        required_bytes: u64,
        quota_bytes: u64,
    },
}

pub type LocalStorageResult<T, E = LocalStorageError> = Result<T, E>;


/// A key-value store of JSON arrays, one document per key, kept in a directory.
///
/// This is the guest-mode counterpart to the remote database: every key holds
/// the complete JSON array of one entity kind. Writes are serialized
/// through a single lock, and every successful write bumps the revision
/// that [`watch`][Self::watch] receivers observe.
pub struct LocalStorage {
    directory_path: PathBuf,

    quota_bytes: u64,

    simulated_latency: Duration,

    write_lock: Mutex<()>,

    revisions: StdMutex<HashMap<String, watch::Sender<u64>>>,
}

impl LocalStorage {
    pub fn new<P>(directory_path: P, quota_bytes: u64, simulated_latency: Duration) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            directory_path: directory_path.into(),
            quota_bytes,
            simulated_latency,
            write_lock: Mutex::new(()),
            revisions: StdMutex::new(HashMap::new()),
        }
    }

    pub fn from_configuration(configuration: &LocalStorageConfiguration) -> Self {
        Self::new(
            configuration.directory_path.clone(),
            configuration.quota_bytes,
            configuration.simulated_latency,
        )
    }

    #[inline]
    pub fn directory_path(&self) -> &Path {
        &self.directory_path
    }

    #[inline]
    pub fn simulated_latency(&self) -> Duration {
        self.simulated_latency
    }

    fn document_path(&self, key: &str) -> PathBuf {
        self.directory_path.join(format!("{}.json", key))
    }

    /// Reads the array stored under `key`.
    ///
    /// A missing document is an empty array.
    pub async fn try_read_array<T>(&self, key: &str) -> LocalStorageResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let document_path = self.document_path(key);

        let contents = match tokio::fs::read(&document_path).await {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => {
                return Err(LocalStorageError::UnableToRead {
                    path: document_path,
                    error,
                })
            }
        };

        serde_json::from_slice(&contents).map_err(|error| LocalStorageError::CorruptDocument {
            key: key.to_string(),
            error,
        })
    }

    /// Reads the array stored under `key`, treating any failure as "no data".
    pub async fn read_array<T>(&self, key: &str) -> Vec<T>
    where
        T: DeserializeOwned,
    {
        match self.try_read_array(key).await {
            Ok(items) => items,
            Err(error) => {
                warn!(
                    key = key,
                    error = ?error,
                    "Failed to read local storage, treating it as empty."
                );

                Vec::new()
            }
        }
    }

    /// Read-modify-write of the array stored under `key`.
    ///
    /// `modify` returns whether it changed anything; unchanged arrays are not written back.
    /// A corrupt document is replaced, as if it had been empty. A document that
    /// exists but can not be read is left alone and the error is returned.
    pub async fn modify_array<T, F>(&self, key: &str, modify: F) -> LocalStorageResult<bool>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> bool,
    {
        let _write_guard = self.write_lock.lock().await;

        let mut items: Vec<T> = match self.try_read_array(key).await {
            Ok(items) => items,
            Err(error @ LocalStorageError::CorruptDocument { .. }) => {
                warn!(
                    key = key,
                    error = ?error,
                    "Local storage document is corrupt, it will be replaced."
                );

                Vec::new()
            }
            Err(error) => return Err(error),
        };

        if !modify(&mut items) {
            return Ok(false);
        }

        let serialized_items =
            serde_json::to_vec(&items).map_err(|error| LocalStorageError::SerializationError {
                key: key.to_string(),
                error,
            })?;

        let required_bytes = serialized_items.len() as u64;
        if required_bytes > self.quota_bytes {
            return Err(LocalStorageError::QuotaExceeded {
                key: key.to_string(),
                required_bytes,
                quota_bytes: self.quota_bytes,
            });
        }

        self.write_document(key, &serialized_items).await?;
        self.bump_revision(key);

        debug!(key = key, bytes = required_bytes, "Local storage document written.");

        Ok(true)
    }

    async fn write_document(&self, key: &str, contents: &[u8]) -> LocalStorageResult<()> {
        let document_path = self.document_path(key);
        let temporary_path = self.directory_path.join(format!("{}.json.tmp", key));

        tokio::fs::create_dir_all(&self.directory_path)
            .await
            .map_err(|error| LocalStorageError::UnableToWrite {
                path: self.directory_path.clone(),
                error,
            })?;

        tokio::fs::write(&temporary_path, contents)
            .await
            .map_err(|error| LocalStorageError::UnableToWrite {
                path: temporary_path.clone(),
                error,
            })?;

        tokio::fs::rename(&temporary_path, &document_path)
            .await
            .map_err(|error| LocalStorageError::UnableToWrite {
                path: document_path,
                error,
            })
    }

    fn bump_revision(&self, key: &str) {
        let revisions = self
            .revisions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(sender) = revisions.get(key) {
            sender.send_modify(|revision| *revision += 1);
        }
    }

    /// Returns a receiver that is notified after every write to `key`.
    pub fn watch(&self, key: &str) -> watch::Receiver<u64> {
        let mut revisions = self
            .revisions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        revisions
            .entry(key.to_string())
            .or_insert_with(|| watch::channel(0).0)
            .subscribe()
    }
}
