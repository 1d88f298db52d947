//! A [`RecordStore`] backed by a single JSON object on disk.
//!
//! The file holds a flat map of fingerprint to message text, for example
//! `{"2024-01-02-15:mytag:disk full":"disk full"}`. It is created with the
//! body `{}` on first load and rewritten in full on every save.

use std::{
    io::{self, ErrorKind, Write},
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::{fs, io::AsyncWriteExt, task};

use crate::persistence::{
    error::PersistenceError,
    traits::{Record, RecordStore},
};

const EMPTY_RECORD: &[u8] = b"{}";

/// Stores the record as JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFileRecordStore {
    path: PathBuf,
}

impl JsonFileRecordStore {
    /// Creates a store for `path`. Nothing is touched on disk until the first
    /// [`load`](RecordStore::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the backing file with an empty record unless it already exists.
    ///
    /// The empty record is written to a temporary file in the same directory
    /// and then linked into place without replacing anything, so readers never
    /// observe a half-written file and a file created concurrently by someone
    /// else is left untouched.
    async fn create_if_missing(&self) -> Result<(), PersistenceError> {
        let path = self.path.clone();
        let created = task::spawn_blocking(move || -> Result<bool, PersistenceError> {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let mut tmp = NamedTempFile::new_in(dir)
                .map_err(|e| PersistenceError::operation("create record file", e))?;
            tmp.write_all(EMPTY_RECORD)
                .map_err(|e| PersistenceError::operation("initialize record file", e))?;

            match tmp.persist_noclobber(&path) {
                Ok(_) => Ok(true),
                Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(false),
                Err(e) => Err(PersistenceError::operation("create record file", e.error)),
            }
        })
        .await
        .map_err(|e| {
            PersistenceError::operation("create record file", io::Error::other(e))
        })??;

        if created {
            tracing::info!(path = %self.path.display(), "Created empty record file.");
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for JsonFileRecordStore {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()), level = "debug")]
    async fn load(&self) -> Result<Record, PersistenceError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.create_if_missing().await?;
                fs::read(&self.path)
                    .await
                    .map_err(|e| PersistenceError::operation("read record file", e))?
            }
            Err(e) => return Err(PersistenceError::operation("read record file", e)),
        };

        let record: Record = serde_json::from_slice(&bytes)?;
        tracing::debug!(entries = record.len(), "Loaded record.");
        Ok(record)
    }

    #[tracing::instrument(skip(self, record), fields(path = %self.path.display()), level = "debug")]
    async fn save(&self, record: &Record) -> Result<(), PersistenceError> {
        let mut body = serde_json::to_vec(record)?;
        body.push(b'\n');

        let mut file = fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    PersistenceError::NotFound(self.path.display().to_string())
                }
                _ => PersistenceError::operation("open record file for writing", e),
            })?;

        file.write_all(&body)
            .await
            .map_err(|e| PersistenceError::operation("write record file", e))?;
        file.flush()
            .await
            .map_err(|e| PersistenceError::operation("write record file", e))?;

        tracing::debug!(entries = record.len(), "Saved record.");
        Ok(())
    }
}
