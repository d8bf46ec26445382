//! JSON file backend
//!
//! Persists the whole table as one JSON document. The table stays in the
//! hundreds of rows, so rewriting it per mutation is cheaper than a real
//! database; the rewrite goes through a temp file + rename so a crash never
//! leaves a half-written table. Writes are serialized through an async
//! mutex; overlapping callers interleave in lock-acquisition order.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use signa_core::{Sample, SampleId, SignaError, SignaResult};

use crate::{SampleBackend, SampleRecord};

/// Durable backend over a single JSON file
#[derive(Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
    guard: Mutex<()>,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileBackend {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the table; a missing file is an empty table
    async fn load_table(&self) -> SignaResult<Vec<Sample>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(SignaError::Storage(e.to_string())),
        };

        let records: Vec<SampleRecord> =
            serde_json::from_slice(&bytes).map_err(|e| SignaError::Storage(e.to_string()))?;
        records.into_iter().map(SampleRecord::into_sample).collect()
    }

    async fn persist_table(&self, samples: &[Sample]) -> SignaResult<()> {
        let records: Vec<SampleRecord> = samples.iter().map(SampleRecord::from_sample).collect();
        let bytes =
            serde_json::to_vec_pretty(&records).map_err(|e| SignaError::Storage(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| SignaError::Storage(e.to_string()))?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| SignaError::Storage(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| SignaError::Storage(e.to_string()))?;
        Ok(())
    }
}

impl SampleBackend for JsonFileBackend {
    async fn insert(&self, sample: Sample) -> SignaResult<()> {
        let _guard = self.guard.lock().await;
        let mut table = self.load_table().await?;
        table.retain(|s| s.id != sample.id);
        table.push(sample);
        self.persist_table(&table).await
    }

    async fn fetch_all(&self) -> SignaResult<Vec<Sample>> {
        let _guard = self.guard.lock().await;
        self.load_table().await
    }

    async fn remove(&self, ids: Vec<SampleId>) -> SignaResult<()> {
        let _guard = self.guard.lock().await;
        let mut table = self.load_table().await?;
        table.retain(|s| !ids.contains(&s.id));
        self.persist_table(&table).await
    }

    async fn clear(&self) -> SignaResult<()> {
        let _guard = self.guard.lock().await;
        self.persist_table(&[]).await
    }

    async fn replace_all(&self, samples: Vec<Sample>) -> SignaResult<()> {
        let _guard = self.guard.lock().await;
        self.persist_table(&samples).await
    }
}
