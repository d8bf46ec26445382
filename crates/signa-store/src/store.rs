//! Sample store - sole owner of the dataset
//!
//! The store keeps an in-memory mirror of the durable table and hands out
//! cheap read-only snapshots for classification. `add` updates the mirror
//! synchronously - a just-captured sample is usable on the very next frame -
//! and pushes the durable write into the background. If that write fails,
//! the mirror is NOT rolled back: the caller either awaits the returned
//! ticket and handles the error, or reconciles later with `reload`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::task::JoinHandle;

use signa_core::{FeatureVector, Label, Sample, SampleId, SampleMeta, SignaError, SignaResult};

use crate::{DatasetStats, SampleBackend};

/// Handle on one in-flight durable write
#[derive(Debug)]
pub struct WriteTicket {
    handle: JoinHandle<SignaResult<()>>,
}

impl WriteTicket {
    /// Await the durable write's outcome
    pub async fn wait(self) -> SignaResult<()> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(SignaError::Storage(format!(
                "durable write task failed: {}",
                e
            ))),
        }
    }

    /// Let the write finish in the background, logging any failure.
    /// The mirror and durable store diverge silently on error until the
    /// next `reload`; prefer `wait` where an error path exists.
    pub fn detach(self) {
        tokio::spawn(async move {
            if let Err(e) = self.wait().await {
                tracing::warn!("durable sample write failed: {}", e);
            }
        });
    }
}

/// Durable CRUD over samples, with an in-memory mirror for classification
#[derive(Debug)]
pub struct SampleStore<B: SampleBackend> {
    backend: Arc<B>,
    mirror: RwLock<Arc<Vec<Sample>>>,
    next_id: AtomicU64,
}

impl<B: SampleBackend> SampleStore<B> {
    pub fn new(backend: B) -> Self {
        SampleStore {
            backend: Arc::new(backend),
            mirror: RwLock::new(Arc::new(Vec::new())),
            next_id: AtomicU64::new(1),
        }
    }

    /// Read-only view of the mirror. Cheap to take per frame; the snapshot
    /// never changes under the holder.
    pub fn snapshot(&self) -> Arc<Vec<Sample>> {
        self.mirror.read().clone()
    }

    /// Mirror size
    pub fn len(&self) -> usize {
        self.mirror.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.mirror.read().is_empty()
    }

    /// Label -> count over the mirror
    pub fn stats(&self) -> DatasetStats {
        DatasetStats::from_samples(&self.snapshot())
    }

    /// Insert a sample: the mirror is updated before this returns, the
    /// durable write completes behind the returned ticket. Ids are assigned
    /// here and never reused. Must be called within a tokio runtime.
    pub fn add(
        &self,
        label: Label,
        vector: FeatureVector,
        meta: Option<SampleMeta>,
    ) -> (SampleId, WriteTicket) {
        let id = SampleId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let sample = Sample {
            id,
            label,
            vector,
            meta,
        };

        {
            let mut mirror = self.mirror.write();
            let mut rows = (**mirror).clone();
            rows.push(sample.clone());
            *mirror = Arc::new(rows);
        }
        tracing::debug!("added sample {} ({})", id, sample.label);

        let backend = Arc::clone(&self.backend);
        let handle = tokio::spawn(async move { backend.insert(sample).await });
        (id, WriteTicket { handle })
    }

    /// Full scan of the durable table
    pub async fn get_all(&self) -> SignaResult<Vec<Sample>> {
        self.backend.fetch_all().await
    }

    /// Remove durable rows by id; unknown ids are ignored (idempotent).
    /// Call `reload` afterwards to refresh the mirror.
    pub async fn delete_by_ids(&self, ids: &[SampleId]) -> SignaResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        self.backend.remove(ids.to_vec()).await?;
        tracing::debug!("deleted {} samples", ids.len());
        Ok(())
    }

    /// Remove every durable row carrying `label`. The matching ids are
    /// resolved at call time; inserts racing this call may be missed.
    pub async fn delete_by_label(&self, label: &Label) -> SignaResult<()> {
        let ids: Vec<SampleId> = self
            .backend
            .fetch_all()
            .await?
            .into_iter()
            .filter(|s| &s.label == label)
            .map(|s| s.id)
            .collect();
        self.delete_by_ids(&ids).await
    }

    /// Remove every durable row. Call `reload` afterwards.
    pub async fn clear(&self) -> SignaResult<()> {
        self.backend.clear().await
    }

    /// Bulk-replace the durable table, assigning fresh ids to every record.
    /// Atomic from this caller's perspective. Call `reload` afterwards.
    pub async fn replace_all(
        &self,
        samples: Vec<(Label, FeatureVector, Option<SampleMeta>)>,
    ) -> SignaResult<()> {
        let rows: Vec<Sample> = samples
            .into_iter()
            .map(|(label, vector, meta)| Sample {
                id: SampleId::new(self.next_id.fetch_add(1, Ordering::Relaxed)),
                label,
                vector,
                meta,
            })
            .collect();
        self.backend.replace_all(rows).await
    }

    /// Re-read the durable table into the mirror, restoring the invariant
    /// that the mirror equals the live rows. Also advances the id counter
    /// past the highest live id so ids are never reused.
    pub async fn reload(&self) -> SignaResult<()> {
        let rows = self.backend.fetch_all().await?;

        let highest = rows.iter().map(|s| s.id.as_u64()).max().unwrap_or(0);
        self.next_id.fetch_max(highest + 1, Ordering::Relaxed);

        let count = rows.len();
        *self.mirror.write() = Arc::new(rows);
        tracing::debug!("reloaded {} samples from durable store", count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryBackend;

    fn vector(coords: &[f32]) -> FeatureVector {
        FeatureVector::new(coords.to_vec())
    }

    fn label(s: &str) -> Label {
        Label::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_add_updates_mirror_before_durable_write() {
        let store = SampleStore::new(MemoryBackend::new());

        let (id, ticket) = store.add(label("A"), vector(&[0.0]), None);

        // Mirror sees the sample immediately, without awaiting the write
        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot()[0].id, id);

        ticket.wait().await.unwrap();
        assert_eq!(store.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_is_stable_under_mutation() {
        let store = SampleStore::new(MemoryBackend::new());
        let (_, t1) = store.add(label("A"), vector(&[0.0]), None);

        let snapshot = store.snapshot();
        let (_, t2) = store.add(label("B"), vector(&[1.0]), None);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len(), 2);

        t1.wait().await.unwrap();
        t2.wait().await.unwrap();
    }

    #[tokio::test]
    async fn test_ids_ascend_and_never_repeat() {
        let store = SampleStore::new(MemoryBackend::new());

        let (id1, t1) = store.add(label("A"), vector(&[0.0]), None);
        let (id2, t2) = store.add(label("A"), vector(&[1.0]), None);
        t1.wait().await.unwrap();
        t2.wait().await.unwrap();

        assert!(id2 > id1);

        // Deleting and reloading never resurrects an id
        store.delete_by_ids(&[id2]).await.unwrap();
        store.reload().await.unwrap();
        let (id3, t3) = store.add(label("A"), vector(&[2.0]), None);
        t3.wait().await.unwrap();

        assert!(id3 > id2);
    }

    #[tokio::test]
    async fn test_delete_by_ids_is_idempotent() {
        let store = SampleStore::new(MemoryBackend::new());
        let (id, ticket) = store.add(label("A"), vector(&[0.0]), None);
        ticket.wait().await.unwrap();

        store.delete_by_ids(&[id]).await.unwrap();
        store.reload().await.unwrap();
        let len_after_first = store.len();

        // Second delete of the same id: no error, size unchanged
        store.delete_by_ids(&[id]).await.unwrap();
        store.reload().await.unwrap();

        assert_eq!(store.len(), len_after_first);
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_delete_by_label() {
        let store = SampleStore::new(MemoryBackend::new());
        let (_, t1) = store.add(label("A"), vector(&[0.0]), None);
        let (_, t2) = store.add(label("B"), vector(&[1.0]), None);
        let (_, t3) = store.add(label("A"), vector(&[2.0]), None);
        for t in [t1, t2, t3] {
            t.wait().await.unwrap();
        }

        store.delete_by_label(&label("A")).await.unwrap();
        store.reload().await.unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot()[0].label.as_str(), "B");
    }

    #[tokio::test]
    async fn test_clear_then_reload_empties_mirror() {
        let store = SampleStore::new(MemoryBackend::new());
        let (_, ticket) = store.add(label("A"), vector(&[0.0]), None);
        ticket.wait().await.unwrap();

        store.clear().await.unwrap();
        // Mirror diverges until reload
        assert_eq!(store.len(), 1);

        store.reload().await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_replace_all_reassigns_ids() {
        let store = SampleStore::new(MemoryBackend::new());
        let (old_id, ticket) = store.add(label("A"), vector(&[0.0]), None);
        ticket.wait().await.unwrap();

        store
            .replace_all(vec![
                (label("C"), vector(&[1.0]), None),
                (label("C"), vector(&[2.0]), None),
            ])
            .await
            .unwrap();
        store.reload().await.unwrap();

        assert_eq!(store.len(), 2);
        for sample in store.snapshot().iter() {
            assert_eq!(sample.label.as_str(), "C");
            assert!(sample.id > old_id);
        }
    }

    #[tokio::test]
    async fn test_stats_over_mirror() {
        let store = SampleStore::new(MemoryBackend::new());
        let (_, t1) = store.add(label("A"), vector(&[0.0]), None);
        let (_, t2) = store.add(label("A"), vector(&[1.0]), None);
        let (_, t3) = store.add(label("B"), vector(&[2.0]), None);
        for t in [t1, t2, t3] {
            t.wait().await.unwrap();
        }

        let stats = store.stats();
        assert_eq!(stats.count("A"), 2);
        assert_eq!(stats.count("B"), 1);
        assert_eq!(stats.total(), 3);
    }
}
