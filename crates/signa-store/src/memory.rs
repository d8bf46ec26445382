//! In-memory backend - default for tests and ephemeral sessions

use std::collections::BTreeMap;

use parking_lot::RwLock;

use signa_core::{Sample, SampleId, SignaResult};

use crate::SampleBackend;

/// Keyed in-memory sample table
#[derive(Debug, Default)]
pub struct MemoryBackend {
    rows: RwLock<BTreeMap<u64, Sample>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend::default()
    }

    /// Number of stored rows
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

impl SampleBackend for MemoryBackend {
    async fn insert(&self, sample: Sample) -> SignaResult<()> {
        self.rows.write().insert(sample.id.as_u64(), sample);
        Ok(())
    }

    async fn fetch_all(&self) -> SignaResult<Vec<Sample>> {
        Ok(self.rows.read().values().cloned().collect())
    }

    async fn remove(&self, ids: Vec<SampleId>) -> SignaResult<()> {
        let mut rows = self.rows.write();
        for id in ids {
            rows.remove(&id.as_u64());
        }
        Ok(())
    }

    async fn clear(&self) -> SignaResult<()> {
        self.rows.write().clear();
        Ok(())
    }

    async fn replace_all(&self, samples: Vec<Sample>) -> SignaResult<()> {
        let table: BTreeMap<u64, Sample> =
            samples.into_iter().map(|s| (s.id.as_u64(), s)).collect();
        *self.rows.write() = table;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signa_core::{FeatureVector, Label};

    fn sample(id: u64, label: &str) -> Sample {
        Sample::new(
            SampleId::new(id),
            Label::new(label).unwrap(),
            FeatureVector::new(vec![id as f32]),
        )
    }

    #[tokio::test]
    async fn test_insert_and_fetch() {
        let backend = MemoryBackend::new();
        backend.insert(sample(1, "A")).await.unwrap();
        backend.insert(sample(2, "B")).await.unwrap();

        let all = backend.fetch_all().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_remove_ignores_unknown_ids() {
        let backend = MemoryBackend::new();
        backend.insert(sample(1, "A")).await.unwrap();

        backend
            .remove(vec![SampleId::new(1), SampleId::new(99)])
            .await
            .unwrap();

        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_replace_all() {
        let backend = MemoryBackend::new();
        backend.insert(sample(1, "A")).await.unwrap();

        backend
            .replace_all(vec![sample(10, "C"), sample(11, "C")])
            .await
            .unwrap();

        let all = backend.fetch_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|s| s.label.as_str() == "C"));
    }
}
