//! Brute-force k-nearest-neighbor classifier
//!
//! No index structure: the training set stays in the hundreds, so a linear
//! scan per frame is cheaper than maintaining anything smarter.

use signa_core::{FeatureVector, Label, OrderedTally, Sample, SampleId, SignaError, SignaResult};

/// Default neighbor count consulted per classification
pub const DEFAULT_K: usize = 7;

/// One consulted neighbor, in ascending-distance order
#[derive(Debug, Clone)]
pub struct Neighbor {
    pub id: SampleId,
    pub label: Label,
    pub distance: f32,
}

/// Result of one classification call. Ephemeral; produced fresh per frame.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub label: Label,
    /// Fraction of consulted neighbors agreeing on the label, in [0, 1]
    pub confidence: f32,
    pub neighbors: Vec<Neighbor>,
}

/// Brute-force k-NN over a read-only dataset snapshot
#[derive(Debug, Clone)]
pub struct KnnClassifier {
    k: usize,
}

impl KnnClassifier {
    /// Create a classifier consulting `k` neighbors; `k` must be at least 1
    pub fn new(k: usize) -> SignaResult<Self> {
        if k == 0 {
            return Err(SignaError::InvalidNeighborCount(k));
        }
        Ok(KnnClassifier { k })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Classify `query` against `samples`.
    ///
    /// Returns `None` on an empty dataset (absence, not an error). This is a
    /// pure query: the snapshot is never mutated, and concurrent calls over
    /// the same snapshot are safe.
    pub fn classify(&self, samples: &[Sample], query: &FeatureVector) -> Option<Prediction> {
        if samples.is_empty() {
            return None;
        }

        let mut ranked: Vec<(usize, f32)> = samples
            .iter()
            .enumerate()
            .map(|(idx, s)| (idx, query.distance(&s.vector)))
            .collect();
        // Stable sort: equal distances keep dataset order
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

        let take = self.k.min(ranked.len());
        let neighbors: Vec<Neighbor> = ranked[..take]
            .iter()
            .map(|&(idx, distance)| Neighbor {
                id: samples[idx].id,
                label: samples[idx].label.clone(),
                distance,
            })
            .collect();

        // Majority vote in ascending-distance order; ties go to the label
        // that reached the winning count first (closer neighbors win).
        let tally: OrderedTally = neighbors.iter().map(|n| &n.label).collect();
        let (label, count) = tally.best()?;

        Some(Prediction {
            label: label.clone(),
            confidence: count as f32 / take as f32,
            neighbors,
        })
    }
}

impl Default for KnnClassifier {
    fn default() -> Self {
        KnnClassifier { k: DEFAULT_K }
    }
}
