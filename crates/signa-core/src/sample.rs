//! Training samples
//!
//! A sample is one labeled feature vector in the training set. Samples are
//! owned by the sample store and immutable once inserted; editing one means
//! delete + reinsert.

use crate::{FeatureVector, FrameTime, Label, Landmark, SampleId};

/// One labeled training record
#[derive(Debug, Clone)]
pub struct Sample {
    /// Store-assigned identity, never reused
    pub id: SampleId,
    pub label: Label,
    pub vector: FeatureVector,
    pub meta: Option<SampleMeta>,
}

/// Capture-time metadata attached to a sample
#[derive(Debug, Clone, PartialEq)]
pub struct SampleMeta {
    /// Wall-clock capture time (unix milliseconds)
    pub captured_at: FrameTime,
    /// Raw landmark frame the vector was derived from, kept for previews
    pub landmarks: Option<Vec<Landmark>>,
}

impl Sample {
    pub fn new(id: SampleId, label: Label, vector: FeatureVector) -> Self {
        Sample {
            id,
            label,
            vector,
            meta: None,
        }
    }

    pub fn with_meta(mut self, meta: SampleMeta) -> Self {
        self.meta = Some(meta);
        self
    }
}
