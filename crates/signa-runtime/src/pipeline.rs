//! Recognition pipeline
//!
//! One logical thread of control: `process_frame` runs to completion before
//! the next frame is handled, so classification of one frame never overlaps
//! the next. Persistence is the only asynchronous edge - capture updates
//! the mirror synchronously and lets the durable write finish behind a
//! ticket.

use std::sync::Arc;
use std::time::Duration;

use signa_core::{FrameTime, Label, Landmark, SampleId, SampleMeta, SignaError, SignaResult};
use signa_knn::{normalize_landmarks, KnnClassifier, Prediction, DEFAULT_K};
use signa_stabilizer::{CommitEvent, Stabilizer, StabilizerConfig, TextEdit, Transcript};
use signa_store::{unix_millis, DatasetStats, SampleBackend, SampleStore, WriteTicket};

/// Burst-capture tuning
#[derive(Debug, Clone)]
pub struct BurstConfig {
    /// Samples captured per burst
    pub samples: u32,
    /// Minimum spacing between burst captures
    pub interval: Duration,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            samples: 10,
            interval: Duration::from_millis(100),
        }
    }
}

/// Pipeline tuning
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Neighbors consulted per classification
    pub neighbors: usize,
    pub stabilizer: StabilizerConfig,
    pub burst: BurstConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            neighbors: DEFAULT_K,
            stabilizer: StabilizerConfig::default(),
            burst: BurstConfig::default(),
        }
    }
}

/// Counters accumulated over the pipeline's lifetime
#[derive(Debug, Clone, Default)]
pub struct RuntimeStats {
    pub frames: u64,
    pub predictions: u64,
    pub commits: u64,
    pub captures: u64,
}

/// What one frame produced
#[derive(Debug, Clone)]
pub struct FrameOutcome {
    pub prediction: Option<Prediction>,
    pub commit: Option<CommitEvent>,
}

/// An armed burst capture. The counter is its own cancellation token: the
/// burst disarms unconditionally once it reaches zero.
#[derive(Debug)]
struct BurstState {
    label: Label,
    remaining: u32,
    last_capture_at: Option<FrameTime>,
}

/// The recognition pipeline: normalize, classify, stabilize, commit
pub struct Pipeline<B: SampleBackend> {
    config: PipelineConfig,
    store: Arc<SampleStore<B>>,
    classifier: KnnClassifier,
    stabilizer: Stabilizer,
    transcript: Transcript,
    last_landmarks: Option<Vec<Landmark>>,
    last_prediction: Option<Prediction>,
    burst: Option<BurstState>,
    stats: RuntimeStats,
}

impl<B: SampleBackend> Pipeline<B> {
    /// Build a pipeline over a store. Call `store.reload().await` first so
    /// the mirror holds the durable table.
    pub fn new(store: Arc<SampleStore<B>>, config: PipelineConfig) -> SignaResult<Self> {
        let classifier = KnnClassifier::new(config.neighbors)?;
        let stabilizer = Stabilizer::new(config.stabilizer.clone());
        Ok(Pipeline {
            config,
            store,
            classifier,
            stabilizer,
            transcript: Transcript::new(),
            last_landmarks: None,
            last_prediction: None,
            burst: None,
            stats: RuntimeStats::default(),
        })
    }

    /// Process one landmark frame. `None` means no hand was detected.
    ///
    /// Frames are handled strictly in arrival order; an empty dataset and a
    /// missing hand both classify as absence and reset the stabilizer.
    pub fn process_frame(
        &mut self,
        landmarks: Option<&[Landmark]>,
        now: FrameTime,
    ) -> SignaResult<FrameOutcome> {
        self.stats.frames += 1;
        self.last_landmarks = landmarks.map(|lm| lm.to_vec());
        self.service_burst(now);

        let snapshot = self.store.snapshot();
        let prediction = match landmarks {
            Some(lm) if !snapshot.is_empty() => {
                let vector = normalize_landmarks(lm)?;
                self.classifier.classify(&snapshot, &vector)
            }
            _ => None,
        };
        if prediction.is_some() {
            self.stats.predictions += 1;
        }

        let commit = self
            .stabilizer
            .observe(prediction.as_ref().map(|p| &p.label), now);
        if let Some(event) = &commit {
            self.transcript.apply(&event.edit);
            self.stats.commits += 1;
            tracing::debug!("committed {} at {:?}", event.label, now);
        }

        self.last_prediction = prediction.clone();
        Ok(FrameOutcome { prediction, commit })
    }

    /// Capture the most recent landmark frame as a training sample
    pub fn capture(&mut self, label: Label) -> SignaResult<(SampleId, WriteTicket)> {
        let landmarks = self.last_landmarks.as_ref().ok_or(SignaError::NoHandInView)?;
        let vector = normalize_landmarks(landmarks)?;
        let meta = SampleMeta {
            captured_at: FrameTime::from_millis(unix_millis()),
            landmarks: Some(landmarks.clone()),
        };

        let (id, ticket) = self.store.add(label, vector, Some(meta));
        self.stats.captures += 1;
        Ok((id, ticket))
    }

    /// Arm a burst: one capture per elapsed interval, serviced by
    /// `process_frame`, until the configured count is reached. Arming while
    /// a burst is active replaces the previous burst. Frames without a hand
    /// leave the burst armed and waiting.
    pub fn begin_burst(&mut self, label: Label) -> SignaResult<()> {
        if self.last_landmarks.is_none() {
            return Err(SignaError::NoHandInView);
        }
        self.burst = Some(BurstState {
            label,
            remaining: self.config.burst.samples,
            last_capture_at: None,
        });
        Ok(())
    }

    pub fn burst_active(&self) -> bool {
        self.burst.is_some()
    }

    fn service_burst(&mut self, now: FrameTime) {
        if self.last_landmarks.is_none() {
            return;
        }
        let Some(burst) = self.burst.as_mut() else {
            return;
        };

        let interval = self.config.burst.interval;
        let due = burst
            .last_capture_at
            .map_or(true, |prev| now - prev >= interval);
        if !due {
            return;
        }

        burst.last_capture_at = Some(now);
        burst.remaining = burst.remaining.saturating_sub(1);
        let label = burst.label.clone();
        let finished = burst.remaining == 0;
        if finished {
            self.burst = None;
            tracing::debug!("burst capture complete");
        }

        match self.capture(label) {
            Ok((_, ticket)) => ticket.detach(),
            Err(e) => tracing::warn!("burst capture failed: {}", e),
        }
    }

    /// Manually commit the current prediction's edit, bypassing stability
    /// and debounce. The auto-commit debounce state is left untouched.
    pub fn commit_current(&mut self, now: FrameTime) -> Option<CommitEvent> {
        let prediction = self.last_prediction.as_ref()?;
        let edit = TextEdit::for_label(&prediction.label);
        self.transcript.apply(&edit);
        self.stats.commits += 1;

        Some(CommitEvent {
            label: prediction.label.clone(),
            edit,
            at: now,
        })
    }

    pub fn transcript(&self) -> &str {
        self.transcript.text()
    }

    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
    }

    pub fn last_prediction(&self) -> Option<&Prediction> {
        self.last_prediction.as_ref()
    }

    pub fn stabilizer(&self) -> &Stabilizer {
        &self.stabilizer
    }

    pub fn store(&self) -> &Arc<SampleStore<B>> {
        &self.store
    }

    pub fn dataset_stats(&self) -> DatasetStats {
        self.store.stats()
    }

    pub fn stats(&self) -> &RuntimeStats {
        &self.stats
    }
}
