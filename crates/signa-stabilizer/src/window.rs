//! Prediction window - bounded FIFO over recent labels

use std::collections::VecDeque;

use signa_core::{Label, OrderedTally};

/// Default number of recent predictions considered for stability
pub const DEFAULT_WINDOW_SIZE: usize = 8;

/// Bounded FIFO of the most recent predicted labels
#[derive(Debug, Clone)]
pub struct PredictionWindow {
    entries: VecDeque<Label>,
    capacity: usize,
}

impl PredictionWindow {
    pub fn new(capacity: usize) -> Self {
        PredictionWindow {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Push a label, dropping the oldest entry beyond capacity
    pub fn push(&mut self, label: Label) {
        self.entries.push_back(label);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Drop all entries. Losing the hand resets stability immediately
    /// rather than letting it decay.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Majority label over the window in FIFO order, with ties going to the
    /// label that reached the winning count first.
    pub fn majority(&self) -> Option<(Label, usize)> {
        let tally: OrderedTally = self.entries.iter().collect();
        tally.best().map(|(label, count)| (label.clone(), count))
    }

    /// Fraction of the window agreeing on the majority label; 0.0 when empty
    pub fn stability(&self) -> f32 {
        match self.majority() {
            Some((_, count)) => count as f32 / self.entries.len() as f32,
            None => 0.0,
        }
    }
}

impl Default for PredictionWindow {
    fn default() -> Self {
        PredictionWindow::new(DEFAULT_WINDOW_SIZE)
    }
}
