//! Dataset statistics - label -> count view over the mirror

use std::collections::BTreeMap;
use std::fmt;

use signa_core::Sample;

/// Per-label sample counts, ordered by label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetStats {
    counts: BTreeMap<String, usize>,
}

impl DatasetStats {
    pub fn from_samples(samples: &[Sample]) -> Self {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for sample in samples {
            *counts.entry(sample.label.as_str().to_string()).or_default() += 1;
        }
        DatasetStats { counts }
    }

    /// Samples stored for a label; zero for unknown labels
    pub fn count(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// (label, count) pairs in label order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(l, c)| (l.as_str(), *c))
    }
}

impl fmt::Display for DatasetStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (label, count) in self.iter() {
            if !first {
                f.write_str(" | ")?;
            }
            write!(f, "{}: {}", label, count)?;
            first = false;
        }
        Ok(())
    }
}
