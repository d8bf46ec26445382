//! Identity types for the SIGNA engine

use std::fmt;

/// Training sample identity - assigned by the sample store at insertion,
/// never reused within a store's lifetime.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SampleId(pub u64);

impl SampleId {
    pub const ZERO: SampleId = SampleId(0);

    #[inline]
    pub fn new(id: u64) -> Self {
        SampleId(id)
    }

    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sample(#{})", self.0)
    }
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
