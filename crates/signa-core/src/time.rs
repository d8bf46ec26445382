//! Time primitives for the SIGNA engine
//!
//! Every timing rule in the pipeline (commit gaps, burst intervals) is
//! expressed in milliseconds, so frame time is a millisecond count. The
//! value is an offset from whatever epoch the embedding clock chose; only
//! differences between frame times are meaningful.

use std::ops::{Add, Sub};
use std::time::Duration;

/// Frame time - milliseconds since the session clock's epoch
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FrameTime(pub i64);

impl FrameTime {
    pub const ZERO: FrameTime = FrameTime(0);

    #[inline]
    pub fn from_millis(millis: i64) -> Self {
        FrameTime(millis)
    }

    #[inline]
    pub fn as_millis(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }

    #[inline]
    pub fn saturating_add(self, duration: Duration) -> Self {
        FrameTime(self.0.saturating_add(duration.as_millis() as i64))
    }

    /// Elapsed time since an earlier frame time, zero if `earlier` is ahead.
    #[inline]
    pub fn since(self, earlier: FrameTime) -> Duration {
        let diff = self.0 - earlier.0;
        if diff >= 0 {
            Duration::from_millis(diff as u64)
        } else {
            Duration::ZERO
        }
    }
}

impl Add<Duration> for FrameTime {
    type Output = FrameTime;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        FrameTime(self.0 + rhs.as_millis() as i64)
    }
}

impl Sub<FrameTime> for FrameTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: FrameTime) -> Self::Output {
        self.since(rhs)
    }
}

impl std::fmt::Debug for FrameTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t+{}ms", self.0)
    }
}
