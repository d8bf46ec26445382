//! Durable backend contract
//!
//! The durable record store is an external collaborator: a keyed table of
//! samples supporting insert, full scan, batched delete, delete-all, and
//! transactional bulk replace. A backend serializes its own writes
//! internally; callers must not assume completion order across overlapping
//! calls unless they await each one.

use std::future::Future;

use signa_core::{Sample, SampleId, SignaResult};

/// Durable sample storage
pub trait SampleBackend: Send + Sync + 'static {
    /// Persist one sample under its assigned id
    fn insert(&self, sample: Sample) -> impl Future<Output = SignaResult<()>> + Send;

    /// Scan every live sample, in store-defined order
    fn fetch_all(&self) -> impl Future<Output = SignaResult<Vec<Sample>>> + Send;

    /// Remove samples by id; unknown ids are silently ignored
    fn remove(&self, ids: Vec<SampleId>) -> impl Future<Output = SignaResult<()>> + Send;

    /// Remove every sample
    fn clear(&self) -> impl Future<Output = SignaResult<()>> + Send;

    /// Atomically replace the whole table
    fn replace_all(&self, samples: Vec<Sample>) -> impl Future<Output = SignaResult<()>> + Send;
}
