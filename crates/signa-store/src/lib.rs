//! SIGNA Store - Durable training-set storage
//!
//! This crate implements the sample store:
//! - The durable backend contract and two backends (memory, JSON file)
//! - The store itself: in-memory mirror, optimistic adds, reload
//! - Dataset statistics (label -> count)
//! - The import/export document format

pub mod backend;
pub mod export;
pub mod json;
pub mod memory;
pub mod stats;
pub mod store;

pub use backend::*;
pub use export::*;
pub use json::*;
pub use memory::*;
pub use stats::*;
pub use store::*;
