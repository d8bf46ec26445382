//! SIGNA Stabilizer - From jittery per-frame labels to committed text
//!
//! The classifier fires on every frame; a held gesture would otherwise be
//! typed dozens of times per second. This crate implements:
//! - A bounded FIFO window over recent predicted labels
//! - A debounced commit state machine with an explicit `observe` step
//! - The transcript that consumes committed text edits

pub mod commit;
pub mod transcript;
pub mod window;

pub use commit::*;
pub use transcript::*;
pub use window::*;
