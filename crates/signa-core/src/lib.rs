//! SIGNA Core - Fundamental types and primitives
//!
//! This crate defines the core types used throughout the SIGNA engine:
//! - Identifiers (SampleId)
//! - Time primitives (FrameTime)
//! - Hand model (Landmark, HandLandmark)
//! - Gesture labels, feature vectors, and samples
//! - Ordered majority voting

pub mod error;
pub mod hand;
pub mod id;
pub mod label;
pub mod sample;
pub mod tally;
pub mod time;
pub mod vector;

pub use error::*;
pub use hand::*;
pub use id::*;
pub use label::*;
pub use sample::*;
pub use tally::*;
pub use time::*;
pub use vector::*;
