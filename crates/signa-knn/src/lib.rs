//! SIGNA k-NN - Landmark normalization and nearest-neighbor classification
//!
//! This crate turns a raw landmark frame into a translation/scale-invariant
//! feature vector and classifies it against the training set with a
//! brute-force majority vote over the k closest samples.

pub mod classifier;
pub mod features;

pub use classifier::*;
pub use features::*;
