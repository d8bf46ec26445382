//! Feature vectors
//!
//! A feature vector is the normalized numeric form of a full landmark set:
//! 3 coordinates per landmark, translation- and scale-invariant. Vectors are
//! immutable once created and compared by Euclidean distance.

use std::fmt;

/// Fixed-length numeric representation of a landmark set
#[derive(Clone, PartialEq, Default)]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
    pub fn new(coords: Vec<f32>) -> Self {
        FeatureVector(coords)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn into_coords(self) -> Vec<f32> {
        self.0
    }

    /// Euclidean distance to another vector of the same length
    pub fn distance(&self, other: &FeatureVector) -> f32 {
        debug_assert_eq!(self.len(), other.len());
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| {
                let d = a - b;
                d * d
            })
            .sum::<f32>()
            .sqrt()
    }
}

impl fmt::Debug for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeatureVector(dim={})", self.0.len())
    }
}

impl From<Vec<f32>> for FeatureVector {
    fn from(coords: Vec<f32>) -> Self {
        FeatureVector(coords)
    }
}
