//! Landmark normalization - raw hand landmarks to feature vectors
//!
//! The normalizer removes where the hand is (translation) and how close it
//! is to the camera (uniform scale), leaving only the hand's shape. Hand
//! orientation is deliberately NOT removed; rotated poses classify as
//! different gestures.

use signa_core::{FeatureVector, Landmark, SignaError, SignaResult};

/// Lower bound on the bounding-box extent used as the scale divisor.
/// Keeps degenerate frames (single point, perfectly flat pose) finite.
pub const SCALE_FLOOR: f32 = 1e-5;

/// Normalize a landmark frame into a feature vector of length `3 * L`.
///
/// Each output coordinate is `(c - center) / scale`, where `center` is the
/// midpoint of the axis-aligned bounding box and `scale` is the largest box
/// extent across the three axes (floored at [`SCALE_FLOOR`]). Identical
/// input produces bit-identical output.
pub fn normalize_landmarks(landmarks: &[Landmark]) -> SignaResult<FeatureVector> {
    if landmarks.is_empty() {
        return Err(SignaError::EmptyLandmarks);
    }

    let mut min = [f32::INFINITY; 3];
    let mut max = [f32::NEG_INFINITY; 3];
    for lm in landmarks {
        for (axis, c) in [lm.x, lm.y, lm.z].into_iter().enumerate() {
            min[axis] = min[axis].min(c);
            max[axis] = max[axis].max(c);
        }
    }

    let center = [
        (min[0] + max[0]) / 2.0,
        (min[1] + max[1]) / 2.0,
        (min[2] + max[2]) / 2.0,
    ];
    let scale = (max[0] - min[0])
        .max(max[1] - min[1])
        .max(max[2] - min[2])
        .max(SCALE_FLOOR);

    let mut coords = Vec::with_capacity(landmarks.len() * 3);
    for lm in landmarks {
        coords.push((lm.x - center[0]) / scale);
        coords.push((lm.y - center[1]) / scale);
        coords.push((lm.z - center[2]) / scale);
    }

    Ok(FeatureVector::new(coords))
}
