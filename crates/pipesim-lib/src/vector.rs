use serde::Serialize;

use crate::config::EMBEDDING_DIMENSION;

/// A simulated embedding: one value per semantic axis.
pub type Vector = [f32; EMBEDDING_DIMENSION];

/// Cosine similarity of two vectors, in `[-1, 1]`.
///
/// Returns `0.0` when either vector has zero norm or when the lengths differ.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Euclidean (L2) distance between two vectors.
///
/// Vectors of different length are infinitely far apart.
#[must_use]
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return f32::INFINITY;
    }
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f32>()
        .sqrt()
}

/// Component-wise mean of a set of vectors. An empty set yields the zero
/// vector.
#[must_use]
pub fn mean(vectors: &[Vector]) -> Vector {
    let mut acc = [0.0_f32; EMBEDDING_DIMENSION];
    if vectors.is_empty() {
        return acc;
    }
    for v in vectors {
        for (slot, x) in acc.iter_mut().zip(v) {
            *slot += x;
        }
    }
    #[allow(clippy::cast_precision_loss)]
    let n = vectors.len() as f32;
    acc.map(|x| x / n)
}

/// A position on the 2-D drag canvas, in percent of its width/height.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp both coordinates into the `[0, 100]` canvas.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, 100.0),
            y: self.y.clamp(0.0, 100.0),
        }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}
