//! Benchmark landscape families organized by category
//!
//! - `unimodal`: single basin, differently conditioned (sphere, ellipsoidal, discus, ...)
//! - `multimodal`: many regularly placed local optima (rastrigin variants)
//! - `plateau`: piecewise constant landscapes (max zeros)
//!
//! Each family receives the shifted and rotated parameter `z` from the
//! [`crate::OptimisationProblem`] and only holds its own instance data
//! (internal rotations, scalings, optimum signs).

pub mod multimodal;
pub mod plateau;
pub mod unimodal;

pub use multimodal::*;
pub use plateau::*;
pub use unimodal::*;

/// `10 (d - sum(cos(2 pi y_i))) + |y|^2`, shared by the rastrigin variants
pub(crate) fn rastrigin_sum(y: &ndarray::Array1<f64>) -> f64 {
    let d = y.len() as f64;
    let cosine: f64 = y.iter().map(|&yi| (2.0 * std::f64::consts::PI * yi).cos()).sum();
    10.0 * (d - cosine) + y.dot(y)
}
