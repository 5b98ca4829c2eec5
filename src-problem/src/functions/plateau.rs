//! Plateau landscapes

use ndarray::Array1;

use crate::problem::ObjectiveFunction;

/// Max zeros: number of components that do not round to zero
/// Global minimum: f(z) = 0 for every z in (-0.5, 0.5)^d
pub fn max_zeros(z: &Array1<f64>) -> f64 {
    z.iter().filter(|&&zi| zi.round() != 0.0).count() as f64
}

#[derive(Debug, Clone, Default)]
pub struct MaxZeros;

impl ObjectiveFunction for MaxZeros {
    fn name(&self) -> &str {
        "max-zeros"
    }

    fn objective_value(&self, parameter: &Array1<f64>) -> f64 {
        max_zeros(parameter)
    }
}
