//! Multimodal benchmark families
//!
//! Rastrigin-type landscapes: roughly 10^d regularly spaced local minima
//! on top of a quadratic bowl.

use ndarray::{Array1, Array2};

use super::rastrigin_sum;
use crate::problem::ObjectiveFunction;
use crate::transform::{asymmetric, delta, oscillate, penalty, scaling};

/// Rastrigin with oscillation, asymmetry and a conditioning of 10
#[derive(Debug, Clone)]
pub struct Rastrigin {
    delta: Array2<f64>,
}

impl Rastrigin {
    pub fn new(number_of_dimensions: usize) -> Self {
        Self { delta: delta(10.0, number_of_dimensions) }
    }
}

impl ObjectiveFunction for Rastrigin {
    fn name(&self) -> &str {
        "rastrigin"
    }

    fn objective_value(&self, parameter: &Array1<f64>) -> f64 {
        let y = self.delta.dot(&asymmetric(0.2, &oscillate(parameter)));
        rastrigin_sum(&y)
    }
}

/// Büche-Rastrigin: separable and deceptive, even-indexed (1st, 3rd, ...)
/// components are 10 times steeper on the positive side.
///
/// Adds `100 * penalty(x)` outside `[-5, 5]^d`.
#[derive(Debug, Clone)]
pub struct BuecheRastrigin {
    scaling: Array1<f64>,
}

impl BuecheRastrigin {
    pub fn new(number_of_dimensions: usize) -> Self {
        Self { scaling: scaling(10.0_f64.sqrt(), number_of_dimensions) }
    }
}

impl ObjectiveFunction for BuecheRastrigin {
    fn name(&self) -> &str {
        "bueche-rastrigin"
    }

    fn objective_value(&self, parameter: &Array1<f64>) -> f64 {
        let mut y = &self.scaling * &oscillate(parameter);
        for (n, yi) in y.iter_mut().enumerate() {
            // positions 0, 2, 4, ... (1st, 3rd, 5th, ... component)
            if n % 2 == 0 && *yi > 0.0 {
                *yi *= 10.0;
            }
        }
        rastrigin_sum(&y)
    }

    fn soft_constraint_value(&self, parameter: &Array1<f64>) -> f64 {
        100.0 * penalty(parameter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_rastrigin_optimum() {
        let f = Rastrigin::new(3);
        assert!(f.objective_value(&array![0.0, 0.0, 0.0]).abs() < 1e-12);
        // integer points are local minima of the cosine term only
        assert!(f.objective_value(&array![1.0, 0.0, 0.0]) > 0.5);
    }

    #[test]
    fn test_bueche_rastrigin_asymmetry() {
        let f = BuecheRastrigin::new(2);
        assert!(f.objective_value(&array![0.0, 0.0]).abs() < 1e-12);
        // oscillate(±1) = ±1, first component is amplified only on the positive side
        let positive = f.objective_value(&array![1.0, 0.0]);
        let negative = f.objective_value(&array![-1.0, 0.0]);
        assert!((positive - 100.0).abs() < 1e-9, "positive = {}", positive);
        assert!((negative - 1.0).abs() < 1e-9, "negative = {}", negative);

        // the second component is symmetric
        let positive = f.objective_value(&array![0.0, 1.0]);
        let negative = f.objective_value(&array![0.0, -1.0]);
        assert!((positive - negative).abs() < 1e-9, "{} != {}", positive, negative);
    }

    #[test]
    fn test_bueche_rastrigin_penalty() {
        let f = BuecheRastrigin::new(2);
        assert_eq!(f.soft_constraint_value(&array![5.0, -5.0]), 0.0);
        assert!((f.soft_constraint_value(&array![6.0, 0.0]) - 100.0).abs() < 1e-12);
    }
}
