use ndarray::Array1;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::error::{OptimisationError, Result};

/// Rejects search spaces with a non-finite range in any dimension
pub fn check_bounded(lower: &Array1<f64>, upper: &Array1<f64>) -> Result<()> {
    for (dimension, (&l, &u)) in lower.iter().zip(upper.iter()).enumerate() {
        if !(u - l).is_finite() {
            return Err(OptimisationError::UnboundedSearchSpace { dimension, lower: l, upper: u });
        }
    }
    Ok(())
}

/// Uniform sample in `[lower, upper)`, component-wise
pub fn uniform_in_bounds<R: Rng + ?Sized>(
    lower: &Array1<f64>,
    upper: &Array1<f64>,
    rng: &mut R,
) -> Array1<f64> {
    Array1::from_shape_fn(lower.len(), |i| lower[i] + rng.random::<f64>() * (upper[i] - lower[i]))
}

/// Uniformly distributed direction on the unit sphere
pub fn random_unit_vector<R: Rng + ?Sized>(number_of_dimensions: usize, rng: &mut R) -> Array1<f64> {
    loop {
        let direction: Array1<f64> =
            Array1::from_shape_fn(number_of_dimensions, |_| rng.sample(StandardNormal));
        let norm = direction.dot(&direction).sqrt();
        if norm > 0.0 {
            return direction / norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_check_bounded() {
        assert!(check_bounded(&array![-1.0, 0.0], &array![1.0, 0.0]).is_ok());
        assert!(matches!(
            check_bounded(&array![-1.0, -f64::MAX], &array![1.0, f64::MAX]),
            Err(OptimisationError::UnboundedSearchSpace { dimension: 1, .. })
        ));
        assert!(check_bounded(&array![f64::NEG_INFINITY], &array![0.0]).is_err());
    }

    #[test]
    fn test_uniform_in_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let lower = array![-5.0, 10.0];
        let upper = array![5.0, 10.5];
        for _ in 0..1000 {
            let x = uniform_in_bounds(&lower, &upper, &mut rng);
            assert!(x[0] >= -5.0 && x[0] <= 5.0);
            assert!(x[1] >= 10.0 && x[1] <= 10.5);
        }
    }

    #[test]
    fn test_random_unit_vector() {
        let mut rng = StdRng::seed_from_u64(4);
        for d in 1..6 {
            let u = random_unit_vector(d, &mut rng);
            assert!((u.dot(&u) - 1.0).abs() < 1e-12);
        }
    }
}
