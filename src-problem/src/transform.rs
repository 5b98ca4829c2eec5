//! Landscape transforms shared by the benchmark families
//!
//! Every transform is a pure function of its input. The number of
//! dimensions is taken from the length of the vector (or the explicit
//! `number_of_dimensions` argument) so the same primitives compose across
//! families. Composition order matters: these maps do not commute.

use ndarray::{Array1, Array2};
use rand::Rng;
use rand_distr::StandardNormal;

use crate::linalg::determinant;

/// Position of component `n` on the unit interval, `n / (d - 1)`.
///
/// A one-dimensional problem has a single component at position 0.
pub fn spacing(n: usize, number_of_dimensions: usize) -> f64 {
    if number_of_dimensions > 1 {
        n as f64 / (number_of_dimensions - 1) as f64
    } else {
        0.0
    }
}

/// Sign-preserving logarithmic ripple applied to a single value
pub fn oscillate_value(value: f64) -> f64 {
    if value == 0.0 {
        return 0.0;
    }

    let (c1, c2) = if value > 0.0 { (10.0, 7.9) } else { (5.5, 3.1) };
    let x = value.abs().ln();
    value.signum() * (x + 0.049 * ((c1 * x).sin() + (c2 * x).sin())).exp()
}

/// Element-wise [`oscillate_value`]
pub fn oscillate(parameter: &Array1<f64>) -> Array1<f64> {
    parameter.mapv(oscillate_value)
}

/// Asymmetric transform: positive components `v` become `v^(1 + beta * spacing * sqrt(v))`
pub fn asymmetric(beta: f64, parameter: &Array1<f64>) -> Array1<f64> {
    let d = parameter.len();
    Array1::from_shape_fn(d, |n| {
        let value = parameter[n];
        if value > 0.0 {
            value.powf(1.0 + beta * spacing(n, d) * value.sqrt())
        } else {
            value
        }
    })
}

/// Diagonal conditioning matrix with entries `alpha^(0.5 * i / (d - 1))`
pub fn delta(alpha: f64, number_of_dimensions: usize) -> Array2<f64> {
    let mut delta = Array2::<f64>::eye(number_of_dimensions);
    for i in 0..number_of_dimensions {
        delta[[i, i]] = alpha.powf(0.5 * spacing(i, number_of_dimensions));
    }
    delta
}

/// Scaling vector with entries `condition^(i / (d - 1))`
pub fn scaling(condition: f64, number_of_dimensions: usize) -> Array1<f64> {
    Array1::from_shape_fn(number_of_dimensions, |i| {
        condition.powf(spacing(i, number_of_dimensions))
    })
}

/// Soft boundary cost `sum(max(0, |x_i| - 5)^2)`
pub fn penalty(parameter: &Array1<f64>) -> f64 {
    parameter.iter().map(|&x| (x.abs() - 5.0).max(0.0).powi(2)).sum()
}

/// Random proper rotation of size `d`.
///
/// A standard-normal matrix is orthonormalised column by column
/// (Gram-Schmidt). If the result is a reflection, the first column is
/// negated so that the determinant is +1.
pub fn random_rotation<R: Rng + ?Sized>(number_of_dimensions: usize, rng: &mut R) -> Array2<f64> {
    let d = number_of_dimensions;

    loop {
        let mut rotation =
            Array2::from_shape_fn((d, d), |_| rng.sample::<f64, _>(StandardNormal));

        let mut degenerate = false;
        for n in 0..d {
            for m in 0..n {
                let projection = rotation.column(n).dot(&rotation.column(m));
                let previous = rotation.column(m).to_owned();
                let mut column = rotation.column_mut(n);
                column.scaled_add(-projection, &previous);
            }

            let norm = rotation.column(n).dot(&rotation.column(n)).sqrt();
            if norm < 1e-12 {
                degenerate = true;
                break;
            }
            rotation.column_mut(n).mapv_inplace(|v| v / norm);
        }

        // Linearly dependent draws are practically impossible, but redraw rather than divide by 0.
        if degenerate {
            continue;
        }

        if determinant(&rotation.view()) < 0.0 {
            rotation.column_mut(0).mapv_inplace(|v| -v);
        }

        return rotation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::check_rotation_matrix;
    use ndarray::array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_oscillate_fixed_points() {
        assert_eq!(oscillate_value(0.0), 0.0);
        // ln(1) = 0, so the ripple vanishes
        assert!((oscillate_value(1.0) - 1.0).abs() < 1e-15);
        assert!((oscillate_value(-1.0) + 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_oscillate_preserves_sign() {
        let x = array![-3.0, -0.2, 0.0, 0.2, 3.0];
        let y = oscillate(&x);
        for (a, b) in x.iter().zip(y.iter()) {
            if *a == 0.0 {
                assert_eq!(*b, 0.0);
            } else {
                assert_eq!(a.signum(), b.signum(), "{} -> {}", a, b);
            }
        }
    }

    #[test]
    fn test_asymmetric() {
        let x = array![4.0, -2.0, 4.0];
        let y = asymmetric(0.5, &x);
        // first component sits at spacing 0: unchanged
        assert_eq!(y[0], 4.0);
        // non-positive values are untouched
        assert_eq!(y[1], -2.0);
        // last component: 4^(1 + 0.5 * 1 * 2) = 4^2
        assert!((y[2] - 16.0).abs() < 1e-12);
    }

    #[test]
    fn test_delta_and_scaling() {
        let d = delta(100.0, 3);
        assert_eq!(d[[0, 0]], 1.0);
        assert!((d[[1, 1]] - 100.0_f64.powf(0.25)).abs() < 1e-12);
        assert!((d[[2, 2]] - 10.0).abs() < 1e-12);
        assert_eq!(d[[0, 1]], 0.0);

        let s = scaling(1e6, 3);
        assert_eq!(s[0], 1.0);
        assert!((s[1] - 1e3).abs() < 1e-9);
        assert!((s[2] - 1e6).abs() < 1e-6);

        // single dimension: no conditioning
        assert_eq!(scaling(1e6, 1)[0], 1.0);
    }

    #[test]
    fn test_penalty() {
        assert_eq!(penalty(&array![5.0, -5.0, 0.0]), 0.0);
        assert!((penalty(&array![6.0, -7.0]) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_random_rotation_is_proper() {
        let mut rng = StdRng::seed_from_u64(7);
        for d in 1..8 {
            let r = random_rotation(d, &mut rng);
            assert!(check_rotation_matrix(&r.view()).is_ok(), "d={} -> {:?}", d, r);
        }
    }
}
