//! Unimodal benchmark families
//!
//! These functions have a single basin of attraction and stress the
//! conditioning handling of an optimiser rather than its global search.

use ndarray::{Array1, Array2};
use rand::Rng;

use crate::error::ProblemError;
use crate::linalg::ensure_rotation;
use crate::problem::ObjectiveFunction;
use crate::transform::{asymmetric, oscillate, oscillate_value, random_rotation, scaling, penalty};

/// Sphere function
/// Global minimum: f(z) = 0 at z = 0
pub fn sphere(z: &Array1<f64>) -> f64 {
    z.dot(z)
}

#[derive(Debug, Clone, Default)]
pub struct Sphere;

impl ObjectiveFunction for Sphere {
    fn name(&self) -> &str {
        "sphere"
    }

    fn objective_value(&self, parameter: &Array1<f64>) -> f64 {
        sphere(parameter)
    }
}

/// Separable ellipsoid with condition number 1e6 on an oscillated landscape
#[derive(Debug, Clone)]
pub struct Ellipsoidal {
    scaling: Array1<f64>,
}

impl Ellipsoidal {
    pub fn new(number_of_dimensions: usize) -> Self {
        Self { scaling: scaling(1e6, number_of_dimensions) }
    }
}

impl ObjectiveFunction for Ellipsoidal {
    fn name(&self) -> &str {
        "ellipsoidal"
    }

    fn objective_value(&self, parameter: &Array1<f64>) -> f64 {
        self.scaling.dot(&oscillate(parameter).mapv(|v| v * v))
    }
}

/// Discus: one direction is 1e6 times more sensitive than the others
#[derive(Debug, Clone, Default)]
pub struct Discus;

impl ObjectiveFunction for Discus {
    fn name(&self) -> &str {
        "discus"
    }

    fn objective_value(&self, parameter: &Array1<f64>) -> f64 {
        let y = oscillate(parameter);
        1e6 * y[0] * y[0] + y.iter().skip(1).map(|v| v * v).sum::<f64>()
    }
}

/// Bent cigar: a narrow ridge along one rotated direction
#[derive(Debug, Clone)]
pub struct BentCigar {
    rotation_q: Array2<f64>,
}

impl BentCigar {
    pub fn new<R: Rng + ?Sized>(number_of_dimensions: usize, rng: &mut R) -> Self {
        Self { rotation_q: random_rotation(number_of_dimensions, rng) }
    }

    pub fn set_rotation_q(&mut self, rotation_q: Array2<f64>) -> Result<(), ProblemError> {
        ensure_rotation(self.rotation_q.nrows(), &rotation_q)?;
        self.rotation_q = rotation_q;
        Ok(())
    }
}

impl ObjectiveFunction for BentCigar {
    fn name(&self) -> &str {
        "bent-cigar"
    }

    fn objective_value(&self, parameter: &Array1<f64>) -> f64 {
        let y = self
            .rotation_q
            .dot(&asymmetric(0.5, &self.rotation_q.dot(parameter)))
            .mapv(|v| v * v);
        y[0] + 1e6 * y.iter().skip(1).sum::<f64>()
    }
}

/// Attractive sector: the half-spaces pointing towards the optimum are 100 times steeper
#[derive(Debug, Clone)]
pub struct AttractiveSector {
    scaling: Array1<f64>,
    rotation_q: Array2<f64>,
    sector: Array1<f64>,
}

impl AttractiveSector {
    /// `sector` is the optimum location (the problem's parameter shift).
    ///
    /// It is copied here at construction: a later `set_parameter_shift` on the
    /// problem does not move the sector.
    pub fn new<R: Rng + ?Sized>(sector: Array1<f64>, rng: &mut R) -> Self {
        let d = sector.len();
        Self {
            scaling: scaling(10.0_f64.sqrt(), d),
            rotation_q: random_rotation(d, rng),
            sector,
        }
    }

    pub fn set_rotation_q(&mut self, rotation_q: Array2<f64>) -> Result<(), ProblemError> {
        ensure_rotation(self.rotation_q.nrows(), &rotation_q)?;
        self.rotation_q = rotation_q;
        Ok(())
    }
}

impl ObjectiveFunction for AttractiveSector {
    fn name(&self) -> &str {
        "attractive-sector"
    }

    fn objective_value(&self, parameter: &Array1<f64>) -> f64 {
        let mut y = self.rotation_q.dot(&(&self.scaling * parameter));
        for (yi, &si) in y.iter_mut().zip(self.sector.iter()) {
            if *yi * si > 0.0 {
                *yi *= 100.0;
            }
        }
        oscillate_value(y.dot(&y)).powf(0.9)
    }
}

/// Step ellipsoidal: plateaus of a rotated, conditioned ellipsoid
#[derive(Debug, Clone)]
pub struct StepEllipsoidal {
    first_scaling: Array1<f64>,
    second_scaling: Array1<f64>,
    rotation_q: Array2<f64>,
}

impl StepEllipsoidal {
    pub fn new<R: Rng + ?Sized>(number_of_dimensions: usize, rng: &mut R) -> Self {
        Self {
            first_scaling: scaling(10.0_f64.sqrt(), number_of_dimensions),
            second_scaling: scaling(100.0, number_of_dimensions),
            rotation_q: random_rotation(number_of_dimensions, rng),
        }
    }

    pub fn set_rotation_q(&mut self, rotation_q: Array2<f64>) -> Result<(), ProblemError> {
        ensure_rotation(self.rotation_q.nrows(), &rotation_q)?;
        self.rotation_q = rotation_q;
        Ok(())
    }
}

impl ObjectiveFunction for StepEllipsoidal {
    fn name(&self) -> &str {
        "step-ellipsoidal"
    }

    fn objective_value(&self, parameter: &Array1<f64>) -> f64 {
        let s = &self.first_scaling * parameter;
        let rounded = s.mapv(|v| if v.abs() > 0.5 { v.round() } else { (10.0 * v).round() / 10.0 });
        let y = self.rotation_q.dot(&rounded);

        0.1 * (s[0].abs() / 1e4).max(self.second_scaling.dot(&y.mapv(|v| v * v)))
    }

    fn soft_constraint_value(&self, parameter: &Array1<f64>) -> f64 {
        penalty(parameter)
    }
}

/// Linear slope: a hyperplane whose optimum lies on the boundary at `x_opt = ±5`
#[derive(Debug, Clone)]
pub struct LinearSlope {
    x_opt: Array1<f64>,
    slope: Array1<f64>,
}

impl LinearSlope {
    pub fn new<R: Rng + ?Sized>(number_of_dimensions: usize, rng: &mut R) -> Self {
        let x_opt = Array1::from_shape_fn(number_of_dimensions, |_| {
            if rng.random::<bool>() { 5.0 } else { -5.0 }
        });
        Self::with_optimum(x_opt)
    }

    pub fn with_optimum(x_opt: Array1<f64>) -> Self {
        let slope = &x_opt.mapv(f64::signum) * &scaling(10.0, x_opt.len());
        Self { x_opt, slope }
    }

    pub fn optimum(&self) -> &Array1<f64> {
        &self.x_opt
    }
}

impl ObjectiveFunction for LinearSlope {
    fn name(&self) -> &str {
        "linear-slope"
    }

    fn objective_value(&self, parameter: &Array1<f64>) -> f64 {
        parameter
            .iter()
            .zip(self.x_opt.iter())
            .zip(self.slope.iter())
            .map(|((&zi, &xi), &si)| {
                let yi = if zi * xi < 25.0 { zi } else { xi };
                5.0 * si.abs() - si * yi
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_sphere() {
        assert_eq!(sphere(&array![0.0, 0.0]), 0.0);
        assert_eq!(sphere(&array![1.0, -2.0]), 5.0);
    }

    #[test]
    fn test_ellipsoidal_conditioning() {
        let f = Ellipsoidal::new(2);
        assert_eq!(f.objective_value(&array![0.0, 0.0]), 0.0);
        // oscillate(±1) = ±1, so only the scaling remains
        assert!((f.objective_value(&array![1.0, 0.0]) - 1.0).abs() < 1e-12);
        assert!((f.objective_value(&array![0.0, 1.0]) - 1e6).abs() < 1e-6);
    }

    #[test]
    fn test_discus() {
        let f = Discus;
        assert!((f.objective_value(&array![1.0, 1.0, -1.0]) - (1e6 + 2.0)).abs() < 1e-6);
        assert_eq!(f.objective_value(&array![0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_bent_cigar_identity_rotation() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut f = BentCigar::new(2, &mut rng);
        f.set_rotation_q(Array2::eye(2)).unwrap();
        // asymmetric leaves component 0 alone and negative values untouched
        let value = f.objective_value(&array![2.0, -1.0]);
        assert!((value - (4.0 + 1e6)).abs() < 1e-6, "value = {}", value);
        assert_eq!(f.objective_value(&array![0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_internal_rotation_is_validated() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut f = StepEllipsoidal::new(2, &mut rng);
        assert!(f.set_rotation_q(array![[1.0, 0.0], [0.0, -1.0]]).is_err());
        assert!(f.set_rotation_q(Array2::eye(3)).is_err());
        assert!(f.set_rotation_q(Array2::eye(2)).is_ok());
    }

    #[test]
    fn test_attractive_sector() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut f = AttractiveSector::new(array![1.0, 1.0], &mut rng);
        f.set_rotation_q(Array2::eye(2)).unwrap();
        assert_eq!(f.objective_value(&array![0.0, 0.0]), 0.0);
        // moving towards the sector costs 100^2 times more (before the outer transforms)
        let towards = f.objective_value(&array![0.1, 0.0]);
        let away = f.objective_value(&array![-0.1, 0.0]);
        assert!(towards > away, "{} <= {}", towards, away);
    }

    #[test]
    fn test_attractive_sector_follows_construction_shift() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut f = AttractiveSector::new(array![-2.0, 3.0], &mut rng);
        f.set_rotation_q(Array2::eye(2)).unwrap();
        // steep where the sign matches the sector given to `new`
        assert!(f.objective_value(&array![-0.1, 0.0]) > f.objective_value(&array![0.1, 0.0]));
        assert!(f.objective_value(&array![0.0, 0.1]) > f.objective_value(&array![0.0, -0.1]));
    }

    #[test]
    fn test_step_ellipsoidal_plateau() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut f = StepEllipsoidal::new(2, &mut rng);
        f.set_rotation_q(Array2::eye(2)).unwrap();
        // both points round to the same plateau
        let a = f.objective_value(&array![1.1, 0.0]);
        let b = f.objective_value(&array![1.2, 0.0]);
        assert!((a - b).abs() < 1e-12);
        assert!((a - 0.1).abs() < 1e-12, "a = {}", a);
        assert_eq!(f.soft_constraint_value(&array![6.0, 0.0]), 1.0);
    }

    #[test]
    fn test_linear_slope_optimum() {
        let f = LinearSlope::with_optimum(array![5.0, -5.0]);
        assert!(f.objective_value(&array![5.0, -5.0]).abs() < 1e-12);
        // beyond the optimum the slope is flat
        assert!(f.objective_value(&array![7.0, -9.0]).abs() < 1e-12);
        assert!(f.objective_value(&array![0.0, 0.0]) > 0.0);
    }
}
