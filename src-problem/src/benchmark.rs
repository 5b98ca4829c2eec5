//! Benchmark problem registry
//!
//! [`benchmark_problem`] draws a random instance of a benchmark family:
//! a shift uniform in `[-4, 4]^d`, bounds `[-5, 5]^d`, a random objective
//! value shift and whatever rotations the family needs. Two instances of the
//! same family are distinct but statistically comparable.

use std::fmt;
use std::str::FromStr;

use ndarray::Array1;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::error::ProblemError;
use crate::functions::{
    AttractiveSector, BentCigar, BuecheRastrigin, Discus, Ellipsoidal, LinearSlope, MaxZeros,
    Rastrigin, Sphere, StepEllipsoidal,
};
use crate::problem::{ObjectiveFunction, OptimisationProblem};
use crate::transform::random_rotation;

/// Benchmark landscape family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BenchmarkFunction {
    Sphere,
    Ellipsoidal,
    Rastrigin,
    BuecheRastrigin,
    LinearSlope,
    AttractiveSector,
    StepEllipsoidal,
    BentCigar,
    Discus,
    MaxZeros,
}

impl BenchmarkFunction {
    pub const ALL: [BenchmarkFunction; 10] = [
        BenchmarkFunction::Sphere,
        BenchmarkFunction::Ellipsoidal,
        BenchmarkFunction::Rastrigin,
        BenchmarkFunction::BuecheRastrigin,
        BenchmarkFunction::LinearSlope,
        BenchmarkFunction::AttractiveSector,
        BenchmarkFunction::StepEllipsoidal,
        BenchmarkFunction::BentCigar,
        BenchmarkFunction::Discus,
        BenchmarkFunction::MaxZeros,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BenchmarkFunction::Sphere => "sphere",
            BenchmarkFunction::Ellipsoidal => "ellipsoidal",
            BenchmarkFunction::Rastrigin => "rastrigin",
            BenchmarkFunction::BuecheRastrigin => "bueche-rastrigin",
            BenchmarkFunction::LinearSlope => "linear-slope",
            BenchmarkFunction::AttractiveSector => "attractive-sector",
            BenchmarkFunction::StepEllipsoidal => "step-ellipsoidal",
            BenchmarkFunction::BentCigar => "bent-cigar",
            BenchmarkFunction::Discus => "discus",
            BenchmarkFunction::MaxZeros => "max-zeros",
        }
    }
}

impl fmt::Display for BenchmarkFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BenchmarkFunction {
    type Err = ProblemError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.to_lowercase();
        match t.as_str() {
            "sphere" => Ok(BenchmarkFunction::Sphere),
            "ellipsoidal" | "ellipsoid" => Ok(BenchmarkFunction::Ellipsoidal),
            "rastrigin" => Ok(BenchmarkFunction::Rastrigin),
            "bueche-rastrigin" | "bueche_rastrigin" | "buecherastrigin" | "büche-rastrigin" => {
                Ok(BenchmarkFunction::BuecheRastrigin)
            }
            "linear-slope" | "linear_slope" | "linearslope" => Ok(BenchmarkFunction::LinearSlope),
            "attractive-sector" | "attractive_sector" | "attractivesector" => {
                Ok(BenchmarkFunction::AttractiveSector)
            }
            "step-ellipsoidal" | "step_ellipsoidal" | "stepellipsoidal" => {
                Ok(BenchmarkFunction::StepEllipsoidal)
            }
            "bent-cigar" | "bent_cigar" | "bentcigar" => Ok(BenchmarkFunction::BentCigar),
            "discus" => Ok(BenchmarkFunction::Discus),
            "max-zeros" | "max_zeros" | "maxzeros" => Ok(BenchmarkFunction::MaxZeros),
            _ => Err(ProblemError::UnknownFunction(s.to_string())),
        }
    }
}

/// Random objective value shift: `clamp(round(100 * 100 * n1 / n2) / 100, -1000, 1000)`
fn random_objective_value_shift<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let n1: f64 = rng.sample(StandardNormal);
    let n2: f64 = rng.sample(StandardNormal);
    let shift = (100.0 * 100.0 * n1 / n2).round() / 100.0;
    if shift.is_nan() { 0.0 } else { shift.clamp(-1000.0, 1000.0) }
}

/// Draws a new instance of `kind` in `number_of_dimensions` dimensions
pub fn benchmark_problem<R: Rng + ?Sized>(
    kind: BenchmarkFunction,
    number_of_dimensions: usize,
    rng: &mut R,
) -> Result<OptimisationProblem, ProblemError> {
    if number_of_dimensions == 0 {
        return Err(ProblemError::InvalidConfiguration(
            "The number of dimensions must be greater than 0.".to_string(),
        ));
    }
    let d = number_of_dimensions;

    let mut shift: Array1<f64> = Array1::from_shape_fn(d, |_| rng.random_range(-4.0..=4.0));
    let mut rotation = None;

    let objective: Box<dyn ObjectiveFunction> = match kind {
        BenchmarkFunction::Sphere => Box::new(Sphere),
        BenchmarkFunction::Ellipsoidal => Box::new(Ellipsoidal::new(d)),
        BenchmarkFunction::Rastrigin => Box::new(Rastrigin::new(d)),
        BenchmarkFunction::BuecheRastrigin => {
            for n in (0..d).step_by(2) {
                shift[n] = shift[n].abs();
            }
            Box::new(BuecheRastrigin::new(d))
        }
        BenchmarkFunction::LinearSlope => {
            shift.fill(0.0);
            Box::new(LinearSlope::new(d, rng))
        }
        BenchmarkFunction::AttractiveSector => {
            rotation = Some(random_rotation(d, rng));
            Box::new(AttractiveSector::new(shift.clone(), rng))
        }
        BenchmarkFunction::StepEllipsoidal => {
            rotation = Some(random_rotation(d, rng));
            Box::new(StepEllipsoidal::new(d, rng))
        }
        BenchmarkFunction::BentCigar => Box::new(BentCigar::new(d, rng)),
        BenchmarkFunction::Discus => {
            rotation = Some(random_rotation(d, rng));
            Box::new(Discus)
        }
        BenchmarkFunction::MaxZeros => Box::new(MaxZeros),
    };

    let mut problem = OptimisationProblem::new(d, objective)?;
    problem.set_parameter_shift(shift)?;
    problem.set_lower_bounds(Array1::from_elem(d, -5.0))?;
    problem.set_upper_bounds(Array1::from_elem(d, 5.0))?;
    problem.set_objective_value_shift(random_objective_value_shift(rng));
    if let Some(rotation) = rotation {
        problem.set_rotation_matrix(rotation)?;
    }

    log::debug!(
        "new {} instance (d = {}, objective value shift = {})",
        kind,
        d,
        problem.objective_value_shift()
    );

    Ok(problem)
}
