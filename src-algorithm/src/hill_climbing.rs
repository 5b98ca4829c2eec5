use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::{OptimisationAlgorithm, RunContext};
use crate::error::{OptimisationError, Result};
use crate::parameterisation::{Parameterisation, real_where, unknown_parameter};
use crate::sampling::{check_bounded, random_unit_vector, uniform_in_bounds};

/// Stochastic hill climbing around a single working point.
///
/// Each iteration proposes `point + r * u` with `u` a random unit direction
/// and `r` uniform in `[minimal_step_size, maximal_step_size)`. The move is
/// kept if it satisfies the constraints and improves the working point.
#[derive(Debug, Clone)]
pub struct HillClimbing {
    minimal_step_size: f64,
    maximal_step_size: f64,
    point: Array1<f64>,
    objective_value: f64,
    rng: StdRng,
}

impl HillClimbing {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_rng(&mut rand::rng()))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            minimal_step_size: 0.0,
            maximal_step_size: 1.0,
            point: Array1::zeros(0),
            objective_value: f64::INFINITY,
            rng,
        }
    }

    pub fn minimal_step_size(&self) -> f64 {
        self.minimal_step_size
    }

    pub fn maximal_step_size(&self) -> f64 {
        self.maximal_step_size
    }

    /// Current working point
    pub fn point(&self) -> &Array1<f64> {
        &self.point
    }
}

impl Default for HillClimbing {
    fn default() -> Self {
        Self::new()
    }
}

impl OptimisationAlgorithm for HillClimbing {
    fn name(&self) -> &str {
        "hill-climbing"
    }

    fn set_parameterisation(&mut self, parameterisation: &Parameterisation) -> Result<()> {
        let mut minimal = self.minimal_step_size;
        let mut maximal = self.maximal_step_size;

        for (key, &value) in parameterisation {
            match key.to_lowercase().as_str() {
                "minimalstepsize" => {
                    minimal = real_where(key, value, |v| v >= 0.0, "a non-negative step size")?
                }
                "maximalstepsize" => {
                    maximal = real_where(key, value, |v| v >= 0.0, "a non-negative step size")?
                }
                _ => return Err(unknown_parameter(self.name(), key)),
            }
        }

        if maximal < minimal {
            return Err(OptimisationError::InvalidParameterValue {
                parameter: "maximalStepSize".to_string(),
                reason: format!(
                    "the maximal step size ({}) must be greater than or equal to the minimal one ({})",
                    maximal, minimal
                ),
            });
        }

        self.minimal_step_size = minimal;
        self.maximal_step_size = maximal;
        Ok(())
    }

    fn initialise(&mut self, run: &mut RunContext<'_>) -> Result<()> {
        let (lower, upper) = (run.problem().lower_bounds().clone(), run.problem().upper_bounds().clone());
        check_bounded(&lower, &upper)?;

        self.point = uniform_in_bounds(&lower, &upper, &mut self.rng);
        let evaluation = run.evaluate(&self.point)?;
        self.objective_value = evaluation.objective_value;
        Ok(())
    }

    fn next_parameters(&mut self, _run: &RunContext<'_>) -> Result<Vec<Array1<f64>>> {
        let direction = random_unit_vector(self.point.len(), &mut self.rng);
        let step_size = if self.maximal_step_size > self.minimal_step_size {
            self.rng.random_range(self.minimal_step_size..self.maximal_step_size)
        } else {
            self.minimal_step_size
        };

        Ok(vec![&self.point + &(direction * step_size)])
    }

    fn update(&mut self, parameters: &[Array1<f64>], objective_values: &[f64], is_satisfying_constraints: &[bool]) {
        for ((parameter, &objective_value), &feasible) in
            parameters.iter().zip(objective_values).zip(is_satisfying_constraints)
        {
            if feasible && objective_value < self.objective_value {
                self.point = parameter.clone();
                self.objective_value = objective_value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameterisation::ParameterValue;

    #[test]
    fn test_parameterisation() {
        let mut algorithm = HillClimbing::with_seed(1);
        let mut parameterisation = Parameterisation::new();
        parameterisation.insert("MinimalStepSize".to_string(), ParameterValue::Real(0.1));
        parameterisation.insert("maximalstepsize".to_string(), ParameterValue::Integer(2));
        algorithm.set_parameterisation(&parameterisation).unwrap();
        assert_eq!(algorithm.minimal_step_size(), 0.1);
        assert_eq!(algorithm.maximal_step_size(), 2.0);

        parameterisation.clear();
        parameterisation.insert("maximalStepSize".to_string(), ParameterValue::Real(0.05));
        let err = algorithm.set_parameterisation(&parameterisation).unwrap_err();
        assert!(matches!(err, OptimisationError::InvalidParameterValue { .. }));
        // rejected parameterisations leave the previous values
        assert_eq!(algorithm.maximal_step_size(), 2.0);
    }
}
