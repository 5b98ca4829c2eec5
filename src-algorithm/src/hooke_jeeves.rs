//! Hooke-Jeeves pattern search

use ndarray::Array1;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::engine::{OptimisationAlgorithm, RunContext};
use crate::error::Result;
use crate::parameterisation::{Parameterisation, real_where, unknown_parameter};
use crate::sampling::{check_bounded, uniform_in_bounds};

/// Pattern search around a base point.
///
/// Every iteration probes `base ± step_size[i] * e_i` for each dimension
/// (`+` before `-`). The best improving, constraint-satisfying probe becomes
/// the new base point; if there is none, all step sizes are multiplied by
/// `step_size_decrease`.
#[derive(Debug, Clone)]
pub struct HookeAlgorithm {
    initial_step_size: Option<f64>,
    step_size_decrease: f64,
    base_point: Array1<f64>,
    base_objective_value: f64,
    step_sizes: Array1<f64>,
    rng: StdRng,
}

impl HookeAlgorithm {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_rng(&mut rand::rng()))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            initial_step_size: None,
            step_size_decrease: 0.5,
            base_point: Array1::zeros(0),
            base_objective_value: f64::INFINITY,
            step_sizes: Array1::zeros(0),
            rng,
        }
    }

    /// Step size per dimension for the next round
    pub fn step_sizes(&self) -> &Array1<f64> {
        &self.step_sizes
    }

    pub fn base_point(&self) -> &Array1<f64> {
        &self.base_point
    }

    pub fn step_size_decrease(&self) -> f64 {
        self.step_size_decrease
    }
}

impl Default for HookeAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl OptimisationAlgorithm for HookeAlgorithm {
    fn name(&self) -> &str {
        "hooke"
    }

    fn set_parameterisation(&mut self, parameterisation: &Parameterisation) -> Result<()> {
        let mut initial_step_size = self.initial_step_size;
        let mut step_size_decrease = self.step_size_decrease;

        for (key, &value) in parameterisation {
            match key.to_lowercase().as_str() {
                "initialstepsize" => {
                    initial_step_size = Some(real_where(key, value, |v| v > 0.0, "a positive step size")?)
                }
                "stepsizedecrease" => {
                    step_size_decrease = real_where(key, value, |v| v > 0.0 && v < 1.0, "a value within (0, 1)")?
                }
                _ => return Err(unknown_parameter(self.name(), key)),
            }
        }

        self.initial_step_size = initial_step_size;
        self.step_size_decrease = step_size_decrease;
        Ok(())
    }

    fn initialise(&mut self, run: &mut RunContext<'_>) -> Result<()> {
        let lower = run.problem().lower_bounds().clone();
        let upper = run.problem().upper_bounds().clone();
        check_bounded(&lower, &upper)?;

        self.step_sizes = match self.initial_step_size {
            Some(step_size) => Array1::from_elem(lower.len(), step_size),
            None => &upper - &lower,
        };
        self.base_point = uniform_in_bounds(&lower, &upper, &mut self.rng);
        self.base_objective_value = run.evaluate(&self.base_point)?.objective_value;
        Ok(())
    }

    fn next_parameters(&mut self, _run: &RunContext<'_>) -> Result<Vec<Array1<f64>>> {
        let mut parameters = Vec::with_capacity(2 * self.base_point.len());
        for i in 0..self.base_point.len() {
            let mut forward = self.base_point.clone();
            forward[i] += self.step_sizes[i];
            parameters.push(forward);

            let mut backward = self.base_point.clone();
            backward[i] -= self.step_sizes[i];
            parameters.push(backward);
        }
        Ok(parameters)
    }

    fn update(&mut self, parameters: &[Array1<f64>], objective_values: &[f64], is_satisfying_constraints: &[bool]) {
        let mut best: Option<usize> = None;
        let mut best_objective_value = self.base_objective_value;
        for (n, (&objective_value, &feasible)) in
            objective_values.iter().zip(is_satisfying_constraints).enumerate()
        {
            if feasible && objective_value < best_objective_value {
                best = Some(n);
                best_objective_value = objective_value;
            }
        }

        match best {
            Some(n) => {
                self.base_point = parameters[n].clone();
                self.base_objective_value = best_objective_value;
            }
            None => {
                self.step_sizes *= self.step_size_decrease;
                log::debug!("no improving probe, step sizes decreased to {:?}", self.step_sizes.to_vec());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OptimisationError;
    use crate::parameterisation::ParameterValue;
    use ndarray::array;

    #[test]
    fn test_probe_order() {
        let mut hooke = HookeAlgorithm::with_seed(3);
        hooke.base_point = array![1.0, 2.0];
        hooke.step_sizes = array![0.5, 0.25];

        let mut problem = onopt_problem::OptimisationProblem::from_fn(2, "flat", |_| 0.0).unwrap();
        let mut monitor = onopt_monitor::Monitor::new();
        let run = RunContext::new(&mut problem, &mut monitor);

        let parameters = hooke.next_parameters(&run).unwrap();
        assert_eq!(
            parameters,
            vec![array![1.5, 2.0], array![0.5, 2.0], array![1.0, 2.25], array![1.0, 1.75]]
        );
    }

    #[test]
    fn test_update_adopts_best_probe() {
        let mut hooke = HookeAlgorithm::with_seed(3);
        hooke.base_point = array![0.0];
        hooke.base_objective_value = 4.0;
        hooke.step_sizes = array![1.0];

        // infeasible probes are ignored even if better
        hooke.update(&[array![1.0], array![-1.0]], &[1.0, 0.5], &[true, false]);
        assert_eq!(hooke.base_point(), &array![1.0]);
        assert_eq!(hooke.step_sizes(), &array![1.0]);

        hooke.update(&[array![2.0], array![0.0]], &[4.0, 1.0], &[true, true]);
        assert_eq!(hooke.base_point(), &array![1.0]);
        assert_eq!(hooke.step_sizes(), &array![0.5]);
    }

    #[test]
    fn test_step_size_decrease_range() {
        let mut hooke = HookeAlgorithm::with_seed(3);
        let mut parameterisation = Parameterisation::new();
        parameterisation.insert("stepSizeDecrease".to_string(), ParameterValue::Real(1.0));
        assert!(matches!(
            hooke.set_parameterisation(&parameterisation),
            Err(OptimisationError::InvalidParameterValue { .. })
        ));
        assert_eq!(hooke.step_size_decrease(), 0.5);
    }
}
