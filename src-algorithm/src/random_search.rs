use ndarray::Array1;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::engine::{OptimisationAlgorithm, RunContext};
use crate::error::Result;
use crate::parameterisation::{Parameterisation, unknown_parameter};
use crate::sampling::{check_bounded, uniform_in_bounds};

/// Pure random search: one uniformly sampled point per iteration
#[derive(Debug, Clone)]
pub struct RandomSearch {
    rng: StdRng,
}

impl RandomSearch {
    pub fn new() -> Self {
        Self { rng: StdRng::from_rng(&mut rand::rng()) }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for RandomSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl OptimisationAlgorithm for RandomSearch {
    fn name(&self) -> &str {
        "random-search"
    }

    fn set_parameterisation(&mut self, parameterisation: &Parameterisation) -> Result<()> {
        // no hyperparameters
        match parameterisation.keys().next() {
            Some(key) => Err(unknown_parameter(self.name(), key)),
            None => Ok(()),
        }
    }

    fn initialise(&mut self, run: &mut RunContext<'_>) -> Result<()> {
        check_bounded(run.problem().lower_bounds(), run.problem().upper_bounds())
    }

    fn next_parameters(&mut self, run: &RunContext<'_>) -> Result<Vec<Array1<f64>>> {
        let problem = run.problem();
        Ok(vec![uniform_in_bounds(problem.lower_bounds(), problem.upper_bounds(), &mut self.rng)])
    }
}
