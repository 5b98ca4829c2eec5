//! Benchmark settings and single optimisation runs shared by the evaluations

use onopt_algorithm::{AlgorithmKind, OptimisationReport, Parameterisation, optimise};
use onopt_monitor::{Monitor, MonitorTag};
use onopt_problem::{BenchmarkFunction, OptimisationProblem, benchmark_problem};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::error::{BenchError, Result};

/// Common settings of every evaluation
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkSettings {
    pub number_of_dimensions: usize,
    /// Maximal number of evaluations per run
    pub budget: usize,
    /// Runs per algorithm (convergence) or instances per function (profile)
    pub runs: usize,
    /// A run is finished once it is within `precision` of the optimal objective value
    pub precision: f64,
    pub seed: Option<u64>,
}

impl Default for BenchmarkSettings {
    fn default() -> Self {
        Self {
            number_of_dimensions: 2,
            budget: 1000,
            runs: 10,
            precision: 1e-8,
            seed: None,
        }
    }
}

impl BenchmarkSettings {
    pub fn validate(&self) -> Result<()> {
        if self.runs == 0 {
            return Err(BenchError::InvalidConfiguration("at least one run is required".to_string()));
        }
        if !(self.precision >= 0.0 && self.precision.is_finite()) {
            return Err(BenchError::InvalidConfiguration(format!(
                "precision must be a non-negative number, got {}",
                self.precision
            )));
        }
        Ok(())
    }

    /// Generator for problem instances and strategy seeds
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }
}

/// A strategy together with its hyperparameters
#[derive(Debug, Clone)]
pub struct AlgorithmSetup {
    pub kind: AlgorithmKind,
    pub parameterisation: Parameterisation,
}

impl AlgorithmSetup {
    pub fn new(kind: AlgorithmKind) -> Self {
        Self { kind, parameterisation: Parameterisation::new() }
    }
}

/// Outcome of one run
#[derive(Debug, Clone)]
pub struct Trial {
    pub report: OptimisationReport,
    /// Best objective value after each evaluation
    pub best_objective_values: Vec<f64>,
}

/// New instance of `function` with the budget and the acceptable objective value applied
pub fn benchmark_instance<R: Rng + ?Sized>(
    function: BenchmarkFunction,
    settings: &BenchmarkSettings,
    rng: &mut R,
) -> Result<OptimisationProblem> {
    let mut problem = benchmark_problem(function, settings.number_of_dimensions, rng)?;
    problem.set_maximal_number_of_evaluations(settings.budget)?;
    // every family has its optimal value at the objective value shift
    let acceptable_objective_value = problem.objective_value_shift() + settings.precision;
    problem.set_acceptable_objective_value(acceptable_objective_value);
    Ok(problem)
}

/// Optimises `problem` once with a freshly built strategy
pub fn run_trial(setup: &AlgorithmSetup, problem: &mut OptimisationProblem, seed: u64) -> Result<Trial> {
    let mut algorithm = setup.kind.build(Some(seed));
    algorithm.set_parameterisation(&setup.parameterisation)?;

    let mut monitor = Monitor::new();
    monitor.observe([MonitorTag::CurrentBestObjectiveValue]);

    let report = optimise(algorithm.as_mut(), problem, &mut monitor)?;
    let best_objective_values = monitor.get_f64(&MonitorTag::CurrentBestObjectiveValue);

    Ok(Trial { report, best_objective_values })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_is_configured() {
        let settings = BenchmarkSettings { budget: 123, precision: 1e-3, ..Default::default() };
        let mut rng = StdRng::seed_from_u64(0);
        let problem = benchmark_instance(BenchmarkFunction::Sphere, &settings, &mut rng).unwrap();
        assert_eq!(problem.maximal_number_of_evaluations(), 123);
        assert_eq!(problem.number_of_dimensions(), 2);
        assert!(
            (problem.acceptable_objective_value() - problem.objective_value_shift() - 1e-3).abs() < 1e-9
        );
    }

    #[test]
    fn test_trial_records_every_evaluation() {
        let settings = BenchmarkSettings { budget: 50, ..Default::default() };
        let mut rng = StdRng::seed_from_u64(4);
        let mut problem = benchmark_instance(BenchmarkFunction::Rastrigin, &settings, &mut rng).unwrap();

        let trial = run_trial(&AlgorithmSetup::new(AlgorithmKind::RandomSearch), &mut problem, 1).unwrap();
        assert_eq!(trial.report.nfev, trial.best_objective_values.len());
        assert_eq!(trial.best_objective_values.last().copied(), Some(trial.report.fun));
    }

    #[test]
    fn test_invalid_settings() {
        assert!(BenchmarkSettings { runs: 0, ..Default::default() }.validate().is_err());
        assert!(BenchmarkSettings { precision: f64::NAN, ..Default::default() }.validate().is_err());
        assert!(BenchmarkSettings::default().validate().is_ok());
    }
}
