//! Convergence rate: best objective value per evaluation, averaged over runs
//!
//! All runs of one evaluation share the same problem instance, so the curves
//! are comparable sample by sample. A run that stops early (acceptable value
//! reached) keeps its last best value until the end of the budget.

use ndarray::Array1;
use onopt_monitor::Statistic;
use onopt_problem::BenchmarkFunction;
use rand::Rng;
use serde::Serialize;

use crate::error::{BenchError, Result};
use crate::trial::{AlgorithmSetup, BenchmarkSettings, benchmark_instance, run_trial};

/// Mean and standard deviation of the best objective value after each evaluation
#[derive(Debug, Clone, Serialize)]
pub struct ConvergenceCurve {
    pub algorithm: String,
    pub function: String,
    pub runs: usize,
    /// Runs that reached the acceptable objective value
    pub successes: usize,
    pub mean: Vec<f64>,
    pub standard_deviation: Vec<f64>,
}

/// Extends `values` to `length` entries by repeating its last value.
///
/// Longer inputs are truncated. An empty input stays empty.
pub fn pad_to_budget(values: &[f64], length: usize) -> Vec<f64> {
    let Some(&last) = values.last() else {
        return Vec::new();
    };
    let mut padded: Vec<f64> = values.iter().copied().take(length).collect();
    padded.resize(length, last);
    padded
}

/// Runs `setup` `settings.runs` times on one instance of `function`.
pub fn convergence_rate<R: Rng + ?Sized>(
    setup: &AlgorithmSetup,
    function: BenchmarkFunction,
    settings: &BenchmarkSettings,
    rng: &mut R,
) -> Result<ConvergenceCurve> {
    settings.validate()?;
    let mut problem = benchmark_instance(function, settings, rng)?;

    let mut statistic = Statistic::new();
    let mut successes = 0;
    let mut algorithm = setup.kind.to_string();

    for run in 0..settings.runs {
        let trial = run_trial(setup, &mut problem, rng.random())?;
        algorithm = trial.report.algorithm.clone();
        if trial.report.success {
            successes += 1;
        }

        let curve = pad_to_budget(&trial.best_objective_values, settings.budget);
        if curve.is_empty() {
            return Err(BenchError::InvalidConfiguration(format!(
                "run {} of {} on {} recorded no evaluation",
                run, algorithm, function
            )));
        }
        statistic.update(&Array1::from_vec(curve))?;

        log::debug!(
            "{} on {} run {}/{}: f = {:e} after {} evaluations",
            algorithm,
            function,
            run + 1,
            settings.runs,
            trial.report.fun,
            trial.report.nfev
        );
    }

    log::info!("{} on {}: {}/{} successful runs", algorithm, function, successes, settings.runs);

    Ok(ConvergenceCurve {
        algorithm,
        function: function.to_string(),
        runs: settings.runs,
        successes,
        mean: statistic.get_mean().to_vec(),
        standard_deviation: statistic.get_standard_deviation().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use onopt_algorithm::AlgorithmKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_pad_to_budget() {
        assert_eq!(pad_to_budget(&[3.0, 2.0], 4), vec![3.0, 2.0, 2.0, 2.0]);
        assert_eq!(pad_to_budget(&[3.0, 2.0, 1.0], 2), vec![3.0, 2.0]);
        assert!(pad_to_budget(&[], 3).is_empty());
    }

    #[test]
    fn test_curve_spans_the_budget() {
        let settings = BenchmarkSettings { budget: 40, runs: 3, ..Default::default() };
        let mut rng = StdRng::seed_from_u64(12);
        let curve = convergence_rate(
            &AlgorithmSetup::new(AlgorithmKind::HillClimbing),
            BenchmarkFunction::Sphere,
            &settings,
            &mut rng,
        )
        .unwrap();

        assert_eq!(curve.algorithm, "hill-climbing");
        assert_eq!(curve.function, "sphere");
        assert_eq!(curve.mean.len(), 40);
        assert_eq!(curve.standard_deviation.len(), 40);
        // best values only decrease within each run
        assert!(curve.mean.windows(2).all(|w| w[1] <= w[0] + 1e-9));
        assert!(curve.standard_deviation.iter().all(|&s| s >= 0.0));
    }
}
