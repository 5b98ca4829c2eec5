//! Performance profiles (Dolan & Moré)
//!
//! The performance of an algorithm on a problem is the number of evaluations
//! it needed to reach the acceptable objective value, or unsolved. The
//! performance ratio divides it by the best performance any algorithm
//! achieved on that problem; unsolved runs have an infinite ratio. The
//! profile of an algorithm is `rho(tau)`, the share of problems whose ratio
//! is at most `tau`.

use onopt_problem::BenchmarkFunction;
use rand::Rng;
use serde::Serialize;

use crate::error::{BenchError, Result};
use crate::trial::{AlgorithmSetup, BenchmarkSettings, benchmark_instance, run_trial};

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceProfile {
    pub algorithms: Vec<String>,
    pub problems: Vec<String>,
    /// `performances[problem][algorithm]`, `None` when unsolved
    pub performances: Vec<Vec<Option<usize>>>,
    /// `ratios[problem][algorithm]`
    pub ratios: Vec<Vec<f64>>,
    pub taus: Vec<f64>,
    /// `profiles[algorithm][tau]`
    pub profiles: Vec<Vec<f64>>,
}

/// Performance ratios per problem (rows) and algorithm (columns).
///
/// A problem nobody solved has an infinite ratio for every algorithm.
pub fn performance_ratios(performances: &[Vec<Option<usize>>]) -> Vec<Vec<f64>> {
    performances
        .iter()
        .map(|row| {
            let best = row.iter().flatten().min().copied();
            row.iter()
                .map(|performance| match (performance, best) {
                    (Some(p), Some(b)) => *p as f64 / b.max(1) as f64,
                    _ => f64::INFINITY,
                })
                .collect()
        })
        .collect()
}

/// Share of `ratios` that are at most `tau`
pub fn profile_value(ratios: &[f64], tau: f64) -> f64 {
    if ratios.is_empty() {
        return 0.0;
    }
    ratios.iter().filter(|&&r| r <= tau).count() as f64 / ratios.len() as f64
}

/// `steps` values of `tau` evenly spaced over `[1, max_tau]`
pub fn tau_grid(max_tau: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => (0..steps)
            .map(|i| 1.0 + (max_tau - 1.0) * i as f64 / (steps - 1) as f64)
            .collect(),
    }
}

/// Runs every setup on `settings.runs` instances of every function and builds the profiles.
pub fn performance_profile<R: Rng + ?Sized>(
    setups: &[AlgorithmSetup],
    functions: &[BenchmarkFunction],
    settings: &BenchmarkSettings,
    taus: &[f64],
    rng: &mut R,
) -> Result<PerformanceProfile> {
    settings.validate()?;
    if setups.is_empty() || functions.is_empty() {
        return Err(BenchError::InvalidConfiguration(
            "a performance profile needs at least one algorithm and one function".to_string(),
        ));
    }

    let mut algorithms: Vec<String> = setups.iter().map(|setup| setup.kind.to_string()).collect();
    let mut problems = Vec::with_capacity(functions.len() * settings.runs);
    let mut performances = Vec::with_capacity(functions.len() * settings.runs);

    for &function in functions {
        for instance in 0..settings.runs {
            let mut problem = benchmark_instance(function, settings, rng)?;
            let mut row = Vec::with_capacity(setups.len());

            for (n, setup) in setups.iter().enumerate() {
                let trial = run_trial(setup, &mut problem, rng.random())?;
                algorithms[n] = trial.report.algorithm.clone();
                row.push(trial.report.success.then_some(trial.report.nfev));
            }

            log::debug!("{} instance {}: {:?}", function, instance, row);
            problems.push(format!("{}#{}", function, instance));
            performances.push(row);
        }
    }

    let ratios = performance_ratios(&performances);
    let profiles = (0..setups.len())
        .map(|a| {
            let column: Vec<f64> = ratios.iter().map(|row| row[a]).collect();
            taus.iter().map(|&tau| profile_value(&column, tau)).collect()
        })
        .collect();

    Ok(PerformanceProfile {
        algorithms,
        problems,
        performances,
        ratios,
        taus: taus.to_vec(),
        profiles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use onopt_algorithm::AlgorithmKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_ratios() {
        let performances = vec![
            vec![Some(10), Some(20), None],
            vec![None, None, None],
            vec![Some(30), Some(15), Some(45)],
        ];
        let ratios = performance_ratios(&performances);
        assert_eq!(ratios[0], vec![1.0, 2.0, f64::INFINITY]);
        assert!(ratios[1].iter().all(|r| r.is_infinite()));
        assert_eq!(ratios[2], vec![2.0, 1.0, 3.0]);
    }

    #[test]
    fn test_profile_value() {
        let ratios = [1.0, 2.0, f64::INFINITY, 1.5];
        assert_eq!(profile_value(&ratios, 1.0), 0.25);
        assert_eq!(profile_value(&ratios, 2.0), 0.75);
        assert_eq!(profile_value(&ratios, 1e300), 0.75);
        assert_eq!(profile_value(&[], 2.0), 0.0);
    }

    #[test]
    fn test_tau_grid() {
        assert_eq!(tau_grid(3.0, 5), vec![1.0, 1.5, 2.0, 2.5, 3.0]);
        assert_eq!(tau_grid(3.0, 1), vec![1.0]);
        assert!(tau_grid(3.0, 0).is_empty());
    }

    #[test]
    fn test_profile_shape() {
        let settings = BenchmarkSettings { budget: 200, runs: 2, precision: 1.0, ..Default::default() };
        let setups = [
            AlgorithmSetup::new(AlgorithmKind::RandomSearch),
            AlgorithmSetup::new(AlgorithmKind::Hooke),
        ];
        let functions = [BenchmarkFunction::Sphere, BenchmarkFunction::Ellipsoidal];
        let taus = tau_grid(4.0, 7);
        let mut rng = StdRng::seed_from_u64(21);

        let profile = performance_profile(&setups, &functions, &settings, &taus, &mut rng).unwrap();
        assert_eq!(profile.algorithms, vec!["random-search", "hooke"]);
        assert_eq!(profile.problems.len(), 4);
        assert_eq!(profile.problems[0], "sphere#0");
        assert_eq!(profile.profiles.len(), 2);
        for values in &profile.profiles {
            assert_eq!(values.len(), 7);
            assert!(values.windows(2).all(|w| w[0] <= w[1]));
            assert!(values.iter().all(|&v| (0.0..=1.0).contains(&v)));
        }
        // whoever solved a problem first has ratio 1
        for (row, performance) in profile.ratios.iter().zip(&profile.performances) {
            if performance.iter().any(Option::is_some) {
                assert!(row.iter().any(|&r| r == 1.0));
            }
        }
    }

    #[test]
    fn test_empty_profile_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = performance_profile(
            &[],
            &[BenchmarkFunction::Sphere],
            &BenchmarkSettings::default(),
            &[1.0],
            &mut rng,
        );
        assert!(matches!(result, Err(BenchError::InvalidConfiguration(_))));
    }
}
