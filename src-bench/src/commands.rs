//! Subcommand drivers: run the evaluations and write their CSV and JSON outputs

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::BenchArgs;
use crate::convergence::{ConvergenceCurve, convergence_rate};
use crate::error::Result;
use crate::export::{write_json, write_series_csv};
use crate::profile::{PerformanceProfile, performance_profile, tau_grid};
use crate::trial::BenchmarkSettings;

#[derive(Serialize)]
struct ConvergenceSummary<'a> {
    settings: &'a BenchmarkSettings,
    curves: &'a [ConvergenceCurve],
}

#[derive(Serialize)]
struct ProfileSummary<'a> {
    settings: &'a BenchmarkSettings,
    profile: &'a PerformanceProfile,
}

/// Writes one CSV per function (`<algorithm>_mean`/`<algorithm>_std` columns)
/// and a JSON summary of all curves. Returns the written files.
pub fn run_convergence(args: &BenchArgs, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let settings = args.settings();
    let setups = args.algorithm_setups()?;
    let mut rng = settings.rng();
    let mut written = Vec::new();
    let mut curves: Vec<ConvergenceCurve> = Vec::new();

    for &function in &args.functions {
        let mut names = Vec::with_capacity(2 * setups.len());
        let mut series = Vec::with_capacity(2 * setups.len());

        for setup in &setups {
            let curve = convergence_rate(setup, function, &settings, &mut rng)?;
            names.push(format!("{}_mean", setup.kind));
            series.push(curve.mean.clone());
            names.push(format!("{}_std", setup.kind));
            series.push(curve.standard_deviation.clone());
            curves.push(curve);
        }

        let path = output_dir.join(format!("convergence_{}_d{}.csv", function, settings.number_of_dimensions));
        write_series_csv(&path, &names, &series)?;
        log::info!("wrote {}", path.display());
        written.push(path);
    }

    let summary = output_dir.join(format!("convergence_d{}.json", settings.number_of_dimensions));
    write_json(&summary, &ConvergenceSummary { settings: &settings, curves: &curves })?;
    written.push(summary);

    Ok(written)
}

/// Writes the profile curves (`tau` then one column per algorithm) and a JSON
/// summary with the raw performances. Returns the written files.
pub fn run_profile(args: &BenchArgs, max_tau: f64, tau_steps: usize, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let settings = args.settings();
    let setups = args.algorithm_setups()?;
    let taus = tau_grid(max_tau, tau_steps);
    let mut rng = settings.rng();

    let profile = performance_profile(&setups, &args.functions, &settings, &taus, &mut rng)?;

    let mut names = vec!["tau".to_string()];
    names.extend(setups.iter().map(|setup| setup.kind.to_string()));
    let mut series = vec![profile.taus.clone()];
    series.extend(profile.profiles.iter().cloned());

    let path = output_dir.join(format!("performance_profile_d{}.csv", settings.number_of_dimensions));
    write_series_csv(&path, &names, &series)?;
    log::info!("wrote {}", path.display());

    let summary = output_dir.join(format!("performance_profile_d{}.json", settings.number_of_dimensions));
    write_json(&summary, &ProfileSummary { settings: &settings, profile: &profile })?;

    Ok(vec![path, summary])
}
