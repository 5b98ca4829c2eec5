//! Command line interface of the `onopt` binary

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use onopt_algorithm::parameterisation::parameterisation_from_json;
use onopt_algorithm::{AlgorithmKind, ParameterValue, Parameterisation, parse_key_value};
use onopt_problem::BenchmarkFunction;

use crate::error::{BenchError, Result};
use crate::trial::{AlgorithmSetup, BenchmarkSettings};

#[derive(Parser, Debug)]
#[command(name = "onopt")]
#[command(author, version, about = "Benchmark black-box optimisation strategies on synthetic landscapes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Mean and standard deviation of the best objective value per evaluation
    Convergence(BenchArgs),

    /// Performance profiles over all functions and instances
    Profile {
        #[command(flatten)]
        bench: BenchArgs,

        /// Largest performance ratio of the profile
        #[arg(long, default_value_t = 10.0)]
        max_tau: f64,

        /// Number of tau values between 1 and max-tau
        #[arg(long, default_value_t = 100)]
        tau_steps: usize,
    },
}

#[derive(Args, Debug, Clone)]
pub struct BenchArgs {
    /// Benchmark functions (comma-separated), e.g. sphere,rastrigin,bent-cigar
    #[arg(short, long, value_delimiter = ',', default_value = "sphere")]
    pub functions: Vec<BenchmarkFunction>,

    /// Strategies (comma-separated): random-search, hill-climbing, hooke, pso
    #[arg(short, long, value_delimiter = ',', default_value = "random-search,hooke,pso")]
    pub algorithms: Vec<AlgorithmKind>,

    /// Number of dimensions of every problem
    #[arg(short, long, default_value_t = 2)]
    pub dimensions: usize,

    /// Maximal number of objective evaluations per run
    #[arg(short, long, default_value_t = 1000)]
    pub budget: usize,

    /// Runs per algorithm (convergence) or instances per function (profile)
    #[arg(short, long, default_value_t = 10)]
    pub runs: usize,

    /// Distance to the optimal objective value at which a run is finished
    #[arg(long, default_value_t = 1e-8)]
    pub precision: f64,

    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hyperparameter as ALGORITHM:KEY=VALUE, e.g. pso:populationSize=40 (repeatable)
    #[arg(short = 'p', long = "param", value_name = "ALGORITHM:KEY=VALUE")]
    pub params: Vec<String>,

    /// JSON file mapping algorithm names to hyperparameter objects
    #[arg(long, value_name = "FILE")]
    pub parameterisation: Option<PathBuf>,

    /// Output directory (defaults to $ONOPT_DIR/data_generated/records)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

impl BenchArgs {
    pub fn settings(&self) -> BenchmarkSettings {
        BenchmarkSettings {
            number_of_dimensions: self.dimensions,
            budget: self.budget,
            runs: self.runs,
            precision: self.precision,
            seed: self.seed,
        }
    }

    /// One setup per requested algorithm, with the JSON file applied first and `--param` on top
    pub fn algorithm_setups(&self) -> Result<Vec<AlgorithmSetup>> {
        let mut by_algorithm: HashMap<AlgorithmKind, Parameterisation> = HashMap::new();

        if let Some(path) = &self.parameterisation {
            for (kind, parameterisation) in read_parameterisation_file(path)? {
                by_algorithm.entry(kind).or_default().extend(parameterisation);
            }
        }
        for param in &self.params {
            let (kind, key, value) = parse_algorithm_param(param)?;
            by_algorithm.entry(kind).or_default().insert(key, value);
        }

        for kind in by_algorithm.keys() {
            if !self.algorithms.contains(kind) {
                log::warn!("hyperparameters given for {} which is not benchmarked", kind);
            }
        }

        Ok(self
            .algorithms
            .iter()
            .map(|&kind| AlgorithmSetup {
                kind,
                parameterisation: by_algorithm.get(&kind).cloned().unwrap_or_default(),
            })
            .collect())
    }
}

/// Parses `algorithm:key=value`
pub fn parse_algorithm_param(s: &str) -> Result<(AlgorithmKind, String, ParameterValue)> {
    let (algorithm, key_value) = s.split_once(':').ok_or_else(|| {
        BenchError::InvalidConfiguration(format!("expected ALGORITHM:KEY=VALUE, got '{}'", s))
    })?;
    let kind: AlgorithmKind = algorithm.trim().parse()?;
    let (key, value) = parse_key_value(key_value).map_err(BenchError::InvalidConfiguration)?;
    Ok((kind, key, value))
}

/// Reads `{"pso": {"populationSize": 40}, "hooke": {"stepSizeDecrease": 0.25}}`
pub fn read_parameterisation_file(path: &Path) -> Result<Vec<(AlgorithmKind, Parameterisation)>> {
    let content = std::fs::read_to_string(path)?;
    let raw: HashMap<String, serde_json::Value> = serde_json::from_str(&content)?;

    let mut parameterisations = Vec::with_capacity(raw.len());
    for (algorithm, value) in raw {
        let kind: AlgorithmKind = algorithm.parse()?;
        let parameterisation = parameterisation_from_json(&value.to_string())?;
        parameterisations.push((kind, parameterisation));
    }
    Ok(parameterisations)
}
