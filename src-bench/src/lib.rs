//! Evaluations on top of the optimisation engine
//!
//! - [`convergence_rate`]: best objective value per evaluation, mean and
//!   standard deviation over repeated runs
//! - [`performance_profile`]: share of problems solved within a factor `tau`
//!   of the fastest strategy
//! - [`write_series_csv`]: column export consumed by plotting tools

pub mod cli;
pub mod commands;
pub mod convergence;
pub mod error;
pub mod export;
pub mod profile;
pub mod trial;

pub use convergence::{ConvergenceCurve, convergence_rate, pad_to_budget};
pub use error::{BenchError, Result};
pub use export::{write_json, write_series_csv};
pub use profile::{PerformanceProfile, performance_profile, performance_ratios, profile_value, tau_grid};
pub use trial::{AlgorithmSetup, BenchmarkSettings, Trial, benchmark_instance, run_trial};
