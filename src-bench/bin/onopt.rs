//! onopt: benchmark black-box optimisation strategies and export the results as CSV
//!
//! ```text
//! onopt convergence --functions sphere,rastrigin --algorithms hooke,pso --budget 2000
//! onopt profile --functions sphere,ellipsoidal,discus --runs 20 --max-tau 8
//! ```
//!
//! Set `RUST_LOG=info` (or `debug`) for progress output.

use std::error::Error;

use clap::Parser;
use onopt_bench::cli::{Cli, Command};
use onopt_bench::commands::{run_convergence, run_profile};
use onopt_env::resolve_output_dir;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let written = match &cli.command {
        Command::Convergence(args) => {
            let output_dir = resolve_output_dir(args.output_dir.as_deref())?;
            run_convergence(args, &output_dir)?
        }
        Command::Profile { bench, max_tau, tau_steps } => {
            let output_dir = resolve_output_dir(bench.output_dir.as_deref())?;
            run_profile(bench, *max_tau, *tau_steps, &output_dir)?
        }
    };

    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}
