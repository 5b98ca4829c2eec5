use onopt_algorithm::OptimisationError;
use onopt_env::EnvError;
use onopt_monitor::MonitorError;
use onopt_problem::ProblemError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error(transparent)]
    Optimisation(#[from] OptimisationError),

    #[error(transparent)]
    Problem(#[from] ProblemError),

    #[error(transparent)]
    Monitor(#[from] MonitorError),

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid benchmark configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, BenchError>;
