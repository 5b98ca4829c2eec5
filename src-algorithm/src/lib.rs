//! Black-box optimisation engine and search strategies
//!
//! The engine ([`optimise`]) owns the protocol: budget and acceptable value
//! checks after every evaluation, best-so-far tracking restricted to
//! constraint-satisfying parameters, and [`onopt_monitor::Monitor`] records.
//! Strategies only implement [`OptimisationAlgorithm`]:
//!
//! - [`RandomSearch`]
//! - [`HillClimbing`]
//! - [`HookeAlgorithm`] (Hooke-Jeeves pattern search)
//! - [`StandardParticleSwarmOptimisation2011`]
//!
//! # Example
//!
//! ```rust
//! use ndarray::Array1;
//! use onopt_algorithm::{RandomSearch, optimise};
//! use onopt_monitor::Monitor;
//! use onopt_problem::OptimisationProblem;
//!
//! let mut problem = OptimisationProblem::from_fn(2, "sphere", |z| z.dot(z)).unwrap();
//! problem.set_lower_bounds(Array1::from_elem(2, -5.0)).unwrap();
//! problem.set_upper_bounds(Array1::from_elem(2, 5.0)).unwrap();
//! problem.set_maximal_number_of_evaluations(100).unwrap();
//!
//! let mut monitor = Monitor::new();
//! let report = optimise(&mut RandomSearch::with_seed(7), &mut problem, &mut monitor).unwrap();
//! assert_eq!(report.nfev, 100);
//! ```

pub mod engine;
pub mod error;
pub mod hill_climbing;
pub mod hooke_jeeves;
pub mod parameterisation;
pub mod particle_swarm;
pub mod random_search;
pub mod registry;
pub mod sampling;

pub use engine::{Evaluation, OptimisationAlgorithm, OptimisationReport, RunContext, optimise};
pub use error::{OptimisationError, Result};
pub use hill_climbing::HillClimbing;
pub use hooke_jeeves::HookeAlgorithm;
pub use parameterisation::{ParameterValue, Parameterisation, parse_key_value};
pub use particle_swarm::{StandardParticleSwarmOptimisation2011, clamp_to_bounds};
pub use random_search::RandomSearch;
pub use registry::AlgorithmKind;
