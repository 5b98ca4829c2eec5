//! Optimisation problems and benchmark landscapes
//!
//! This crate provides the problem side of the harness:
//!
//! - [`OptimisationProblem`]: bounds, evaluation budget, acceptable objective
//!   value, parameter shift/rotation and the evaluation counter
//! - [`transform`]: pure landscape transforms (oscillate, asymmetric, delta, ...)
//! - [`functions`]: benchmark families implementing [`ObjectiveFunction`]
//! - [`benchmark_problem`]: randomised instances of those families
//!
//! # Example
//!
//! ```rust
//! use ndarray::Array1;
//! use onopt_problem::OptimisationProblem;
//!
//! let mut problem = OptimisationProblem::from_fn(2, "sphere", |z| z.dot(z)).unwrap();
//! let value = problem.get_objective_value(&Array1::from_vec(vec![1.0, 2.0])).unwrap();
//! assert_eq!(value, 5.0);
//! assert_eq!(problem.number_of_evaluations(), 1);
//! ```

pub mod benchmark;
pub mod error;
pub mod functions;
pub mod linalg;
pub mod problem;
pub mod transform;

pub use benchmark::{BenchmarkFunction, benchmark_problem};
pub use error::ProblemError;
pub use problem::{FnObjective, ObjectiveFunction, OptimisationProblem};
