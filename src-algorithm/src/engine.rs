//! Optimisation engine
//!
//! [`optimise`] drives any [`OptimisationAlgorithm`] against an
//! [`OptimisationProblem`]:
//!
//! 1. reset the problem's evaluation counter and the best known value,
//!    record iteration 1, run [`OptimisationAlgorithm::initialise`];
//! 2. until the acceptable objective value is reached or the budget is used
//!    up: record the next iteration, ask the strategy for a batch of
//!    parameters and evaluate them in order, then hand the whole batch back
//!    through [`OptimisationAlgorithm::update`].
//!
//! Both stopping rules are checked after every single evaluation. When one
//! of them fires inside a batch, the rest of the batch is never evaluated
//! and `update` is not called.

use std::fmt;

use ndarray::Array1;
use onopt_monitor::{Monitor, MonitorTag, MonitorValue};
use onopt_problem::OptimisationProblem;
use serde::Serialize;

use crate::error::{OptimisationError, Result};
use crate::parameterisation::Parameterisation;

/// Outcome of a single evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub objective_value: f64,
    pub is_satisfying_constraints: bool,
}

/// Search strategy plugged into [`optimise`]
pub trait OptimisationAlgorithm {
    fn name(&self) -> &str;

    /// Sets hyperparameters by (case-insensitive) name.
    ///
    /// Unknown names fail with [`OptimisationError::UnknownParameter`].
    fn set_parameterisation(&mut self, parameterisation: &Parameterisation) -> Result<()>;

    /// Called once per run, before the first batch. May evaluate points through `run`.
    fn initialise(&mut self, _run: &mut RunContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Next batch of parameters to evaluate, in evaluation order. Must not be empty.
    fn next_parameters(&mut self, run: &RunContext<'_>) -> Result<Vec<Array1<f64>>>;

    /// Results of the last complete batch
    fn update(
        &mut self,
        _parameters: &[Array1<f64>],
        _objective_values: &[f64],
        _is_satisfying_constraints: &[bool],
    ) {
    }
}

/// Per-run state shared between the engine and the strategy
pub struct RunContext<'a> {
    problem: &'a mut OptimisationProblem,
    monitor: &'a mut Monitor,
    best_parameter: Option<Array1<f64>>,
    best_objective_value: f64,
    number_of_iterations: usize,
}

impl<'a> RunContext<'a> {
    pub(crate) fn new(problem: &'a mut OptimisationProblem, monitor: &'a mut Monitor) -> Self {
        Self {
            problem,
            monitor,
            best_parameter: None,
            best_objective_value: f64::INFINITY,
            number_of_iterations: 0,
        }
    }

    pub fn problem(&self) -> &OptimisationProblem {
        &*self.problem
    }

    /// Evaluates `parameter`, counting towards the budget.
    ///
    /// A constraint-satisfying parameter that improves on the best known
    /// objective value becomes the new best. The current best is recorded
    /// after every evaluation.
    pub fn evaluate(&mut self, parameter: &Array1<f64>) -> Result<Evaluation> {
        let objective_value = self.problem.get_objective_value(parameter)?;
        let is_satisfying_constraints = self.problem.is_satisfying_constraints(parameter)?;

        if is_satisfying_constraints && objective_value < self.best_objective_value {
            self.best_objective_value = objective_value;
            self.best_parameter = Some(parameter.clone());
        }

        let best_parameter = &self.best_parameter;
        self.monitor.add_with(MonitorTag::CurrentBestParameter, || match best_parameter {
            Some(parameter) => MonitorValue::from(parameter),
            None => MonitorValue::Empty,
        });
        self.monitor.add(MonitorTag::CurrentBestObjectiveValue, self.best_objective_value);

        Ok(Evaluation { objective_value, is_satisfying_constraints })
    }

    /// The best objective value reached the problem's acceptable objective value.
    pub fn is_finished(&self) -> bool {
        self.best_objective_value <= self.problem.acceptable_objective_value()
    }

    /// The evaluation budget is used up.
    pub fn is_terminated(&self) -> bool {
        self.problem.number_of_evaluations() >= self.problem.maximal_number_of_evaluations()
    }

    pub fn best_parameter(&self) -> Option<&Array1<f64>> {
        self.best_parameter.as_ref()
    }

    pub fn best_objective_value(&self) -> f64 {
        self.best_objective_value
    }

    pub fn number_of_iterations(&self) -> usize {
        self.number_of_iterations
    }

    fn next_iteration(&mut self) {
        self.number_of_iterations += 1;
        self.monitor.add(MonitorTag::CurrentNumberOfIterations, self.number_of_iterations);
    }

    fn finish(self, algorithm: &str) -> OptimisationReport {
        let is_finished = self.is_finished();
        let nfev = self.problem.number_of_evaluations();

        self.monitor.add(MonitorTag::FinalNumberOfIterations, self.number_of_iterations);
        self.monitor.add(MonitorTag::FinalNumberOfFunctionEvaluations, nfev);
        self.monitor.add(MonitorTag::IsFinished, is_finished);

        let message = if is_finished {
            "Reached the acceptable objective value.".to_string()
        } else {
            "Maximum number of function evaluations reached.".to_string()
        };

        log::info!(
            "{} on {}: f = {:e} after {} iterations / {} evaluations ({})",
            algorithm,
            self.problem.name(),
            self.best_objective_value,
            self.number_of_iterations,
            nfev,
            message
        );

        OptimisationReport {
            algorithm: algorithm.to_string(),
            problem: self.problem.name().to_string(),
            x: self.best_parameter.unwrap_or_else(|| Array1::zeros(0)),
            fun: self.best_objective_value,
            success: is_finished,
            message,
            nit: self.number_of_iterations,
            nfev,
        }
    }
}

/// Result of one [`optimise`] call
#[derive(Clone, Serialize)]
pub struct OptimisationReport {
    pub algorithm: String,
    pub problem: String,
    /// Best constraint-satisfying parameter, empty if none was found
    pub x: Array1<f64>,
    pub fun: f64,
    /// The acceptable objective value was reached
    pub success: bool,
    pub message: String,
    pub nit: usize,
    pub nfev: usize,
}

impl fmt::Debug for OptimisationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptimisationReport")
            .field("algorithm", &self.algorithm)
            .field("problem", &self.problem)
            .field("x", &format!("len={}", self.x.len()))
            .field("fun", &self.fun)
            .field("success", &self.success)
            .field("message", &self.message)
            .field("nit", &self.nit)
            .field("nfev", &self.nfev)
            .finish()
    }
}

/// Runs `algorithm` on `problem` until it is finished or out of budget.
pub fn optimise<A>(
    algorithm: &mut A,
    problem: &mut OptimisationProblem,
    monitor: &mut Monitor,
) -> Result<OptimisationReport>
where
    A: OptimisationAlgorithm + ?Sized,
{
    log::info!(
        "{} on {} (d = {}, budget = {}, acceptable = {})",
        algorithm.name(),
        problem.name(),
        problem.number_of_dimensions(),
        problem.maximal_number_of_evaluations(),
        problem.acceptable_objective_value()
    );

    problem.reset_number_of_evaluations();
    let mut run = RunContext::new(problem, monitor);
    run.next_iteration();

    algorithm.initialise(&mut run)?;

    while !(run.is_finished() || run.is_terminated()) {
        run.next_iteration();

        let parameters = algorithm.next_parameters(&run)?;
        if parameters.is_empty() {
            return Err(OptimisationError::EmptyCandidateBatch(algorithm.name().to_string()));
        }

        log::debug!(
            "iteration {}: {} candidate(s), best f = {:e}",
            run.number_of_iterations,
            parameters.len(),
            run.best_objective_value
        );

        let mut objective_values = Vec::with_capacity(parameters.len());
        let mut is_satisfying_constraints = Vec::with_capacity(parameters.len());
        for parameter in &parameters {
            let evaluation = run.evaluate(parameter)?;
            objective_values.push(evaluation.objective_value);
            is_satisfying_constraints.push(evaluation.is_satisfying_constraints);

            if run.is_finished() || run.is_terminated() {
                return Ok(run.finish(algorithm.name()));
            }
        }

        algorithm.update(&parameters, &objective_values, &is_satisfying_constraints);
    }

    Ok(run.finish(algorithm.name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// Proposes a fixed batch every round and counts `update` calls
    struct FixedBatch {
        batch: Vec<Array1<f64>>,
        updates: usize,
    }

    impl OptimisationAlgorithm for FixedBatch {
        fn name(&self) -> &str {
            "fixed-batch"
        }

        fn set_parameterisation(&mut self, _parameterisation: &Parameterisation) -> Result<()> {
            Ok(())
        }

        fn next_parameters(&mut self, _run: &RunContext<'_>) -> Result<Vec<Array1<f64>>> {
            Ok(self.batch.clone())
        }

        fn update(&mut self, parameters: &[Array1<f64>], objective_values: &[f64], flags: &[bool]) {
            assert_eq!(parameters.len(), objective_values.len());
            assert_eq!(parameters.len(), flags.len());
            self.updates += 1;
        }
    }

    fn sphere() -> OptimisationProblem {
        let mut problem = OptimisationProblem::from_fn(1, "sphere", |z| z.dot(z)).unwrap();
        problem.set_lower_bounds(array![-1.0]).unwrap();
        problem.set_upper_bounds(array![1.0]).unwrap();
        problem
    }

    #[test]
    fn test_budget_stops_mid_batch() {
        let mut problem = sphere();
        problem.set_maximal_number_of_evaluations(5).unwrap();
        let mut algorithm = FixedBatch {
            batch: vec![array![0.9], array![0.5], array![0.7]],
            updates: 0,
        };
        let mut monitor = Monitor::new();

        let report = optimise(&mut algorithm, &mut problem, &mut monitor).unwrap();
        assert_eq!(report.nfev, 5);
        assert_eq!(report.nit, 3);
        // only the first batch was complete
        assert_eq!(algorithm.updates, 1);
        assert_eq!(report.fun, 0.25);
        assert!(!report.success);
    }

    #[test]
    fn test_acceptable_value_stops_mid_batch() {
        let mut problem = sphere();
        problem.set_acceptable_objective_value(0.3);
        let mut algorithm = FixedBatch {
            batch: vec![array![0.75], array![0.5], array![0.0]],
            updates: 0,
        };
        let mut monitor = Monitor::new();
        monitor.observe([MonitorTag::CurrentBestObjectiveValue, MonitorTag::IsFinished]);

        let report = optimise(&mut algorithm, &mut problem, &mut monitor).unwrap();
        assert!(report.success);
        assert_eq!(report.nfev, 2);
        assert_eq!(report.x, array![0.5]);
        assert_eq!(algorithm.updates, 0);
        assert_eq!(monitor.get_f64(&MonitorTag::CurrentBestObjectiveValue), vec![0.5625, 0.25]);
        assert_eq!(monitor.get(&MonitorTag::IsFinished), vec![MonitorValue::Boolean(true)]);
    }

    #[test]
    fn test_infeasible_points_never_become_best() {
        let mut problem = sphere();
        problem.set_maximal_number_of_evaluations(2).unwrap();
        let mut algorithm = FixedBatch { batch: vec![array![3.0], array![0.0]], updates: 0 };
        let mut algorithm_outside = FixedBatch { batch: vec![array![2.5]], updates: 0 };
        let mut monitor = Monitor::new();

        let report = optimise(&mut algorithm, &mut problem, &mut monitor).unwrap();
        assert_eq!(report.fun, 0.0);

        let report = optimise(&mut algorithm_outside, &mut problem, &mut monitor).unwrap();
        assert_eq!(report.fun, f64::INFINITY);
        assert_eq!(report.x.len(), 0);
        assert_eq!(report.nfev, 2);
    }

    #[test]
    fn test_empty_batch_is_an_error() {
        let mut problem = sphere();
        let mut algorithm = FixedBatch { batch: vec![], updates: 0 };
        let mut monitor = Monitor::new();
        assert!(matches!(
            optimise(&mut algorithm, &mut problem, &mut monitor),
            Err(OptimisationError::EmptyCandidateBatch(_))
        ));
    }
}
