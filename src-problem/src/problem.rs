//! Optimisation problem: bounds, budget, landscape transforms and evaluation counting
//!
//! An [`OptimisationProblem`] wraps an [`ObjectiveFunction`] and applies the
//! configured parameter shift and rotation before handing the point to it:
//!
//! `f(R · (x - shift)) + soft_constraint(x) + objective_value_shift`
//!
//! Every call to [`OptimisationProblem::get_objective_value`] counts towards
//! the evaluation budget.

use std::fmt;
use std::sync::Arc;

use ndarray::{Array1, Array2};

use crate::error::ProblemError;
use crate::linalg::ensure_rotation;

/// Landscape implementation plugged into an [`OptimisationProblem`]
pub trait ObjectiveFunction: fmt::Debug + Send + Sync {
    /// Human readable name, used in logs and reports
    fn name(&self) -> &str;

    /// Objective value of an already shifted and rotated parameter
    fn objective_value(&self, parameter: &Array1<f64>) -> f64;

    /// Additive penalty computed on the raw, untransformed parameter
    fn soft_constraint_value(&self, _parameter: &Array1<f64>) -> f64 {
        0.0
    }
}

/// Objective backed by a closure, see [`OptimisationProblem::from_fn`]
#[derive(Clone)]
pub struct FnObjective {
    name: String,
    function: Arc<dyn Fn(&Array1<f64>) -> f64 + Send + Sync>,
}

impl FnObjective {
    pub fn new<F>(name: impl Into<String>, function: F) -> Self
    where
        F: Fn(&Array1<f64>) -> f64 + Send + Sync + 'static,
    {
        Self { name: name.into(), function: Arc::new(function) }
    }
}

impl fmt::Debug for FnObjective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnObjective").field("name", &self.name).finish()
    }
}

impl ObjectiveFunction for FnObjective {
    fn name(&self) -> &str {
        &self.name
    }

    fn objective_value(&self, parameter: &Array1<f64>) -> f64 {
        (self.function)(parameter)
    }
}

/// A bounded, budgeted optimisation problem
#[derive(Debug)]
pub struct OptimisationProblem {
    number_of_dimensions: usize,
    lower_bounds: Array1<f64>,
    upper_bounds: Array1<f64>,
    maximal_number_of_evaluations: usize,
    acceptable_objective_value: f64,
    parameter_shift: Array1<f64>,
    parameter_rotation: Array2<f64>,
    objective_value_shift: f64,
    number_of_evaluations: usize,
    objective: Box<dyn ObjectiveFunction>,
}

impl OptimisationProblem {
    /// Problem of `number_of_dimensions` unbounded dimensions, a budget of
    /// 1000 evaluations and no acceptable objective value.
    pub fn new(
        number_of_dimensions: usize,
        objective: Box<dyn ObjectiveFunction>,
    ) -> Result<Self, ProblemError> {
        if number_of_dimensions == 0 {
            return Err(ProblemError::InvalidConfiguration(
                "The number of dimensions must be greater than 0.".to_string(),
            ));
        }

        Ok(Self {
            number_of_dimensions,
            lower_bounds: Array1::from_elem(number_of_dimensions, -f64::MAX),
            upper_bounds: Array1::from_elem(number_of_dimensions, f64::MAX),
            maximal_number_of_evaluations: 1000,
            acceptable_objective_value: f64::NEG_INFINITY,
            parameter_shift: Array1::zeros(number_of_dimensions),
            parameter_rotation: Array2::eye(number_of_dimensions),
            objective_value_shift: 0.0,
            number_of_evaluations: 0,
            objective,
        })
    }

    /// Problem over an ad-hoc closure
    pub fn from_fn<F>(
        number_of_dimensions: usize,
        name: impl Into<String>,
        function: F,
    ) -> Result<Self, ProblemError>
    where
        F: Fn(&Array1<f64>) -> f64 + Send + Sync + 'static,
    {
        Self::new(number_of_dimensions, Box::new(FnObjective::new(name, function)))
    }

    pub fn name(&self) -> &str {
        self.objective.name()
    }

    pub fn number_of_dimensions(&self) -> usize {
        self.number_of_dimensions
    }

    pub fn objective(&self) -> &dyn ObjectiveFunction {
        self.objective.as_ref()
    }

    pub fn set_maximal_number_of_evaluations(
        &mut self,
        maximal_number_of_evaluations: usize,
    ) -> Result<(), ProblemError> {
        if maximal_number_of_evaluations < 1 {
            return Err(ProblemError::InvalidConfiguration(format!(
                "The maximal number of function evaluations ({}) must be greater than 0.",
                maximal_number_of_evaluations
            )));
        }

        self.maximal_number_of_evaluations = maximal_number_of_evaluations;
        Ok(())
    }

    pub fn maximal_number_of_evaluations(&self) -> usize {
        self.maximal_number_of_evaluations
    }

    pub fn set_acceptable_objective_value(&mut self, acceptable_objective_value: f64) {
        self.acceptable_objective_value = acceptable_objective_value;
    }

    pub fn acceptable_objective_value(&self) -> f64 {
        self.acceptable_objective_value
    }

    /// Lower bounds are not checked against the upper bounds; callers keep `lower <= upper`.
    pub fn set_lower_bounds(&mut self, lower_bounds: Array1<f64>) -> Result<(), ProblemError> {
        self.check_dimension("lower bound", lower_bounds.len())?;
        self.lower_bounds = lower_bounds;
        Ok(())
    }

    pub fn lower_bounds(&self) -> &Array1<f64> {
        &self.lower_bounds
    }

    pub fn set_upper_bounds(&mut self, upper_bounds: Array1<f64>) -> Result<(), ProblemError> {
        self.check_dimension("upper bound", upper_bounds.len())?;
        self.upper_bounds = upper_bounds;
        Ok(())
    }

    pub fn upper_bounds(&self) -> &Array1<f64> {
        &self.upper_bounds
    }

    pub fn set_parameter_shift(&mut self, parameter_shift: Array1<f64>) -> Result<(), ProblemError> {
        self.check_dimension("parameter shift", parameter_shift.len())?;
        self.parameter_shift = parameter_shift;
        Ok(())
    }

    pub fn parameter_shift(&self) -> &Array1<f64> {
        &self.parameter_shift
    }

    /// Sets the left hand-side rotation applied around `parameter_shift`.
    ///
    /// The matrix must be a `d x d` proper rotation (determinant 1 and
    /// orthogonal, up to [`crate::linalg::ROTATION_TOLERANCE`]).
    pub fn set_rotation_matrix(&mut self, parameter_rotation: Array2<f64>) -> Result<(), ProblemError> {
        ensure_rotation(self.number_of_dimensions, &parameter_rotation)?;

        self.parameter_rotation = parameter_rotation;
        Ok(())
    }

    pub fn rotation_matrix(&self) -> &Array2<f64> {
        &self.parameter_rotation
    }

    pub fn set_objective_value_shift(&mut self, objective_value_shift: f64) {
        self.objective_value_shift = objective_value_shift;
    }

    pub fn objective_value_shift(&self) -> f64 {
        self.objective_value_shift
    }

    /// Number of counted objective function evaluations
    pub fn number_of_evaluations(&self) -> usize {
        self.number_of_evaluations
    }

    pub fn reset_number_of_evaluations(&mut self) {
        self.number_of_evaluations = 0;
    }

    /// True if every component lies within `[lower, upper]` (inclusive).
    ///
    /// Does not count as an evaluation.
    pub fn is_satisfying_constraints(&self, parameter: &Array1<f64>) -> Result<bool, ProblemError> {
        self.check_dimension("parameter", parameter.len())?;

        Ok(parameter
            .iter()
            .zip(self.lower_bounds.iter().zip(self.upper_bounds.iter()))
            .all(|(&value, (&lower, &upper))| value >= lower && value <= upper))
    }

    /// Objective value of `parameter`; increases the number of evaluations by 1.
    pub fn get_objective_value(&mut self, parameter: &Array1<f64>) -> Result<f64, ProblemError> {
        self.check_dimension("parameter", parameter.len())?;

        self.number_of_evaluations += 1;

        let transformed = self.parameter_rotation.dot(&(parameter - &self.parameter_shift));
        let value = self.objective.objective_value(&transformed)
            + self.objective.soft_constraint_value(parameter)
            + self.objective_value_shift;

        log::trace!(
            "{} evaluation #{}: f = {:e}",
            self.objective.name(),
            self.number_of_evaluations,
            value
        );

        Ok(value)
    }

    pub fn get_soft_constraint_value(&self, parameter: &Array1<f64>) -> Result<f64, ProblemError> {
        self.check_dimension("parameter", parameter.len())?;
        Ok(self.objective.soft_constraint_value(parameter))
    }

    fn check_dimension(&self, what: &'static str, actual: usize) -> Result<(), ProblemError> {
        if actual != self.number_of_dimensions {
            return Err(ProblemError::dimension_mismatch(what, self.number_of_dimensions, actual));
        }
        Ok(())
    }
}
