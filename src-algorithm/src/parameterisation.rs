//! Strategy hyperparameters passed as a string keyed map
//!
//! Keys are matched case-insensitively, so `populationSize`,
//! `populationsize` and `POPULATIONSIZE` all address the same value.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{OptimisationError, Result};

/// A hyperparameter value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Integer(i64),
    Real(f64),
}

impl ParameterValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            ParameterValue::Integer(v) => v as f64,
            ParameterValue::Real(v) => v,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Integer(v) => write!(f, "{}", v),
            ParameterValue::Real(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Integer(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Real(value)
    }
}

impl FromStr for ParameterValue {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let t = s.trim();
        if let Ok(v) = t.parse::<i64>() {
            return Ok(ParameterValue::Integer(v));
        }
        t.parse::<f64>()
            .map(ParameterValue::Real)
            .map_err(|_| format!("invalid parameter value: {}", s))
    }
}

/// Hyperparameters by name
pub type Parameterisation = HashMap<String, ParameterValue>;

/// Parses `key=value` into a parameterisation entry
pub fn parse_key_value(s: &str) -> std::result::Result<(String, ParameterValue), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty parameter name in '{}'", s));
    }
    Ok((key.to_string(), value.parse()?))
}

/// Parses a JSON object such as `{"populationSize": 20, "acceleration": 0.7}`
pub fn parameterisation_from_json(json: &str) -> std::result::Result<Parameterisation, serde_json::Error> {
    serde_json::from_str(json)
}

/// Positive integer value for `parameter`
pub(crate) fn positive_integer(parameter: &str, value: ParameterValue) -> Result<usize> {
    match value {
        ParameterValue::Integer(v) if v > 0 => Ok(v as usize),
        ParameterValue::Real(v) if v > 0.0 && v.fract() == 0.0 && v <= usize::MAX as f64 => Ok(v as usize),
        _ => Err(OptimisationError::InvalidParameterValue {
            parameter: parameter.to_string(),
            reason: format!("expected a positive integer, got {}", value),
        }),
    }
}

/// Finite real value for `parameter` satisfying `accept`
pub(crate) fn real_where(
    parameter: &str,
    value: ParameterValue,
    accept: impl Fn(f64) -> bool,
    expectation: &str,
) -> Result<f64> {
    let v = value.as_f64();
    if v.is_finite() && accept(v) {
        Ok(v)
    } else {
        Err(OptimisationError::InvalidParameterValue {
            parameter: parameter.to_string(),
            reason: format!("expected {}, got {}", expectation, value),
        })
    }
}

pub(crate) fn unknown_parameter(algorithm: &str, parameter: &str) -> OptimisationError {
    OptimisationError::UnknownParameter {
        algorithm: algorithm.to_string(),
        parameter: parameter.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_values() {
        assert_eq!("20".parse::<ParameterValue>().unwrap(), ParameterValue::Integer(20));
        assert_eq!("0.5".parse::<ParameterValue>().unwrap(), ParameterValue::Real(0.5));
        assert_eq!("1e-3".parse::<ParameterValue>().unwrap(), ParameterValue::Real(1e-3));
        assert!("fast".parse::<ParameterValue>().is_err());
    }

    #[test]
    fn test_parse_key_value() {
        let (key, value) = parse_key_value("populationSize=12").unwrap();
        assert_eq!(key, "populationSize");
        assert_eq!(value, ParameterValue::Integer(12));
        assert!(parse_key_value("populationSize").is_err());
        assert!(parse_key_value("=3").is_err());
    }

    #[test]
    fn test_from_json() {
        let p = parameterisation_from_json(r#"{"populationSize": 20, "acceleration": 0.7}"#).unwrap();
        assert_eq!(p["populationSize"], ParameterValue::Integer(20));
        assert_eq!(p["acceleration"], ParameterValue::Real(0.7));
    }

    #[test]
    fn test_positive_integer() {
        assert_eq!(positive_integer("n", ParameterValue::Integer(3)).unwrap(), 3);
        assert_eq!(positive_integer("n", ParameterValue::Real(4.0)).unwrap(), 4);
        assert!(positive_integer("n", ParameterValue::Integer(0)).is_err());
        assert!(positive_integer("n", ParameterValue::Real(2.5)).is_err());
    }
}
