//! Selective telemetry log
//!
//! A [`Monitor`] keeps a set of observed [`MonitorTag`]s and an append-only
//! log of `(tag, value)` records. Values for tags that are not observed are
//! dropped on the spot, so unobserved telemetry costs a set lookup.
//!
//! The monitor is an explicit value owned by the caller and handed to the
//! optimisation engine; concurrent runs use one monitor each.

use std::collections::BTreeSet;
use std::fmt;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::MonitorError;

/// Category of a recorded value
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MonitorTag {
    CurrentNumberOfIterations,
    CurrentBestParameter,
    CurrentBestObjectiveValue,
    FinalNumberOfIterations,
    FinalNumberOfFunctionEvaluations,
    IsFinished,
    Custom(String),
}

impl fmt::Display for MonitorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorTag::CurrentNumberOfIterations => write!(f, "current_number_of_iterations"),
            MonitorTag::CurrentBestParameter => write!(f, "current_best_parameter"),
            MonitorTag::CurrentBestObjectiveValue => write!(f, "current_best_objective_value"),
            MonitorTag::FinalNumberOfIterations => write!(f, "final_number_of_iterations"),
            MonitorTag::FinalNumberOfFunctionEvaluations => {
                write!(f, "final_number_of_function_evaluations")
            }
            MonitorTag::IsFinished => write!(f, "is_finished"),
            MonitorTag::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// A recorded value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MonitorValue {
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Vector(Vec<f64>),
    Empty,
}

impl MonitorValue {
    /// Numeric view of scalar values; booleans map to 0/1
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MonitorValue::Integer(v) => Some(*v as f64),
            MonitorValue::Real(v) => Some(*v),
            MonitorValue::Boolean(v) => Some(if *v { 1.0 } else { 0.0 }),
            MonitorValue::Vector(_) | MonitorValue::Empty => None,
        }
    }

    pub fn as_vector(&self) -> Option<&[f64]> {
        match self {
            MonitorValue::Vector(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}

impl From<f64> for MonitorValue {
    fn from(value: f64) -> Self {
        MonitorValue::Real(value)
    }
}

impl From<i64> for MonitorValue {
    fn from(value: i64) -> Self {
        MonitorValue::Integer(value)
    }
}

impl From<usize> for MonitorValue {
    fn from(value: usize) -> Self {
        MonitorValue::Integer(value as i64)
    }
}

impl From<bool> for MonitorValue {
    fn from(value: bool) -> Self {
        MonitorValue::Boolean(value)
    }
}

impl From<Vec<f64>> for MonitorValue {
    fn from(value: Vec<f64>) -> Self {
        MonitorValue::Vector(value)
    }
}

impl From<&Array1<f64>> for MonitorValue {
    fn from(value: &Array1<f64>) -> Self {
        MonitorValue::Vector(value.to_vec())
    }
}

impl From<Array1<f64>> for MonitorValue {
    fn from(value: Array1<f64>) -> Self {
        MonitorValue::Vector(value.to_vec())
    }
}

/// One entry of the log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorRecord {
    pub tag: MonitorTag,
    pub value: MonitorValue,
}

#[derive(Debug, Clone, Default)]
pub struct Monitor {
    observed: BTreeSet<MonitorTag>,
    records: Vec<MonitorRecord>,
}

impl Monitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to `tags`; observing a tag twice is a no-op.
    pub fn observe<I>(&mut self, tags: I)
    where
        I: IntoIterator<Item = MonitorTag>,
    {
        for tag in tags {
            if self.observed.insert(tag.clone()) {
                log::debug!("observing {}", tag);
            }
        }
    }

    pub fn is_observed(&self, tag: &MonitorTag) -> bool {
        self.observed.contains(tag)
    }

    pub fn observed_tags(&self) -> impl Iterator<Item = &MonitorTag> {
        self.observed.iter()
    }

    /// Appends `(tag, value)` if `tag` is observed, drops it otherwise.
    pub fn add(&mut self, tag: MonitorTag, value: impl Into<MonitorValue>) {
        if self.observed.contains(&tag) {
            self.records.push(MonitorRecord { tag, value: value.into() });
        }
    }

    /// Like [`Monitor::add`], but only builds the value if `tag` is observed.
    pub fn add_with<F>(&mut self, tag: MonitorTag, value: F)
    where
        F: FnOnce() -> MonitorValue,
    {
        if self.observed.contains(&tag) {
            self.records.push(MonitorRecord { tag, value: value() });
        }
    }

    /// All values recorded for `tag`, in insertion order
    pub fn get(&self, tag: &MonitorTag) -> Vec<MonitorValue> {
        self.records
            .iter()
            .filter(|record| &record.tag == tag)
            .map(|record| record.value.clone())
            .collect()
    }

    /// Numeric values recorded for `tag`; non-scalar values are skipped.
    pub fn get_f64(&self, tag: &MonitorTag) -> Vec<f64> {
        self.records
            .iter()
            .filter(|record| &record.tag == tag)
            .filter_map(|record| record.value.as_f64())
            .collect()
    }

    /// Joins the records of `tags` into tuples.
    ///
    /// The log is scanned once. Each record of `tags[n]` fills slot `n`; a
    /// tuple is emitted whenever the last tag is recorded, with the slots
    /// keeping their latest values. Within a tuple the tags must arrive in
    /// the order they are listed: a tag at or before the previous position
    /// while the tuple is still open is a [`MonitorError::MonitorSequencing`]
    /// error, as is emitting a tuple with a slot that was never filled.
    pub fn get_joined(&self, tags: &[MonitorTag]) -> Result<Vec<Vec<MonitorValue>>, MonitorError> {
        let mut joined = Vec::new();
        if tags.is_empty() {
            return Ok(joined);
        }

        let last = tags.len() - 1;
        let mut entry: Vec<Option<MonitorValue>> = vec![None; tags.len()];
        let mut last_position: Option<usize> = None;

        for (position, record) in self.records.iter().enumerate() {
            for (n, tag) in tags.iter().enumerate() {
                if &record.tag != tag {
                    continue;
                }

                if last_position.is_some_and(|previous| n <= previous && previous < last) {
                    return Err(sequencing_error(tags, position, "tag repeated before the tuple was complete"));
                }

                entry[n] = Some(record.value.clone());

                if n == last {
                    let tuple = entry
                        .iter()
                        .cloned()
                        .collect::<Option<Vec<MonitorValue>>>()
                        .ok_or_else(|| sequencing_error(tags, position, "tuple has a slot that was never recorded"))?;
                    joined.push(tuple);
                }

                last_position = Some(n);
            }
        }

        Ok(joined)
    }

    /// Drops every record, keeps the subscriptions.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn clear_tags(&mut self, tags: &[MonitorTag]) {
        self.records.retain(|record| !tags.contains(&record.tag));
    }

    /// Drops every record and every subscription.
    pub fn remove(&mut self) {
        self.clear();
        self.observed.clear();
    }

    pub fn remove_tags(&mut self, tags: &[MonitorTag]) {
        self.clear_tags(tags);
        for tag in tags {
            self.observed.remove(tag);
        }
    }

    pub fn records(&self) -> &[MonitorRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn sequencing_error(tags: &[MonitorTag], position: usize, reason: &'static str) -> MonitorError {
    MonitorError::MonitorSequencing {
        tags: tags.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(", "),
        position,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(name: &str) -> MonitorTag {
        MonitorTag::Custom(name.to_string())
    }

    #[test]
    fn test_add_requires_observe() {
        let mut monitor = Monitor::new();
        monitor.add(custom("a"), 1.0);
        monitor.observe([custom("a")]);
        monitor.add(custom("a"), 2.0);
        assert_eq!(monitor.get(&custom("a")), vec![MonitorValue::Real(2.0)]);
    }

    #[test]
    fn test_add_with_is_lazy() {
        let mut monitor = Monitor::new();
        let mut built = false;
        monitor.add_with(custom("a"), || {
            built = true;
            MonitorValue::Empty
        });
        assert!(!built);
        assert!(monitor.is_empty());
    }

    #[test]
    fn test_join_in_order() {
        let mut monitor = Monitor::new();
        monitor.observe([custom("i"), custom("f")]);
        monitor.add(custom("i"), 1usize);
        monitor.add(custom("f"), 10.0);
        monitor.add(custom("f"), 9.0);
        monitor.add(custom("i"), 2usize);
        monitor.add(custom("f"), 8.0);

        let joined = monitor.get_joined(&[custom("i"), custom("f")]).unwrap();
        assert_eq!(
            joined,
            vec![
                vec![MonitorValue::Integer(1), MonitorValue::Real(10.0)],
                vec![MonitorValue::Integer(1), MonitorValue::Real(9.0)],
                vec![MonitorValue::Integer(2), MonitorValue::Real(8.0)],
            ]
        );
    }

    #[test]
    fn test_join_out_of_order() {
        let mut monitor = Monitor::new();
        monitor.observe([custom("a"), custom("b"), custom("c")]);
        monitor.add(custom("a"), 1.0);
        monitor.add(custom("b"), 2.0);
        monitor.add(custom("a"), 3.0);
        monitor.add(custom("c"), 4.0);

        let err = monitor.get_joined(&[custom("a"), custom("b"), custom("c")]).unwrap_err();
        assert!(matches!(err, MonitorError::MonitorSequencing { position: 2, .. }), "{:?}", err);
    }

    #[test]
    fn test_join_missing_slot() {
        let mut monitor = Monitor::new();
        monitor.observe([custom("a"), custom("b")]);
        monitor.add(custom("b"), 2.0);
        assert!(monitor.get_joined(&[custom("a"), custom("b")]).is_err());
    }

    #[test]
    fn test_clear_and_remove() {
        let mut monitor = Monitor::new();
        monitor.observe([custom("a"), custom("b")]);
        monitor.add(custom("a"), 1.0);
        monitor.add(custom("b"), 2.0);

        monitor.clear_tags(&[custom("a")]);
        assert!(monitor.get(&custom("a")).is_empty());
        assert_eq!(monitor.len(), 1);
        assert!(monitor.is_observed(&custom("a")));

        monitor.remove_tags(&[custom("b")]);
        assert!(monitor.is_empty());
        assert!(!monitor.is_observed(&custom("b")));

        monitor.remove();
        assert_eq!(monitor.observed_tags().count(), 0);
    }
}
