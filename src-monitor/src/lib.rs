//! Observation of optimisation runs
//!
//! - [`Monitor`]: opt-in, tag based log of values recorded during a run
//! - [`Statistic`]: online minimum/maximum/mean/variance over sample vectors

pub mod error;
pub mod monitor;
pub mod statistic;

pub use error::MonitorError;
pub use monitor::{Monitor, MonitorRecord, MonitorTag, MonitorValue};
pub use statistic::{MAXIMAL_NUMBER_OF_SAMPLES, Statistic};
