//! Environment utilities and constants for onopt
//!
//! Generated data (CSV curves, JSON summaries) lives under
//! `$ONOPT_DIR/data_generated`.

pub mod constants;
pub mod env_utils;

pub use constants::*;
pub use env_utils::*;
