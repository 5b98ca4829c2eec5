/// Name of the environment variable pointing to the project root
pub const ONOPT_DIR: &str = "ONOPT_DIR";

/// Directory (relative to `ONOPT_DIR`) for everything the harness writes
pub const DATA_GENERATED: &str = "data_generated";

/// Subdirectory of [`DATA_GENERATED`] for run records
pub const RECORDS: &str = "records";
