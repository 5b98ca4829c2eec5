/// Error type for the monitor and statistics
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MonitorError {
    #[error("Monitor records for [{tags}] arrived out of order at record {position}: {reason}")]
    MonitorSequencing {
        tags: String,
        position: usize,
        reason: &'static str,
    },

    #[error("The number of samples must be less than 2^53 ({limit}) to keep the accumulated values precise.")]
    PrecisionOverflow { limit: u64 },

    #[error("The number of values ({actual}) must match the number of tracked dimensions ({expected}).")]
    DimensionMismatch { expected: usize, actual: usize },
}
