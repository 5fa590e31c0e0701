//! Component H: the engine's single error type, and the exit codes/messages
//! `main` maps each variant to.

use thiserror::Error;

/// The four fatal error kinds from §7, each tied to one process exit path.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Wrong argument count, or an argument that doesn't parse as a decimal integer.
    #[error("Invalid arguments")]
    Args,
    /// The segment could not be attached: not found, wrong size, or no permission.
    #[error("Failed to attach shared memory")]
    Attach(#[source] std::io::Error),
    /// `Parameters::distance_metric` is neither `'e'` nor `'c'`.
    #[error("Invalid distance metric")]
    InvalidMetric(i8),
    /// `Parameters::dimensions` is neither `2` nor `768`.
    #[error("Invalid dimensions")]
    InvalidDimensions(u16),
    /// The segment could not be detached after a successful run. Results are
    /// already committed to shared memory and remain valid.
    #[error("Failed to detach shared memory")]
    Detach(#[source] std::io::Error),
}

impl EngineError {
    /// The process exit code this error maps to. Every variant here is
    /// non-zero; success is reported by returning `Ok(())` from `main`.
    pub fn exit_code(&self) -> u8 {
        match self {
            EngineError::Args => 1,
            EngineError::Attach(_) => 2,
            EngineError::InvalidMetric(_) => 3,
            EngineError::InvalidDimensions(_) => 4,
            EngineError::Detach(_) => 5,
        }
    }
}
