//! Log-specific error type wrapping IO and csv errors.

use smartenergy_domain::error::SmartEnergyError;

/// Errors originating from the CSV decision log.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// The log file could not be opened, flushed or removed.
    #[error("log file error")]
    Io(#[from] std::io::Error),

    /// A row could not be serialized.
    #[error("csv error")]
    Csv(#[from] csv::Error),
}

impl From<LogError> for SmartEnergyError {
    fn from(err: LogError) -> Self {
        Self::Persistence(Box::new(err))
    }
}
