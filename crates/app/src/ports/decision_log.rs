//! Decision log port: append-only persistence for decision records.

use smartenergy_domain::decision::DecisionRecord;
use smartenergy_domain::error::SmartEnergyError;

/// Ordered, append-only store of [`DecisionRecord`]s.
///
/// Implementations keep an in-memory sequence and may mirror it to durable
/// storage. Records are never reordered or edited; the only removal is
/// [`reset`](Self::reset), which clears everything.
///
/// A single writer is assumed. Callers that share a log between tasks must
/// serialize access to it.
pub trait DecisionLog {
    /// Append a record.
    ///
    /// The record is kept in memory even when the durable mirror fails.
    ///
    /// # Errors
    ///
    /// Returns [`SmartEnergyError::Persistence`] if the durable mirror could
    /// not be written.
    fn append(&mut self, record: DecisionRecord) -> Result<(), SmartEnergyError>;

    /// Every record, in insertion order.
    fn read_all(&self) -> &[DecisionRecord];

    /// Clear the in-memory sequence and remove the durable mirror.
    ///
    /// # Errors
    ///
    /// Returns [`SmartEnergyError::Persistence`] if the durable mirror could
    /// not be removed; the in-memory sequence is then left untouched.
    fn reset(&mut self) -> Result<(), SmartEnergyError>;

    /// Raw contents of the durable mirror, for download.
    ///
    /// `None` when nothing has been written yet, or when the log has no
    /// durable mirror at all.
    ///
    /// # Errors
    ///
    /// Returns [`SmartEnergyError::Persistence`] if the mirror exists but
    /// could not be read.
    fn export(&self) -> Result<Option<Vec<u8>>, SmartEnergyError> {
        Ok(None)
    }
}
