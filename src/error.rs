// ⚠️ Classification Errors
// Every failure aborts the whole batch: no partial output is ever produced

use thiserror::Error;

/// ClassifyError - Why a batch could not be renamed
///
/// Line numbers are 1-based positions in the input text, so they match what
/// a person sees when opening the batch in an editor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// Record is missing a field, is empty, or has a filename without extension
    #[error("malformed record on line {line} ({reason}): {record:?}")]
    Structural {
        line: usize,
        record: String,
        reason: String,
    },

    /// Timestamp text does not match `yyyy-MM-dd HH:mm:ss`
    #[error("invalid timestamp on line {line}: {value:?} (expected yyyy-MM-dd HH:mm:ss)")]
    Timestamp { line: usize, value: String },

    /// An entry reached the emitter without an id
    #[error("entry with arrival sequence {sequence} has no assigned id")]
    MissingId { sequence: usize },
}

impl ClassifyError {
    pub(crate) fn structural(line: usize, record: &str, reason: &str) -> Self {
        ClassifyError::Structural {
            line,
            record: record.to_string(),
            reason: reason.to_string(),
        }
    }

    /// 1-based input line that caused the error, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            ClassifyError::Structural { line, .. } | ClassifyError::Timestamp { line, .. } => {
                Some(*line)
            }
            ClassifyError::MissingId { .. } => None,
        }
    }
}
