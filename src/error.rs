use chrono::NaiveDate;

use crate::crud::dialog::{DialogAction, DialogState};
use crate::records::RecordId;

/// Errors returned by record stores and record validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    /// A required text field is empty or a formatted field is malformed.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// A numeric field is outside its allowed range.
    #[error("{field} out of range: {value}")]
    Range { field: &'static str, value: String },

    /// No record with the given id exists in the store.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: RecordId },

    /// A record with this id is already stored.
    #[error("{kind} already exists: {id}")]
    DuplicateId { kind: &'static str, id: RecordId },
}

impl RecordError {
    pub fn required(field: &'static str) -> Self {
        RecordError::Validation {
            field,
            reason: "must not be empty".to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RecordError::NotFound { .. })
    }

    /// Errors the user can fix by editing the draft.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            RecordError::Validation { .. } | RecordError::Range { .. }
        )
    }
}

/// Errors returned while driving a dialog flow.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FlowError {
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        state: DialogState,
        action: DialogAction,
    },

    #[error("no create or edit form is open")]
    NoOpenForm,

    #[error(transparent)]
    Record(#[from] RecordError),
}

impl FlowError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FlowError::Record(e) if e.is_not_found())
    }
}

/// Errors from assembling or running an export.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExportError {
    #[error("unknown export option: {0}")]
    UnknownOption(String),

    #[error("unknown export format: {0}")]
    UnknownFormat(String),

    #[error("format {format} is not offered for {option}")]
    UnsupportedFormat { option: String, format: String },

    #[error("field {field} is not part of {option}")]
    UnknownField { option: String, field: String },

    #[error("export range starts {from} after it ends {to}")]
    InvertedRange { from: NaiveDate, to: NaiveDate },

    #[error("export is not ready: {0}")]
    NotReady(&'static str),

    #[error("export was cancelled")]
    Cancelled,
}

/// Errors from the global filter bar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// A select value that is not one of the offered options.
    #[error("unknown {kind} '{value}'")]
    UnknownValue { kind: &'static str, value: String },

    #[error("custom range starts {from} after it ends {to}")]
    InvertedRange { from: NaiveDate, to: NaiveDate },
}

impl FilterError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        FilterError::UnknownValue {
            kind,
            value: value.to_string(),
        }
    }
}
