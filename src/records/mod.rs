pub mod customer;
pub mod deal;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RecordError;

pub use customer::{Customer, CustomerDraft, CustomerField, CustomerStatus, Segment};
pub use deal::{unique_assignees, Deal, DealDraft, DealField, DealStage};

/// Opaque record identifier. Assigned once at creation and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Source of "now" for creation and last-activity timestamps.
pub type Clock = fn() -> DateTime<Utc>;

pub fn system_clock() -> DateTime<Utc> {
    Utc::now()
}

/// A partial copy of a record's editable fields.
///
/// Unset fields (`None`) are left untouched when the draft is merged into an
/// existing record.
pub trait Draft: Clone + Default + fmt::Debug {
    type Field: Clone + fmt::Debug;

    /// Replace one field, keeping all others.
    fn set(&mut self, field: Self::Field);
}

/// An entity kept in a [`crate::crud::RecordStore`].
pub trait Record: Clone + fmt::Debug {
    type Draft: Draft;

    /// Human-readable entity name used in errors and notices.
    const KIND: &'static str;

    fn id(&self) -> &RecordId;

    /// Fields the free-text search looks at.
    fn search_fields(&self) -> Vec<&str>;

    /// Name shown in notices ("X has been updated successfully").
    fn display_name(&self) -> &str;

    /// Draft used when the create dialog opens.
    fn blank_draft(today: NaiveDate) -> Self::Draft;

    /// Structural copy of the editable fields.
    fn to_draft(&self) -> Self::Draft;

    /// Build a new record from a committed draft.
    fn create(id: RecordId, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Merge the set fields of `draft` and refresh last activity.
    fn merge(&mut self, draft: &Self::Draft, now: DateTime<Utc>);

    fn validate(&self) -> Result<(), RecordError>;
}

/// Overwrite `target` when the draft carries a value for it.
pub(crate) fn merge_field<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        target.clone_from(v);
    }
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), RecordError> {
    if value.trim().is_empty() {
        return Err(RecordError::required(field));
    }
    Ok(())
}

pub(crate) fn require_non_negative(
    field: &'static str,
    value: rust_decimal::Decimal,
) -> Result<(), RecordError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(RecordError::Range {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
