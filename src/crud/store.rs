use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::error::RecordError;
use crate::records::{Record, RecordId};

/// Ordered in-memory collection of one record type.
///
/// Every operation that fails leaves the collection untouched: ids and
/// validation are checked before anything is written.
#[derive(Debug, Clone)]
pub struct RecordStore<R: Record> {
    records: Vec<R>,
}

impl<R: Record> Default for RecordStore<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: Record> RecordStore<R> {
    /// Seed the store with injected initial records, kept in the given order.
    ///
    /// Seeds go through the same checks as `add`: every record must validate
    /// and ids must be unique.
    pub fn new(initial: Vec<R>) -> Result<Self, RecordError> {
        {
            let mut seen = HashSet::with_capacity(initial.len());
            for record in &initial {
                if !seen.insert(record.id()) {
                    return Err(RecordError::DuplicateId {
                        kind: R::KIND,
                        id: record.id().clone(),
                    });
                }
                record.validate()?;
            }
        }
        log::debug!("Seeded {} store with {} records", R::KIND, initial.len());
        Ok(Self { records: initial })
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.get(id).is_some()
    }

    fn position(&self, id: &RecordId) -> Result<usize, RecordError> {
        self.records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| RecordError::NotFound {
                kind: R::KIND,
                id: id.clone(),
            })
    }

    /// Append a fully populated record.
    pub fn add(&mut self, record: R) -> Result<&R, RecordError> {
        if self.contains(record.id()) {
            return Err(RecordError::DuplicateId {
                kind: R::KIND,
                id: record.id().clone(),
            });
        }
        record.validate()?;

        log::debug!("Adding {} {}", R::KIND, record.id());
        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }

    /// Merge the set fields of `draft` into the record with `id`.
    pub fn update(
        &mut self,
        id: &RecordId,
        draft: &R::Draft,
        now: DateTime<Utc>,
    ) -> Result<&R, RecordError> {
        let idx = self.position(id)?;

        let mut merged = self.records[idx].clone();
        merged.merge(draft, now);
        merged.validate()?;

        log::debug!("Updating {} {}", R::KIND, id);
        self.records[idx] = merged;
        Ok(&self.records[idx])
    }

    /// Remove and return the record with `id`.
    pub fn remove(&mut self, id: &RecordId) -> Result<R, RecordError> {
        let idx = self.position(id)?;
        log::debug!("Removing {} {}", R::KIND, id);
        Ok(self.records.remove(idx))
    }

}
