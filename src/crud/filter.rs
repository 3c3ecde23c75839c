use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::records::{Customer, CustomerStatus, Deal, DealStage, Record, Segment};

/// Select value meaning "no constraint".
pub const ALL: &str = "all";

/// An exact-match constraint on one field, or none at all.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FieldFilter<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> FieldFilter<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            FieldFilter::All => true,
            FieldFilter::Only(expected) => expected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, FieldFilter::All)
    }
}

impl<T: FromStr> FromStr for FieldFilter<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL {
            return Ok(FieldFilter::All);
        }
        s.parse().map(FieldFilter::Only)
    }
}

impl<T: fmt::Display> fmt::Display for FieldFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldFilter::All => f.write_str(ALL),
            FieldFilter::Only(v) => v.fmt(f),
        }
    }
}

pub type Predicate<R> = Box<dyn Fn(&R) -> bool>;

/// Composes a search predicate and exact-match predicates into one.
pub struct PredicateBuilder<R> {
    parts: Vec<Predicate<R>>,
}

impl<R: Record + 'static> Default for PredicateBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record + 'static> PredicateBuilder<R> {
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Case-insensitive substring match against the record's search fields.
    /// An empty term matches everything.
    pub fn search(mut self, term: &str) -> Self {
        let needle = term.to_lowercase();
        if !needle.is_empty() {
            self.parts.push(Box::new(move |record: &R| {
                record
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }));
        }
        self
    }

    /// Exact match of `accessor(record)` against `filter`.
    pub fn exact<T, F>(mut self, filter: FieldFilter<T>, accessor: F) -> Self
    where
        T: PartialEq + 'static,
        F: Fn(&R) -> T + 'static,
    {
        if let FieldFilter::Only(expected) = filter {
            self.parts
                .push(Box::new(move |record: &R| accessor(record) == expected));
        }
        self
    }

    pub fn build(self) -> Predicate<R> {
        let parts = self.parts;
        Box::new(move |record: &R| parts.iter().all(|p| p(record)))
    }
}

/// Keep the records that pass `predicate`, in their original order.
pub fn apply<'a, R>(records: &'a [R], predicate: &Predicate<R>) -> Vec<&'a R> {
    records.iter().filter(|r| predicate(*r)).collect()
}

/// Per-entity field filters shown next to the search box.
pub trait Criteria<R: Record>: Clone + Default + fmt::Debug {
    fn narrow(&self, builder: PredicateBuilder<R>) -> PredicateBuilder<R>;

    fn is_unconstrained(&self) -> bool;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerCriteria {
    pub status: FieldFilter<CustomerStatus>,
    pub segment: FieldFilter<Segment>,
}

impl Criteria<Customer> for CustomerCriteria {
    fn narrow(&self, builder: PredicateBuilder<Customer>) -> PredicateBuilder<Customer> {
        builder
            .exact(self.status.clone(), |c: &Customer| c.status)
            .exact(self.segment.clone(), |c: &Customer| c.segment)
    }

    fn is_unconstrained(&self) -> bool {
        self.status.is_all() && self.segment.is_all()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealCriteria {
    pub stage: FieldFilter<DealStage>,
    pub assignee: FieldFilter<String>,
}

impl Criteria<Deal> for DealCriteria {
    fn narrow(&self, builder: PredicateBuilder<Deal>) -> PredicateBuilder<Deal> {
        builder
            .exact(self.stage.clone(), |d: &Deal| d.stage)
            .exact(self.assignee.clone(), |d: &Deal| d.assignee.clone())
    }

    fn is_unconstrained(&self) -> bool {
        self.stage.is_all() && self.assignee.is_all()
    }
}

/// Search term plus field filters for one record list.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter<C> {
    pub search: String,
    pub criteria: C,
}

impl<C> RecordFilter<C> {
    pub fn new(search: impl Into<String>, criteria: C) -> Self {
        Self {
            search: search.into(),
            criteria,
        }
    }

    pub fn predicate<R>(&self) -> Predicate<R>
    where
        R: Record + 'static,
        C: Criteria<R>,
    {
        self.criteria
            .narrow(PredicateBuilder::new().search(&self.search))
            .build()
    }

    /// True when the search term or any field filter narrows the list.
    pub fn is_active<R>(&self) -> bool
    where
        R: Record + 'static,
        C: Criteria<R>,
    {
        !self.search.is_empty() || !self.criteria.is_unconstrained()
    }

    pub fn apply<'a, R>(&self, records: &'a [R]) -> Vec<&'a R>
    where
        R: Record + 'static,
        C: Criteria<R>,
    {
        if !self.is_active::<R>() {
            return records.iter().collect();
        }
        apply(records, &self.predicate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn all_sentinel_parses_to_no_constraint() {
        let f: FieldFilter<CustomerStatus> = "all".parse().unwrap();
        assert!(f.is_all());
        let f: FieldFilter<CustomerStatus> = "Prospect".parse().unwrap();
        assert_eq!(f, FieldFilter::Only(CustomerStatus::Prospect));
        assert!("prospect".parse::<FieldFilter<CustomerStatus>>().is_err());
        assert_eq!(FieldFilter::<DealStage>::All.to_string(), "all");
    }

    #[test]
    fn empty_search_and_all_filters_keep_everything_in_order() {
        let customers = fixtures::customers();
        let filter = RecordFilter::<CustomerCriteria>::default();
        let visible = filter.apply(&customers);
        let ids: Vec<_> = visible.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let customers = fixtures::customers();
        let by_contact = RecordFilter::new("MIKE", CustomerCriteria::default());
        assert_eq!(by_contact.apply(&customers).len(), 1);

        let by_email = RecordFilter::new("@digitalsolutions", CustomerCriteria::default());
        assert_eq!(by_email.apply(&customers)[0].company_name, "Digital Solutions Inc");
    }

    #[test]
    fn search_does_not_look_at_notes() {
        let customers = fixtures::customers();
        let filter = RecordFilter::new("payment history", CustomerCriteria::default());
        assert!(filter.apply(&customers).is_empty());
    }

    #[test]
    fn field_filters_combine_with_search() {
        let customers = fixtures::customers();
        let filter = RecordFilter::new(
            "",
            CustomerCriteria {
                status: FieldFilter::Only(CustomerStatus::Active),
                segment: FieldFilter::Only(Segment::Enterprise),
            },
        );
        let names: Vec<_> = filter
            .apply(&customers)
            .iter()
            .map(|c| c.company_name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["TechCorp Industries", "Innovation Partners", "NextGen Systems"]
        );
    }

    #[test]
    fn deal_assignee_filter_is_exact() {
        let deals = fixtures::deals();
        let filter = RecordFilter::new(
            "",
            DealCriteria {
                stage: FieldFilter::All,
                assignee: FieldFilter::Only("Sarah Chen".to_string()),
            },
        );
        let matched = filter.apply(&deals);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].title, "Enterprise CRM License");

        let partial = RecordFilter::new(
            "",
            DealCriteria {
                assignee: FieldFilter::Only("Sarah".to_string()),
                ..Default::default()
            },
        );
        assert!(partial.apply(&deals).is_empty());
    }

    #[test]
    fn builder_without_parts_accepts_everything() {
        let predicate = PredicateBuilder::<Deal>::new().build();
        let deals = fixtures::deals();
        assert_eq!(apply(&deals, &predicate).len(), deals.len());
    }

    #[test]
    fn activity_tracks_search_and_criteria() {
        let mut filter = RecordFilter::<DealCriteria>::default();
        assert!(!filter.is_active::<Deal>());

        filter.criteria.stage = FieldFilter::Only(DealStage::Proposal);
        assert!(filter.is_active::<Deal>());
        assert!(!filter.criteria.is_unconstrained());

        filter.criteria = DealCriteria::default();
        filter.search = "cloud".to_string();
        assert!(filter.is_active::<Deal>());
        assert!(CustomerCriteria::default().is_unconstrained());
    }
}
