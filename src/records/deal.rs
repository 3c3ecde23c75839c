use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{merge_field, require_non_negative, require_text, Draft, Record, RecordId};
use crate::error::RecordError;

pub const MAX_PROBABILITY: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealStage {
    Prospecting,
    Qualification,
    Proposal,
    Negotiation,
    #[serde(rename = "Closed Won")]
    ClosedWon,
    #[serde(rename = "Closed Lost")]
    ClosedLost,
}

impl DealStage {
    pub const ALL: [DealStage; 6] = [
        DealStage::Prospecting,
        DealStage::Qualification,
        DealStage::Proposal,
        DealStage::Negotiation,
        DealStage::ClosedWon,
        DealStage::ClosedLost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DealStage::Prospecting => "Prospecting",
            DealStage::Qualification => "Qualification",
            DealStage::Proposal => "Proposal",
            DealStage::Negotiation => "Negotiation",
            DealStage::ClosedWon => "Closed Won",
            DealStage::ClosedLost => "Closed Lost",
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, DealStage::ClosedWon | DealStage::ClosedLost)
    }
}

impl fmt::Display for DealStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DealStage {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| RecordError::Validation {
                field: "stage",
                reason: format!("unknown stage '{}'", s),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: RecordId,
    pub title: String,
    pub company: String,
    pub value: Decimal,
    pub stage: DealStage,
    pub probability: u8,
    pub assignee: String,
    pub source: String,
    pub expected_close_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_close_date: Option<NaiveDate>,
    pub created_date: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub description: String,
    pub next_action: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DealDraft {
    pub title: Option<String>,
    pub company: Option<String>,
    pub value: Option<Decimal>,
    pub stage: Option<DealStage>,
    pub probability: Option<u8>,
    pub assignee: Option<String>,
    pub source: Option<String>,
    pub expected_close_date: Option<NaiveDate>,
    /// `Some(None)` clears the actual close date.
    pub actual_close_date: Option<Option<NaiveDate>>,
    pub description: Option<String>,
    pub next_action: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DealField {
    Title(String),
    Company(String),
    Value(Decimal),
    Stage(DealStage),
    Probability(u8),
    Assignee(String),
    Source(String),
    ExpectedCloseDate(NaiveDate),
    ActualCloseDate(Option<NaiveDate>),
    Description(String),
    NextAction(String),
}

impl Draft for DealDraft {
    type Field = DealField;

    fn set(&mut self, field: DealField) {
        match field {
            DealField::Title(v) => self.title = Some(v),
            DealField::Company(v) => self.company = Some(v),
            DealField::Value(v) => self.value = Some(v),
            DealField::Stage(v) => self.stage = Some(v),
            DealField::Probability(v) => self.probability = Some(v),
            DealField::Assignee(v) => self.assignee = Some(v),
            DealField::Source(v) => self.source = Some(v),
            DealField::ExpectedCloseDate(v) => self.expected_close_date = Some(v),
            DealField::ActualCloseDate(v) => self.actual_close_date = Some(v),
            DealField::Description(v) => self.description = Some(v),
            DealField::NextAction(v) => self.next_action = Some(v),
        }
    }
}

impl Record for Deal {
    type Draft = DealDraft;

    const KIND: &'static str = "deal";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.company, &self.assignee]
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn blank_draft(today: NaiveDate) -> DealDraft {
        DealDraft {
            title: Some(String::new()),
            company: Some(String::new()),
            value: Some(Decimal::ZERO),
            stage: Some(DealStage::Prospecting),
            probability: Some(25),
            assignee: Some(String::new()),
            source: Some(String::new()),
            expected_close_date: Some(today),
            actual_close_date: None,
            description: Some(String::new()),
            next_action: Some(String::new()),
        }
    }

    fn to_draft(&self) -> DealDraft {
        DealDraft {
            title: Some(self.title.clone()),
            company: Some(self.company.clone()),
            value: Some(self.value),
            stage: Some(self.stage),
            probability: Some(self.probability),
            assignee: Some(self.assignee.clone()),
            source: Some(self.source.clone()),
            expected_close_date: Some(self.expected_close_date),
            actual_close_date: Some(self.actual_close_date),
            description: Some(self.description.clone()),
            next_action: Some(self.next_action.clone()),
        }
    }

    fn create(id: RecordId, draft: DealDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title.unwrap_or_default(),
            company: draft.company.unwrap_or_default(),
            value: draft.value.unwrap_or_default(),
            stage: draft.stage.unwrap_or(DealStage::Prospecting),
            probability: draft.probability.unwrap_or(25),
            assignee: draft.assignee.unwrap_or_default(),
            source: draft.source.unwrap_or_default(),
            expected_close_date: draft.expected_close_date.unwrap_or(now.date_naive()),
            actual_close_date: draft.actual_close_date.flatten(),
            created_date: now,
            last_activity: now,
            description: draft.description.unwrap_or_default(),
            next_action: draft.next_action.unwrap_or_default(),
        }
    }

    fn merge(&mut self, draft: &DealDraft, now: DateTime<Utc>) {
        merge_field(&mut self.title, &draft.title);
        merge_field(&mut self.company, &draft.company);
        merge_field(&mut self.value, &draft.value);
        merge_field(&mut self.stage, &draft.stage);
        merge_field(&mut self.probability, &draft.probability);
        merge_field(&mut self.assignee, &draft.assignee);
        merge_field(&mut self.source, &draft.source);
        merge_field(&mut self.expected_close_date, &draft.expected_close_date);
        merge_field(&mut self.actual_close_date, &draft.actual_close_date);
        merge_field(&mut self.description, &draft.description);
        merge_field(&mut self.next_action, &draft.next_action);
        self.last_activity = now;
    }

    fn validate(&self) -> Result<(), RecordError> {
        require_text("title", &self.title)?;
        require_text("company", &self.company)?;
        require_non_negative("value", self.value)?;
        if self.probability > MAX_PROBABILITY {
            return Err(RecordError::Range {
                field: "probability",
                value: self.probability.to_string(),
            });
        }
        Ok(())
    }
}

/// Distinct assignees in first-seen order, for the assignee select.
pub fn unique_assignees<'a>(deals: impl IntoIterator<Item = &'a Deal>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for deal in deals {
        if !seen.iter().any(|a| a == &deal.assignee) {
            seen.push(deal.assignee.clone());
        }
    }
    seen
}
