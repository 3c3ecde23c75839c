use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{merge_field, require_non_negative, require_text, Draft, Record, RecordId};
use crate::error::RecordError;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerStatus {
    Active,
    Inactive,
    Prospect,
    Churned,
}

impl CustomerStatus {
    pub const ALL: [CustomerStatus; 4] = [
        CustomerStatus::Active,
        CustomerStatus::Inactive,
        CustomerStatus::Prospect,
        CustomerStatus::Churned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Active => "Active",
            CustomerStatus::Inactive => "Inactive",
            CustomerStatus::Prospect => "Prospect",
            CustomerStatus::Churned => "Churned",
        }
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomerStatus {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| RecordError::Validation {
                field: "status",
                reason: format!("unknown status '{}'", s),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    Enterprise,
    #[serde(rename = "SME")]
    Sme,
    Individual,
}

impl Segment {
    pub const ALL: [Segment; 3] = [Segment::Enterprise, Segment::Sme, Segment::Individual];

    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Enterprise => "Enterprise",
            Segment::Sme => "SME",
            Segment::Individual => "Individual",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Segment {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|segment| segment.as_str() == s)
            .ok_or_else(|| RecordError::Validation {
                field: "segment",
                reason: format!("unknown segment '{}'", s),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: RecordId,
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub registration_date: NaiveDate,
    pub last_activity: NaiveDate,
    pub total_revenue: Decimal,
    pub status: CustomerStatus,
    pub segment: Segment,
    pub notes: String,
}

impl Customer {
    /// Two-letter avatar initials from the company name.
    pub fn initials(&self) -> String {
        self.company_name
            .chars()
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerDraft {
    pub company_name: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub total_revenue: Option<Decimal>,
    pub status: Option<CustomerStatus>,
    pub segment: Option<Segment>,
    pub notes: Option<String>,
}

/// One editable customer field with its new value.
#[derive(Debug, Clone, PartialEq)]
pub enum CustomerField {
    CompanyName(String),
    ContactPerson(String),
    Email(String),
    Phone(String),
    Address(String),
    TotalRevenue(Decimal),
    Status(CustomerStatus),
    Segment(Segment),
    Notes(String),
}

impl Draft for CustomerDraft {
    type Field = CustomerField;

    fn set(&mut self, field: CustomerField) {
        match field {
            CustomerField::CompanyName(v) => self.company_name = Some(v),
            CustomerField::ContactPerson(v) => self.contact_person = Some(v),
            CustomerField::Email(v) => self.email = Some(v),
            CustomerField::Phone(v) => self.phone = Some(v),
            CustomerField::Address(v) => self.address = Some(v),
            CustomerField::TotalRevenue(v) => self.total_revenue = Some(v),
            CustomerField::Status(v) => self.status = Some(v),
            CustomerField::Segment(v) => self.segment = Some(v),
            CustomerField::Notes(v) => self.notes = Some(v),
        }
    }
}

impl Record for Customer {
    type Draft = CustomerDraft;

    const KIND: &'static str = "customer";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.company_name, &self.contact_person, &self.email]
    }

    fn display_name(&self) -> &str {
        &self.company_name
    }

    fn blank_draft(_today: NaiveDate) -> CustomerDraft {
        CustomerDraft {
            company_name: Some(String::new()),
            contact_person: Some(String::new()),
            email: Some(String::new()),
            phone: Some(String::new()),
            address: Some(String::new()),
            total_revenue: None,
            status: Some(CustomerStatus::Prospect),
            segment: Some(Segment::Sme),
            notes: Some(String::new()),
        }
    }

    fn to_draft(&self) -> CustomerDraft {
        CustomerDraft {
            company_name: Some(self.company_name.clone()),
            contact_person: Some(self.contact_person.clone()),
            email: Some(self.email.clone()),
            phone: Some(self.phone.clone()),
            address: Some(self.address.clone()),
            total_revenue: Some(self.total_revenue),
            status: Some(self.status),
            segment: Some(self.segment),
            notes: Some(self.notes.clone()),
        }
    }

    fn create(id: RecordId, draft: CustomerDraft, now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        Self {
            id,
            company_name: draft.company_name.unwrap_or_default(),
            contact_person: draft.contact_person.unwrap_or_default(),
            email: draft.email.unwrap_or_default(),
            phone: draft.phone.unwrap_or_default(),
            address: draft.address.unwrap_or_default(),
            registration_date: today,
            last_activity: today,
            total_revenue: Decimal::ZERO,
            status: draft.status.unwrap_or(CustomerStatus::Prospect),
            segment: draft.segment.unwrap_or(Segment::Sme),
            notes: draft.notes.unwrap_or_default(),
        }
    }

    fn merge(&mut self, draft: &CustomerDraft, now: DateTime<Utc>) {
        merge_field(&mut self.company_name, &draft.company_name);
        merge_field(&mut self.contact_person, &draft.contact_person);
        merge_field(&mut self.email, &draft.email);
        merge_field(&mut self.phone, &draft.phone);
        merge_field(&mut self.address, &draft.address);
        merge_field(&mut self.notes, &draft.notes);
        merge_field(&mut self.total_revenue, &draft.total_revenue);
        merge_field(&mut self.status, &draft.status);
        merge_field(&mut self.segment, &draft.segment);
        self.last_activity = now.date_naive();
    }

    fn validate(&self) -> Result<(), RecordError> {
        require_text("companyName", &self.company_name)?;
        require_text("contactPerson", &self.contact_person)?;
        require_text("email", &self.email)?;
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(RecordError::Validation {
                field: "email",
                reason: format!("'{}' is not an email address", self.email),
            });
        }
        require_non_negative("totalRevenue", self.total_revenue)
    }
}
