pub mod job;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ExportError;

pub use job::{ExportJob, ExportReceipt, ExportSettings, ExportStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportFormat {
    #[serde(rename = "CSV")]
    Csv,
    Excel,
    #[serde(rename = "PDF")]
    Pdf,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Excel => "Excel",
            ExportFormat::Pdf => "PDF",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [ExportFormat::Csv, ExportFormat::Excel, ExportFormat::Pdf]
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ExportError::UnknownFormat(s.to_string()))
    }
}

/// A data set the export dialog offers.
#[derive(Debug, PartialEq, Eq)]
pub struct ExportOption {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub formats: &'static [ExportFormat],
    pub estimated_size: &'static str,
    pub fields: &'static [&'static str],
}

const ALL_FORMATS: &[ExportFormat] = &[ExportFormat::Csv, ExportFormat::Excel, ExportFormat::Pdf];

pub static EXPORT_OPTIONS: &[ExportOption] = &[
    ExportOption {
        id: "customers",
        name: "Customer Data",
        description: "Complete customer records, contact info, and interaction history",
        formats: ALL_FORMATS,
        estimated_size: "2.4 MB",
        fields: &[
            "Customer ID",
            "Company Name",
            "Contact Person",
            "Email",
            "Phone",
            "Address",
            "Registration Date",
            "Last Activity",
            "Total Revenue",
            "Status",
        ],
    },
    ExportOption {
        id: "sales",
        name: "Sales Reports",
        description: "Deal pipeline, revenue data, and sales performance metrics",
        formats: ALL_FORMATS,
        estimated_size: "1.8 MB",
        fields: &[
            "Deal ID",
            "Customer",
            "Sales Rep",
            "Deal Value",
            "Stage",
            "Probability",
            "Created Date",
            "Expected Close",
            "Actual Close",
            "Source",
        ],
    },
    ExportOption {
        id: "marketing",
        name: "Marketing Analytics",
        description: "Campaign performance, lead sources, and conversion data",
        formats: ALL_FORMATS,
        estimated_size: "3.1 MB",
        fields: &[
            "Campaign ID",
            "Campaign Name",
            "Channel",
            "Start Date",
            "End Date",
            "Budget",
            "Spend",
            "Impressions",
            "Clicks",
            "Conversions",
            "ROI",
        ],
    },
    ExportOption {
        id: "support",
        name: "Support Tickets",
        description: "Customer support history, ticket resolution, and satisfaction",
        formats: ALL_FORMATS,
        estimated_size: "956 KB",
        fields: &[
            "Ticket ID",
            "Customer",
            "Subject",
            "Category",
            "Priority",
            "Status",
            "Assignee",
            "Created",
            "Resolved",
            "Satisfaction",
        ],
    },
];

pub fn find_option(id: &str) -> Option<&'static ExportOption> {
    EXPORT_OPTIONS.iter().find(|o| o.id == id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportFlags {
    pub include_archived: bool,
    pub include_deleted: bool,
    pub apply_filters: bool,
}

impl Default for ExportFlags {
    fn default() -> Self {
        Self {
            include_archived: false,
            include_deleted: false,
            apply_filters: true,
        }
    }
}

/// Selections made in the export dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    option: Option<&'static ExportOption>,
    format: Option<ExportFormat>,
    fields: Vec<&'static str>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub flags: ExportFlags,
}

impl ExportRequest {
    /// Fresh dialog state; the date range covers the next 30 days.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            option: None,
            format: None,
            fields: Vec::new(),
            date_from: Some(today),
            date_to: today.checked_add_days(Days::new(30)),
            flags: ExportFlags::default(),
        }
    }

    pub fn option(&self) -> Option<&'static ExportOption> {
        self.option
    }

    pub fn format(&self) -> Option<ExportFormat> {
        self.format
    }

    pub fn fields(&self) -> &[&'static str] {
        &self.fields
    }

    fn require_option(&self) -> Result<&'static ExportOption, ExportError> {
        self.option
            .ok_or(ExportError::NotReady("no data set selected"))
    }

    /// Choosing a different data set resets the format and field picks.
    pub fn select_option(&mut self, id: &str) -> Result<(), ExportError> {
        let option = find_option(id).ok_or_else(|| ExportError::UnknownOption(id.to_string()))?;
        self.option = Some(option);
        self.format = None;
        self.fields.clear();
        Ok(())
    }

    pub fn select_format(&mut self, format: ExportFormat) -> Result<(), ExportError> {
        let option = self.require_option()?;
        if !option.formats.contains(&format) {
            return Err(ExportError::UnsupportedFormat {
                option: option.id.to_string(),
                format: format.to_string(),
            });
        }
        self.format = Some(format);
        Ok(())
    }

    pub fn toggle_field(&mut self, field: &str) -> Result<(), ExportError> {
        let option = self.require_option()?;
        let known = *option
            .fields
            .iter()
            .find(|f| **f == field)
            .ok_or_else(|| ExportError::UnknownField {
                option: option.id.to_string(),
                field: field.to_string(),
            })?;

        if let Some(pos) = self.fields.iter().position(|f| *f == known) {
            self.fields.remove(pos);
        } else {
            self.fields.push(known);
        }
        Ok(())
    }

    pub fn select_all_fields(&mut self) {
        if let Some(option) = self.option {
            self.fields = option.fields.to_vec();
        }
    }

    pub fn clear_fields(&mut self) {
        self.fields.clear();
    }

    /// Either bound may be open. An inverted range leaves the request as is.
    pub fn set_date_range(
        &mut self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<(), ExportError> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(ExportError::InvertedRange { from, to });
            }
        }
        self.date_from = from;
        self.date_to = to;
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.option.is_some() && self.format.is_some() && !self.fields.is_empty()
    }

    /// Back to the initial dialog state, keeping `today`'s default range.
    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }
}
