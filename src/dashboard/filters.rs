use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::crud::FieldFilter;
use crate::error::FilterError;
use crate::records::Deal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateRangePreset {
    #[serde(rename = "7d")]
    Last7Days,
    #[default]
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "90d")]
    Last90Days,
    #[serde(rename = "6m")]
    Last6Months,
    #[serde(rename = "1y")]
    LastYear,
    #[serde(rename = "all")]
    AllTime,
}

impl DateRangePreset {
    pub const ALL: [DateRangePreset; 6] = [
        DateRangePreset::Last7Days,
        DateRangePreset::Last30Days,
        DateRangePreset::Last90Days,
        DateRangePreset::Last6Months,
        DateRangePreset::LastYear,
        DateRangePreset::AllTime,
    ];

    pub fn value(&self) -> &'static str {
        match self {
            DateRangePreset::Last7Days => "7d",
            DateRangePreset::Last30Days => "30d",
            DateRangePreset::Last90Days => "90d",
            DateRangePreset::Last6Months => "6m",
            DateRangePreset::LastYear => "1y",
            DateRangePreset::AllTime => "all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DateRangePreset::Last7Days => "Last 7 days",
            DateRangePreset::Last30Days => "Last 30 days",
            DateRangePreset::Last90Days => "Last 90 days",
            DateRangePreset::Last6Months => "Last 6 months",
            DateRangePreset::LastYear => "Last year",
            DateRangePreset::AllTime => "All time",
        }
    }

    /// First day covered when the window ends on `today`.
    pub fn start(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            DateRangePreset::Last7Days => today.checked_sub_days(chrono::Days::new(7)),
            DateRangePreset::Last30Days => today.checked_sub_days(chrono::Days::new(30)),
            DateRangePreset::Last90Days => today.checked_sub_days(chrono::Days::new(90)),
            DateRangePreset::Last6Months => today.checked_sub_months(Months::new(6)),
            DateRangePreset::LastYear => today.checked_sub_months(Months::new(12)),
            DateRangePreset::AllTime => None,
        }
    }
}

impl FromStr for DateRangePreset {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.value() == s)
            .ok_or_else(|| FilterError::unknown("date range", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "na")]
    NorthAmerica,
    #[serde(rename = "eu")]
    Europe,
    #[serde(rename = "apac")]
    AsiaPacific,
    #[serde(rename = "latam")]
    LatinAmerica,
    #[serde(rename = "mea")]
    MiddleEastAfrica,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::NorthAmerica,
        Region::Europe,
        Region::AsiaPacific,
        Region::LatinAmerica,
        Region::MiddleEastAfrica,
    ];

    pub fn value(&self) -> &'static str {
        match self {
            Region::NorthAmerica => "na",
            Region::Europe => "eu",
            Region::AsiaPacific => "apac",
            Region::LatinAmerica => "latam",
            Region::MiddleEastAfrica => "mea",
        }
    }
}

impl FromStr for Region {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.value() == s)
            .ok_or_else(|| FilterError::unknown("region", s))
    }
}

/// Market segments offered by the global filter bar. Distinct from the
/// customer record's own segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketSegment {
    #[serde(rename = "enterprise")]
    Enterprise,
    #[serde(rename = "mid-market")]
    MidMarket,
    #[serde(rename = "smb")]
    Smb,
    #[serde(rename = "startup")]
    Startup,
}

impl MarketSegment {
    pub const ALL: [MarketSegment; 4] = [
        MarketSegment::Enterprise,
        MarketSegment::MidMarket,
        MarketSegment::Smb,
        MarketSegment::Startup,
    ];

    pub fn value(&self) -> &'static str {
        match self {
            MarketSegment::Enterprise => "enterprise",
            MarketSegment::MidMarket => "mid-market",
            MarketSegment::Smb => "smb",
            MarketSegment::Startup => "startup",
        }
    }
}

impl FromStr for MarketSegment {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.value() == s)
            .ok_or_else(|| FilterError::unknown("segment", s))
    }
}

/// The filter bar shared by every dashboard page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalFilters {
    pub date_range: DateRangePreset,
    pub custom_from: Option<NaiveDate>,
    pub custom_to: Option<NaiveDate>,
    pub region: FieldFilter<Region>,
    pub sales_rep: FieldFilter<String>,
    pub segments: Vec<MarketSegment>,
}

impl GlobalFilters {
    pub fn with_date_range(date_range: DateRangePreset) -> Self {
        Self {
            date_range,
            ..Default::default()
        }
    }

    /// `"all"` clears the selection; any other segment flips membership.
    pub fn toggle_segment(&mut self, value: &str) -> Result<(), FilterError> {
        if value == crate::crud::filter::ALL {
            self.segments.clear();
            return Ok(());
        }
        let segment: MarketSegment = value.parse()?;
        if let Some(pos) = self.segments.iter().position(|s| *s == segment) {
            self.segments.remove(pos);
        } else {
            self.segments.push(segment);
        }
        Ok(())
    }

    /// An inverted range is rejected and the previous range kept.
    pub fn set_custom_range(
        &mut self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<(), FilterError> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(FilterError::InvertedRange { from, to });
            }
        }
        self.custom_from = from;
        self.custom_to = to;
        Ok(())
    }

    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    pub fn has_active_filters(&self) -> bool {
        self.date_range != DateRangePreset::default()
            || !self.region.is_all()
            || !self.sales_rep.is_all()
            || !self.segments.is_empty()
            || self.custom_from.is_some()
            || self.custom_to.is_some()
    }

    /// Inclusive window the filters select. A custom bound overrides the
    /// preset on its side.
    pub fn date_window(&self, today: NaiveDate) -> (Option<NaiveDate>, Option<NaiveDate>) {
        let from = self.custom_from.or_else(|| self.date_range.start(today));
        let to = match (self.custom_to, self.custom_from) {
            (Some(to), _) => Some(to),
            (None, Some(_)) => None,
            (None, None) if self.date_range == DateRangePreset::AllTime => None,
            (None, None) => Some(today),
        };
        (from, to)
    }

    pub fn admits_deal(&self, deal: &Deal, today: NaiveDate) -> bool {
        let created = deal.created_date.date_naive();
        let (from, to) = self.date_window(today);
        from.map_or(true, |f| created >= f) && to.map_or(true, |t| created <= t)
    }
}
