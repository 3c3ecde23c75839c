pub mod badge;
pub mod filters;
pub mod summary;

use chrono::NaiveDate;

use crate::ai::assistant::Assistant;
use crate::config::AppConfig;
use crate::crud::{CustomerManager, DealManager};
use crate::error::RecordError;
use crate::export::ExportRequest;
use crate::fixtures;
use crate::records::{unique_assignees, Customer, Deal};

pub use badge::{probability_tone, Badge, Tone};
pub use filters::{DateRangePreset, GlobalFilters, MarketSegment, Region};
pub use summary::{CustomerSummary, PipelineSummary};

/// All state behind one dashboard session.
pub struct Dashboard {
    pub customers: CustomerManager,
    pub deals: DealManager,
    pub filters: GlobalFilters,
    pub export: ExportRequest,
    pub assistant: Assistant,
}

impl Dashboard {
    /// Build a dashboard around injected records.
    ///
    /// Fails if either record set has duplicate ids or invalid records.
    pub fn new(
        config: &AppConfig,
        customers: Vec<Customer>,
        deals: Vec<Deal>,
    ) -> Result<Self, RecordError> {
        let date_range = config.default_date_range.parse().unwrap_or_else(|e| {
            log::warn!("{}; falling back to 30d", e);
            DateRangePreset::default()
        });

        Ok(Self {
            customers: CustomerManager::new(customers)?,
            deals: DealManager::new(deals)?,
            filters: GlobalFilters::with_date_range(date_range),
            export: ExportRequest::new(chrono::Utc::now().date_naive()),
            assistant: Assistant::new(config.assistant_settings()),
        })
    }

    /// Seeded from demo fixtures when the config asks for it, empty otherwise.
    pub fn from_config(config: &AppConfig) -> Result<Self, RecordError> {
        if config.seed_fixtures {
            log::info!("Seeding dashboard from demo fixtures");
            Self::new(config, fixtures::customers(), fixtures::deals())
        } else {
            Self::new(config, Vec::new(), Vec::new())
        }
    }

    /// Summary tiles for the deals currently visible in the deal table.
    pub fn pipeline_summary(&self) -> PipelineSummary {
        PipelineSummary::from_deals(self.deals.visible())
    }

    pub fn customer_summary(&self) -> CustomerSummary {
        CustomerSummary::from_customers(self.customers.visible())
    }

    /// Options for the deal table's assignee select.
    pub fn assignees(&self) -> Vec<String> {
        unique_assignees(self.deals.records())
    }

    /// Deals shown in the deal table that also fall inside the global date
    /// window.
    pub fn deals_in_window(&self, today: NaiveDate) -> Vec<&Deal> {
        self.deals
            .visible()
            .into_iter()
            .filter(|d| self.filters.admits_deal(d, today))
            .collect()
    }

    /// Summary tiles once the global filter bar is applied too.
    pub fn windowed_pipeline_summary(&self, today: NaiveDate) -> PipelineSummary {
        PipelineSummary::from_deals(self.deals_in_window(today))
    }

    /// Closing the export dialog drops its selections.
    pub fn close_export(&mut self, today: NaiveDate) {
        self.export.reset(today);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crud::{DealCriteria, FieldFilter};
    use crate::records::DealStage;

    #[test]
    fn seeded_dashboard_summarises_fixtures() {
        let dashboard = Dashboard::from_config(&AppConfig::default()).unwrap();
        assert_eq!(dashboard.customers.records().len(), 5);
        assert_eq!(dashboard.pipeline_summary().total_deals, 4);
        assert_eq!(
            dashboard.assignees(),
            vec!["Sarah Chen", "Michael Torres", "Jessica Kim", "David Wilson"]
        );
    }

    #[test]
    fn pipeline_summary_follows_deal_filters() {
        let mut dashboard = Dashboard::from_config(&AppConfig::default()).unwrap();
        dashboard.deals.set_criteria(DealCriteria {
            stage: FieldFilter::Only(DealStage::Proposal),
            ..Default::default()
        });
        let summary = dashboard.pipeline_summary();
        assert_eq!(summary.total_deals, 1);
        assert_eq!(summary.avg_probability, 70);
    }

    #[test]
    fn unseeded_dashboard_is_empty() {
        let config = AppConfig {
            seed_fixtures: false,
            ..Default::default()
        };
        let dashboard = Dashboard::from_config(&config).unwrap();
        assert!(dashboard.deals.records().is_empty());
        assert_eq!(dashboard.customer_summary().total_customers, 0);
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn global_window_narrows_visible_deals() {
        let mut dashboard = Dashboard::from_config(&AppConfig::default()).unwrap();
        let today = day(2024, 1, 20);

        let ids: Vec<_> = dashboard
            .deals_in_window(today)
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, vec!["3", "4"]);

        dashboard.filters.date_range = DateRangePreset::AllTime;
        assert_eq!(dashboard.windowed_pipeline_summary(today).total_deals, 4);

        dashboard.deals.set_search("cloud");
        let summary = dashboard.windowed_pipeline_summary(today);
        assert_eq!(summary.total_deals, dashboard.deals.visible().len());
    }

    #[test]
    fn duplicate_seed_ids_fail_construction() {
        let mut deals = fixtures::deals();
        deals.push(deals[0].clone());
        let err = Dashboard::new(&AppConfig::default(), fixtures::customers(), deals)
            .err()
            .unwrap();
        assert!(matches!(err, RecordError::DuplicateId { kind: "deal", .. }));
    }

    #[test]
    fn closing_export_resets_selections() {
        let mut dashboard = Dashboard::from_config(&AppConfig::default()).unwrap();
        dashboard.export.select_option("customers").unwrap();
        dashboard.close_export(day(2024, 5, 1));
        assert!(dashboard.export.option().is_none());
        assert_eq!(dashboard.export.date_from, Some(day(2024, 5, 1)));
    }

    #[test]
    fn bad_default_range_falls_back() {
        let config = AppConfig {
            default_date_range: "fortnight".to_string(),
            ..Default::default()
        };
        let dashboard = Dashboard::from_config(&config).unwrap();
        assert_eq!(dashboard.filters.date_range, DateRangePreset::Last30Days);
    }
}
