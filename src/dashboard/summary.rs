use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::records::{Customer, CustomerStatus, Deal};

/// Tiles above the deal table, computed over the visible deals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSummary {
    pub total_deals: usize,
    /// Deals not yet Closed Won or Closed Lost.
    pub open_deals: usize,
    pub pipeline_value: Decimal,
    pub avg_deal_size: Decimal,
    pub avg_probability: u8,
}

impl PipelineSummary {
    pub fn from_deals<'a>(deals: impl IntoIterator<Item = &'a Deal>) -> Self {
        let mut total_deals = 0usize;
        let mut open_deals = 0usize;
        let mut pipeline_value = Decimal::ZERO;
        let mut probability_sum = 0u32;
        for deal in deals {
            total_deals += 1;
            if !deal.stage.is_closed() {
                open_deals += 1;
            }
            pipeline_value += deal.value;
            probability_sum += u32::from(deal.probability);
        }

        if total_deals == 0 {
            return Self {
                total_deals,
                open_deals,
                pipeline_value,
                avg_deal_size: Decimal::ZERO,
                avg_probability: 0,
            };
        }

        let avg_deal_size = (pipeline_value / Decimal::from(total_deals))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let avg_probability = (f64::from(probability_sum) / total_deals as f64).round() as u8;

        Self {
            total_deals,
            open_deals,
            pipeline_value,
            avg_deal_size,
            avg_probability,
        }
    }

    /// Sum of value weighted by close probability.
    pub fn weighted_value<'a>(deals: impl IntoIterator<Item = &'a Deal>) -> Decimal {
        deals
            .into_iter()
            .map(|d| d.value * Decimal::from(d.probability) / Decimal::ONE_HUNDRED)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub total_customers: usize,
    pub total_revenue: Decimal,
    pub by_status: BTreeMap<String, usize>,
}

impl CustomerSummary {
    pub fn from_customers<'a>(customers: impl IntoIterator<Item = &'a Customer>) -> Self {
        let mut by_status: BTreeMap<String, usize> = CustomerStatus::ALL
            .iter()
            .map(|s| (s.as_str().to_string(), 0))
            .collect();
        let mut total_customers = 0;
        let mut total_revenue = Decimal::ZERO;

        for customer in customers {
            total_customers += 1;
            total_revenue += customer.total_revenue;
            *by_status
                .entry(customer.status.as_str().to_string())
                .or_default() += 1;
        }

        Self {
            total_customers,
            total_revenue,
            by_status,
        }
    }

    pub fn count(&self, status: CustomerStatus) -> usize {
        self.by_status.get(status.as_str()).copied().unwrap_or(0)
    }
}
