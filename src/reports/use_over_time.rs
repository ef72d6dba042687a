//! Use-over-time report as a table: one column per access-count period

use indexmap::IndexMap;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::UseOverTimeReport;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UseOverTimeRow {
    pub title: String,
    /// Set on the two summary rows at the top of the table
    pub is_total: bool,
    pub access_type: Option<String>,
    pub metric_type: Option<String>,
    /// Count per period, in period order
    #[schema(value_type = Object)]
    pub counts: IndexMap<String, Option<i64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UseOverTimeTable {
    pub periods: Vec<String>,
    pub total_item_requests_total: i64,
    pub unique_item_requests_total: i64,
    pub rows: Vec<UseOverTimeRow>,
}

fn counts_by_period(periods: &[String], values: &[Option<i64>]) -> IndexMap<String, Option<i64>> {
    periods
        .iter()
        .enumerate()
        .map(|(i, period)| (period.clone(), values.get(i).copied().flatten()))
        .collect()
}

/// Build the table: total and unique request rows first, then one row per item.
pub fn use_over_time_table(report: &UseOverTimeReport) -> UseOverTimeTable {
    let periods = &report.access_count_periods;

    let mut rows = vec![
        UseOverTimeRow {
            title: "Total item requests".to_string(),
            is_total: true,
            access_type: None,
            metric_type: None,
            counts: counts_by_period(periods, &report.total_item_requests_by_period),
        },
        UseOverTimeRow {
            title: "Unique item requests".to_string(),
            is_total: true,
            access_type: None,
            metric_type: None,
            counts: counts_by_period(periods, &report.unique_item_requests_by_period),
        },
    ];

    rows.extend(report.items.iter().map(|item| UseOverTimeRow {
        title: item.title.clone(),
        is_total: false,
        access_type: item.access_type.clone(),
        metric_type: item.metric_type.clone(),
        counts: counts_by_period(periods, &item.access_counts_by_period),
    }));

    UseOverTimeTable {
        periods: periods.clone(),
        total_item_requests_total: report.total_item_requests_total,
        unique_item_requests_total: report.unique_item_requests_total,
        rows,
    }
}
