//! Use-over-time stored report

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Parameters for `GET eusage-reports/stored-reports/use-over-time`
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UseOverTimeQuery {
    /// ISO date, e.g. `2020-01`
    pub start_date: String,
    pub end_date: String,
    /// `JOURNAL`, `BOOK` or `DATABASE`
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default, rename = "includeOA")]
    pub include_oa: bool,
    #[serde(default)]
    pub access_count_period: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UseOverTimeItem {
    pub title: String,
    #[serde(default)]
    pub access_type: Option<String>,
    #[serde(default)]
    pub metric_type: Option<String>,
    #[serde(default)]
    pub access_counts_by_period: Vec<Option<i64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UseOverTimeReport {
    #[serde(default)]
    pub total_item_requests_total: i64,
    #[serde(default)]
    pub unique_item_requests_total: i64,
    #[serde(default)]
    pub access_count_periods: Vec<String>,
    #[serde(default)]
    pub total_item_requests_by_period: Vec<Option<i64>>,
    #[serde(default)]
    pub unique_item_requests_by_period: Vec<Option<i64>>,
    #[serde(default)]
    pub items: Vec<UseOverTimeItem>,
}
