//! COUNTER report groupings as sorted by erm-usage

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// All reports of one year, split by report type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CounterReportGroup {
    pub year: i32,
    #[serde(default)]
    pub reports_per_type: Vec<ReportsPerType>,
}

/// Reports of a single type (e.g. `TR`) within a year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportsPerType {
    pub report_type: String,
    #[serde(default)]
    pub counter_reports: Vec<CounterReportSegment>,
}

/// A dated slice of a usage report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CounterReportSegment {
    pub id: String,
    /// `YYYY-MM`; compared lexically
    pub year_month: String,
    #[serde(default)]
    pub release: Option<String>,
}

/// Envelope of `GET counter-reports/sorted/{providerId}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortedCounterReports {
    #[serde(default)]
    pub counter_reports_per_year: Vec<CounterReportGroup>,
}
