//! Requests-by-publication-year stored report

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Period of use sent to eusage-reports, which currently requires it
const PERIOD_OF_USE: &str = "1Y";

/// Which COUNTER metric the chart counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CountType {
    Total,
    #[default]
    Unique,
}

impl CountType {
    pub fn metric_type(self) -> &'static str {
        match self {
            CountType::Total => "Total_Item_Requests",
            CountType::Unique => "Unique_Item_Requests",
        }
    }
}

/// Parameters of the requests-by-publication-year report
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReqsByPubYearQuery {
    pub start_date: String,
    pub end_date: String,
    #[serde(default, rename = "includeOA")]
    pub include_oa: bool,
    #[serde(default)]
    pub access_count_period: Option<String>,
    /// Width of the publication-year buckets, e.g. `1Y` or `5Y`
    #[serde(default)]
    pub yop_interval: Option<String>,
    /// Not sent upstream; selects the metric charted
    #[serde(default)]
    pub count_type: CountType,
}

impl ReqsByPubYearQuery {
    /// Query-string pairs for `GET eusage-reports/stored-reports/reqs-by-pub-year`
    pub fn to_params(&self, agreement_id: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("agreementId", agreement_id.to_string()),
            ("startDate", self.start_date.clone()),
            ("endDate", self.end_date.clone()),
            ("includeOA", self.include_oa.to_string()),
        ];
        if let Some(period) = &self.access_count_period {
            params.push(("accessCountPeriod", period.clone()));
        }
        if let Some(interval) = &self.yop_interval {
            params.push(("yopInterval", interval.clone()));
        }
        params.push(("periodOfUse", PERIOD_OF_USE.to_string()));
        params
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReqsByPubYearItem {
    #[serde(default)]
    pub title: Option<String>,
    /// Publication-year bucket, e.g. `2010` or `2010-2014`
    #[serde(default)]
    pub publication_year: Option<String>,
    #[serde(default)]
    pub access_type: Option<String>,
    #[serde(default)]
    pub metric_type: Option<String>,
    #[serde(default)]
    pub access_counts_by_period: Vec<Option<i64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReqsByPubYearReport {
    #[serde(default)]
    pub total_item_requests_total: i64,
    #[serde(default)]
    pub unique_item_requests_total: i64,
    #[serde(default)]
    pub access_count_periods: Vec<String>,
    #[serde(default)]
    pub items: Vec<ReqsByPubYearItem>,
}
