//! Requests by publication year, shaped as stacked chart series

use indexmap::IndexMap;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{CountType, ReqsByPubYearReport};

/// Bucket used for items without a publication year
const UNKNOWN_YEAR: &str = "unknown";

/// Requests for titles published in one year bucket, per period of use
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicationYearSeries {
    pub publication_year: String,
    pub total: i64,
    #[schema(value_type = Object)]
    pub counts: IndexMap<String, i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicationYearChart {
    pub count_type: CountType,
    pub periods: Vec<String>,
    pub series: Vec<PublicationYearSeries>,
}

/// Sum the items of the selected metric per publication year.
///
/// Series are ordered by publication year; every series has a count for
/// every period, with missing values counted as zero.
pub fn requests_by_publication_year(
    report: &ReqsByPubYearReport,
    count_type: CountType,
) -> PublicationYearChart {
    let periods = &report.access_count_periods;
    let mut by_year: IndexMap<String, Vec<i64>> = IndexMap::new();

    for item in report
        .items
        .iter()
        .filter(|item| item.metric_type.as_deref() == Some(count_type.metric_type()))
    {
        let year = item.publication_year.as_deref().unwrap_or(UNKNOWN_YEAR);
        let sums = by_year
            .entry(year.to_string())
            .or_insert_with(|| vec![0; periods.len()]);
        for (sum, count) in sums.iter_mut().zip(&item.access_counts_by_period) {
            *sum += count.unwrap_or(0);
        }
    }
    by_year.sort_keys();

    let series = by_year
        .into_iter()
        .map(|(publication_year, sums)| PublicationYearSeries {
            publication_year,
            total: sums.iter().sum(),
            counts: periods.iter().cloned().zip(sums).collect(),
        })
        .collect();

    PublicationYearChart {
        count_type,
        periods: periods.clone(),
        series,
    }
}
