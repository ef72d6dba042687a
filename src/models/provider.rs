//! Usage data provider model

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Provider whose COUNTER reports are being matched (read-only here)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsageDataProvider {
    pub id: String,
    pub label: String,
    /// Timestamp of the last harvest, as sent by erm-usage
    #[serde(default)]
    pub harvesting_date: Option<String>,
}

impl UsageDataProvider {
    /// Calendar date of the last harvest.
    ///
    /// erm-usage sends both offset-less (`2021-09-22T20:26:29.995390`) and
    /// RFC 3339 timestamps, so both are accepted.
    pub fn harvested_on(&self) -> Option<NaiveDate> {
        let raw = self.harvesting_date.as_deref()?;
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.date_naive());
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|dt| dt.date())
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
            .ok()
    }
}
