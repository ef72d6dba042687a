//! Report title model and match status

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

/// A title cited in ingested COUNTER data, with its knowledge-base match
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportTitle {
    pub id: String,
    pub counter_report_title: Option<String>,
    #[serde(rename = "ISBN")]
    pub isbn: Option<String>,
    #[serde(rename = "printISSN")]
    pub print_issn: Option<String>,
    #[serde(rename = "onlineISSN")]
    pub online_issn: Option<String>,
    #[serde(rename = "DOI")]
    pub doi: Option<String>,
    pub publication_type: Option<String>,
    pub kb_title_id: Option<String>,
    pub kb_title_name: Option<String>,
    pub kb_package_id: Option<String>,
    pub kb_package_name: Option<String>,
    #[serde(default)]
    pub kb_manual_match: bool,
    /// Fields eusage-reports sends that are not modeled here; sent back on upsert
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Map<String, Value>,
}

/// Match status derived from `kbTitleId` and `kbManualMatch`; never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Matched,
    Unmatched,
    Ignored,
}

impl ReportTitle {
    /// A linked KB title always wins: a matched record is never "ignored"
    pub fn status(&self) -> MatchStatus {
        if self.kb_title_id.is_some() {
            MatchStatus::Matched
        } else if self.kb_manual_match {
            MatchStatus::Ignored
        } else {
            MatchStatus::Unmatched
        }
    }

    /// Title shown to reviewers, falling back to the record id
    pub fn display_title(&self) -> &str {
        self.counter_report_title.as_deref().unwrap_or(&self.id)
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MatchStatus::Matched => "matched",
            MatchStatus::Unmatched => "unmatched",
            MatchStatus::Ignored => "ignored",
        };
        write!(f, "{}", label)
    }
}

/// Review category: `loaded` holds every record, the others one status each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MatchCategory {
    Loaded,
    Matched,
    Unmatched,
    Ignored,
}

impl MatchCategory {
    /// Categories in display order
    pub const ALL: [MatchCategory; 4] = [
        MatchCategory::Loaded,
        MatchCategory::Matched,
        MatchCategory::Unmatched,
        MatchCategory::Ignored,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MatchCategory::Loaded => "loaded",
            MatchCategory::Matched => "matched",
            MatchCategory::Unmatched => "unmatched",
            MatchCategory::Ignored => "ignored",
        }
    }

    pub fn contains(self, title: &ReportTitle) -> bool {
        match self {
            MatchCategory::Loaded => true,
            MatchCategory::Matched => title.status() == MatchStatus::Matched,
            MatchCategory::Unmatched => title.status() == MatchStatus::Unmatched,
            MatchCategory::Ignored => title.status() == MatchStatus::Ignored,
        }
    }
}

impl std::str::FromStr for MatchCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MatchCategory::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| format!("Unknown match type '{}'", s))
    }
}

/// Parameters for `GET eusage-reports/report-titles`
#[derive(Debug, Clone, PartialEq)]
pub struct TitleQuery {
    pub provider_id: String,
    pub match_type: Option<MatchCategory>,
    pub limit: u32,
    pub offset: u32,
}

impl TitleQuery {
    /// Query-string pairs; `loaded` is the unfiltered set and sends no `matchType`
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("providerId", self.provider_id.clone()),
            ("limit", self.limit.to_string()),
        ];
        if self.offset > 0 {
            params.push(("offset", self.offset.to_string()));
        }
        match self.match_type {
            Some(MatchCategory::Loaded) | None => {}
            Some(category) => params.push(("matchType", category.key().to_string())),
        }
        params
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultInfo {
    #[serde(default)]
    pub total_records: Option<u64>,
}

/// One page of report titles as returned by eusage-reports
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitlePage {
    #[serde(default)]
    pub titles: Vec<ReportTitle>,
    #[serde(default)]
    pub result_info: Option<ResultInfo>,
}

impl TitlePage {
    pub fn new(titles: Vec<ReportTitle>, total_records: u64) -> Self {
        Self {
            titles,
            result_info: Some(ResultInfo {
                total_records: Some(total_records),
            }),
        }
    }

    /// Remote total, or the page length when the server omits it
    pub fn total_records(&self) -> u64 {
        self.result_info
            .as_ref()
            .and_then(|info| info.total_records)
            .unwrap_or(self.titles.len() as u64)
    }
}
