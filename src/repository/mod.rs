//! Repository layer for the remote eusage-reports and erm-usage APIs

pub mod okapi;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{
        CounterReportGroup, ReportTitle, ReqsByPubYearQuery, ReqsByPubYearReport, TitlePage,
        TitleQuery, UsageDataProvider, UseOverTimeQuery, UseOverTimeReport,
    },
};

pub use okapi::OkapiClient;

/// Remote operations the review workflow depends on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EusageApi: Send + Sync {
    /// Gateway liveness, `GET _/proxy/health`
    async fn ping(&self) -> AppResult<()>;

    /// `GET usage-data-providers/{id}`
    async fn fetch_provider(&self, provider_id: &str) -> AppResult<UsageDataProvider>;

    /// `GET counter-reports/sorted/{providerId}`, grouped per year
    async fn fetch_counter_reports(&self, provider_id: &str) -> AppResult<Vec<CounterReportGroup>>;

    /// `GET eusage-reports/report-titles`
    async fn fetch_report_titles(&self, query: &TitleQuery) -> AppResult<TitlePage>;

    /// `POST eusage-reports/report-titles` with `{ titles }`
    async fn upsert_report_titles(&self, titles: &[ReportTitle]) -> AppResult<()>;

    /// `POST eusage-reports/report-titles/from-counter` with `{ counterReportId }`
    async fn update_matches_from_counter(&self, counter_report_id: &str) -> AppResult<()>;

    /// `GET eusage-reports/stored-reports/use-over-time`
    async fn fetch_use_over_time(
        &self,
        agreement_id: &str,
        query: &UseOverTimeQuery,
    ) -> AppResult<UseOverTimeReport>;

    /// `GET eusage-reports/stored-reports/reqs-by-pub-year`
    async fn fetch_reqs_by_pub_year(
        &self,
        agreement_id: &str,
        query: &ReqsByPubYearQuery,
    ) -> AppResult<ReqsByPubYearReport>;
}
