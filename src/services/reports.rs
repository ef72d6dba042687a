//! Stored usage reports

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{ReqsByPubYearQuery, UseOverTimeQuery},
    reports::{
        requests_by_publication_year, use_over_time_table, PublicationYearChart, UseOverTimeTable,
    },
    repository::EusageApi,
    services::notifications::{remote_failure, Notifier},
};

#[derive(Clone)]
pub struct ReportsService {
    api: Arc<dyn EusageApi>,
    notifier: Arc<dyn Notifier>,
}

fn check_range(start_date: &str, end_date: &str) -> AppResult<()> {
    if start_date > end_date {
        return Err(AppError::Validation(format!(
            "startDate {} is after endDate {}",
            start_date, end_date
        )));
    }
    Ok(())
}

impl ReportsService {
    pub fn new(api: Arc<dyn EusageApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    fn report_failed(&self, report: &str, agreement_id: &str, error: AppError) -> AppError {
        tracing::warn!("Fetching {} for agreement {} failed: {}", report, agreement_id, error);
        self.notifier.notify(
            remote_failure(
                format!("{}.not-loaded", report),
                &format!("Could not load {} report", report),
                &error,
            )
            .with_value("agreementId", agreement_id),
        );
        error
    }

    /// Use-over-time report of an agreement, laid out per period
    pub async fn use_over_time(
        &self,
        agreement_id: &str,
        query: &UseOverTimeQuery,
    ) -> AppResult<UseOverTimeTable> {
        check_range(&query.start_date, &query.end_date)?;
        let report = self
            .api
            .fetch_use_over_time(agreement_id, query)
            .await
            .map_err(|e| self.report_failed("use-over-time", agreement_id, e))?;
        Ok(use_over_time_table(&report))
    }

    /// Requests per publication year of an agreement's titles
    pub async fn requests_by_publication_year(
        &self,
        agreement_id: &str,
        query: &ReqsByPubYearQuery,
    ) -> AppResult<PublicationYearChart> {
        check_range(&query.start_date, &query.end_date)?;
        let report = self
            .api
            .fetch_reqs_by_pub_year(agreement_id, query)
            .await
            .map_err(|e| self.report_failed("reqs-by-pub-year", agreement_id, e))?;
        Ok(requests_by_publication_year(&report, query.count_type))
    }
}
