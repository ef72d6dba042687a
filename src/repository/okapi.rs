//! reqwest implementation of [`EusageApi`] talking to Okapi

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::json;

use super::EusageApi;
use crate::{
    config::OkapiConfig,
    error::{AppError, AppResult},
    models::{
        counter_report::SortedCounterReports, CounterReportGroup, ReportTitle,
        ReqsByPubYearQuery, ReqsByPubYearReport, TitlePage, TitleQuery, UsageDataProvider,
        UseOverTimeQuery, UseOverTimeReport,
    },
};

const TENANT_HEADER: &str = "X-Okapi-Tenant";
const TOKEN_HEADER: &str = "X-Okapi-Token";

#[derive(Clone)]
pub struct OkapiClient {
    client: reqwest::Client,
    base_url: String,
}

impl OkapiClient {
    /// Build a client sending tenant and token headers on every request
    pub fn new(config: &OkapiConfig) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(TENANT_HEADER, header_value(&config.tenant)?);
        if let Some(token) = &config.token {
            headers.insert(TOKEN_HEADER, header_value(token)?);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Turn non-2xx responses into [`AppError::Upstream`]
    async fn ensure_success(response: reqwest::Response) -> AppResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!("Okapi responded {}: {}", status, body);
            return Err(AppError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

fn header_value(value: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| AppError::Internal(format!("Invalid Okapi header value: {}", e)))
}

#[async_trait]
impl EusageApi for OkapiClient {
    async fn ping(&self) -> AppResult<()> {
        let response = self.client.get(self.url("_/proxy/health")).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn fetch_provider(&self, provider_id: &str) -> AppResult<UsageDataProvider> {
        tracing::debug!("Fetching usage data provider {}", provider_id);
        let response = self
            .client
            .get(self.url(&format!("usage-data-providers/{}", provider_id)))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::ProviderNotFound(provider_id.to_string()));
        }
        Self::parse(response).await
    }

    async fn fetch_counter_reports(&self, provider_id: &str) -> AppResult<Vec<CounterReportGroup>> {
        tracing::debug!("Fetching sorted COUNTER reports for provider {}", provider_id);
        let response = self
            .client
            .get(self.url(&format!("counter-reports/sorted/{}", provider_id)))
            .send()
            .await?;

        let sorted: SortedCounterReports = Self::parse(response).await?;
        Ok(sorted.counter_reports_per_year)
    }

    async fn fetch_report_titles(&self, query: &TitleQuery) -> AppResult<TitlePage> {
        tracing::debug!("Fetching report titles: {:?}", query);
        let response = self
            .client
            .get(self.url("eusage-reports/report-titles"))
            .query(&query.to_params())
            .send()
            .await?;

        Self::parse(response).await
    }

    async fn upsert_report_titles(&self, titles: &[ReportTitle]) -> AppResult<()> {
        tracing::debug!("Upserting {} report title(s)", titles.len());
        let response = self
            .client
            .post(self.url("eusage-reports/report-titles"))
            .json(&json!({ "titles": titles }))
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn update_matches_from_counter(&self, counter_report_id: &str) -> AppResult<()> {
        tracing::debug!("Requesting match update from COUNTER report {}", counter_report_id);
        let response = self
            .client
            .post(self.url("eusage-reports/report-titles/from-counter"))
            .json(&json!({ "counterReportId": counter_report_id }))
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn fetch_use_over_time(
        &self,
        agreement_id: &str,
        query: &UseOverTimeQuery,
    ) -> AppResult<UseOverTimeReport> {
        let response = self
            .client
            .get(self.url("eusage-reports/stored-reports/use-over-time"))
            .query(&[("agreementId", agreement_id)])
            .query(query)
            .send()
            .await?;

        Self::parse(response).await
    }

    async fn fetch_reqs_by_pub_year(
        &self,
        agreement_id: &str,
        query: &ReqsByPubYearQuery,
    ) -> AppResult<ReqsByPubYearReport> {
        let response = self
            .client
            .get(self.url("eusage-reports/stored-reports/reqs-by-pub-year"))
            .query(&query.to_params(agreement_id))
            .send()
            .await?;

        Self::parse(response).await
    }
}
