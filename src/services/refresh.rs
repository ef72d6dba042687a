//! Bulk match refresh from the most recent COUNTER title report

use std::future::Future;
use std::sync::Arc;

use indexmap::IndexMap;
use tokio::task::JoinHandle;

use crate::{
    error::AppResult,
    matching,
    models::{CounterReportSegment, Notification, NotificationKind},
    repository::EusageApi,
    services::{
        notifications::{remote_failure, Notifier},
        operations::{LongOperationRunner, OperationOutcome},
    },
};

const OPERATION: &str = "update-matches";

/// A refresh that has been handed to the long-operation runner
#[derive(Debug)]
pub struct RefreshStarted {
    pub segment: CounterReportSegment,
    pub handle: JoinHandle<AppResult<()>>,
}

#[derive(Clone)]
pub struct RefreshService {
    api: Arc<dyn EusageApi>,
    notifier: Arc<dyn Notifier>,
    runner: LongOperationRunner,
}

impl RefreshService {
    pub fn new(api: Arc<dyn EusageApi>, notifier: Arc<dyn Notifier>, runner: LongOperationRunner) -> Self {
        Self { api, notifier, runner }
    }

    /// Ask eusage-reports to recompute matches from the provider's latest
    /// title-report segment.
    ///
    /// When no segment qualifies nothing is sent: an `update-matches.error`
    /// notification is raised and the lookup error returned.
    pub async fn update_matches<Done, DoneFut>(
        &self,
        provider_id: &str,
        on_complete: Done,
    ) -> AppResult<RefreshStarted>
    where
        Done: FnOnce(OperationOutcome) -> DoneFut + Send + 'static,
        DoneFut: Future<Output = ()> + Send + 'static,
    {
        let groups = match self.api.fetch_counter_reports(provider_id).await {
            Ok(groups) => groups,
            Err(e) => {
                tracing::warn!("Fetching COUNTER reports for provider {} failed: {}", provider_id, e);
                self.notifier.notify(remote_failure(
                    format!("{}.failed", OPERATION),
                    "Failed to update matches",
                    &e,
                ));
                return Err(e);
            }
        };

        let segment = match matching::most_recent_segment(&groups) {
            Ok(segment) => segment.clone(),
            Err(e) => {
                tracing::warn!("Cannot update matches for provider {}: {}", provider_id, e);
                self.notifier.notify(
                    Notification::new(
                        NotificationKind::Error,
                        format!("{}.error", OPERATION),
                        format!("Cannot update matches: {}", e),
                    )
                    .with_value("reason", e.code()),
                );
                return Err(e.into());
            }
        };

        tracing::info!(
            "Updating matches for provider {} from COUNTER report {} ({})",
            provider_id,
            segment.id,
            segment.year_month
        );

        let mut context = IndexMap::new();
        context.insert("yearMonth".to_string(), segment.year_month.clone());

        let api = self.api.clone();
        let counter_report_id = segment.id.clone();
        let handle = self.runner.run(
            OPERATION,
            context,
            async move { api.update_matches_from_counter(&counter_report_id).await },
            on_complete,
        );

        Ok(RefreshStarted { segment, handle })
    }
}
