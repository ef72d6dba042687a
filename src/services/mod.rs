//! Business logic services

pub mod notifications;
pub mod operations;
pub mod refresh;
pub mod reports;
pub mod review;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use crate::{config::ReviewConfig, error::AppResult, repository::EusageApi};

use notifications::{CalloutQueue, Notifier};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub review: review::ReviewService,
    pub refresh: refresh::RefreshService,
    pub reports: reports::ReportsService,
    pub callouts: Arc<CalloutQueue>,
    api: Arc<dyn EusageApi>,
}

impl Services {
    /// Create all services on top of the given remote API
    pub fn new(api: Arc<dyn EusageApi>, config: &ReviewConfig) -> Self {
        let callouts = Arc::new(CalloutQueue::new(config.notification_capacity));
        let notifier: Arc<dyn Notifier> = callouts.clone();
        let runner = operations::LongOperationRunner::new(
            notifier.clone(),
            Duration::from_secs(config.operation_timeout_secs),
        );

        Self {
            review: review::ReviewService::new(api.clone(), notifier.clone(), config.page_limit),
            refresh: refresh::RefreshService::new(api.clone(), notifier.clone(), runner),
            reports: reports::ReportsService::new(api.clone(), notifier),
            callouts,
            api,
        }
    }

    /// Whether the Okapi gateway answers
    pub async fn check_upstream(&self) -> AppResult<()> {
        self.api.ping().await
    }
}
