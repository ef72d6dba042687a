//! Runner for long remote operations
//!
//! Reviewers are told when an operation is requested and again when it
//! completes or fails. The operation runs detached; callers get the task
//! handle but cannot cancel it.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;
use tokio::task::JoinHandle;

use crate::{
    error::{AppError, AppResult},
    models::{Notification, NotificationKind},
    services::notifications::Notifier,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationOutcome {
    Completed,
    Failed,
}

#[derive(Clone)]
pub struct LongOperationRunner {
    notifier: Arc<dyn Notifier>,
    timeout: Duration,
}

impl LongOperationRunner {
    pub fn new(notifier: Arc<dyn Notifier>, timeout: Duration) -> Self {
        Self { notifier, timeout }
    }

    fn notification(
        kind: NotificationKind,
        key: String,
        message: String,
        context: &IndexMap<String, String>,
    ) -> Notification {
        context
            .iter()
            .fold(Notification::new(kind, key, message), |n, (name, value)| {
                n.with_value(name, value.clone())
            })
    }

    /// Start `operation` in the background and call `on_complete` once it
    /// has finished, whatever the outcome.
    ///
    /// `name` prefixes the notification keys (`<name>.requested`,
    /// `<name>.completed`, `<name>.failed`); `context` is attached to each.
    pub fn run<Op, Done, DoneFut>(
        &self,
        name: &str,
        context: IndexMap<String, String>,
        operation: Op,
        on_complete: Done,
    ) -> JoinHandle<AppResult<()>>
    where
        Op: Future<Output = AppResult<()>> + Send + 'static,
        Done: FnOnce(OperationOutcome) -> DoneFut + Send + 'static,
        DoneFut: Future<Output = ()> + Send + 'static,
    {
        let describe = context
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(", ");

        self.notifier.notify(Self::notification(
            NotificationKind::Info,
            format!("{}.requested", name),
            format!("Requested {} ({})", name, describe),
            &context,
        ));

        let notifier = self.notifier.clone();
        let timeout = self.timeout;
        let name = name.to_string();

        tokio::spawn(async move {
            let result = match tokio::time::timeout(timeout, operation).await {
                Ok(result) => result,
                Err(_) => Err(AppError::Timeout(format!(
                    "{} did not finish within {}s",
                    name,
                    timeout.as_secs()
                ))),
            };

            let outcome = match &result {
                Ok(()) => {
                    tracing::info!("Long operation {} completed ({})", name, describe);
                    notifier.notify(Self::notification(
                        NotificationKind::Success,
                        format!("{}.completed", name),
                        format!("Completed {} ({})", name, describe),
                        &context,
                    ));
                    OperationOutcome::Completed
                }
                Err(e) => {
                    tracing::warn!("Long operation {} failed: {}", name, e);
                    notifier.notify(
                        Self::notification(
                            NotificationKind::Error,
                            format!("{}.failed", name),
                            format!("Failed to {}: {}", name, e),
                            &context,
                        )
                        .with_value("error", e.to_string()),
                    );
                    OperationOutcome::Failed
                }
            };

            on_complete(outcome).await;
            result
        })
    }
}
