//! Title-match review sessions
//!
//! A session holds the titles loaded for one usage data provider. Edits are
//! applied to a copy that is parked in a pending map while the upsert is in
//! flight; the canonical list only changes once eusage-reports accepts the
//! record, so a rejected edit leaves nothing behind.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::{watch, RwLock};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    matching::{self, ActionKind, ActionTag, MatchAction, ReviewStatus},
    models::{
        MatchCategory, MatchStatus, Notification, NotificationKind, ReportTitle, TitleQuery,
        UsageDataProvider,
    },
    repository::EusageApi,
    services::notifications::{remote_failure, Notifier},
};

/// A title as shown to reviewers: the effective record plus its status
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewedTitle {
    #[serde(flatten)]
    pub title: ReportTitle,
    pub status: MatchStatus,
    /// An edit of this record is awaiting confirmation
    pub pending: bool,
}

impl ReviewedTitle {
    fn new(title: ReportTitle, pending: bool) -> Self {
        Self {
            status: title.status(),
            title,
            pending,
        }
    }
}

impl AsRef<ReportTitle> for ReviewedTitle {
    fn as_ref(&self) -> &ReportTitle {
        &self.title
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub key: MatchCategory,
    pub count: usize,
    /// Display value, e.g. `4 of 42` while only part of the titles is loaded
    pub label: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub provider: UsageDataProvider,
    pub harvested_on: Option<NaiveDate>,
    pub status: ReviewStatus,
    /// Every title known to eusage-reports has been loaded
    pub complete: bool,
    pub total_records: u64,
    pub revision: u64,
    pub categories: Vec<CategorySummary>,
}

#[derive(Debug, Clone)]
struct PendingEdit {
    seq: u64,
    title: ReportTitle,
}

#[derive(Debug, Clone)]
struct ReviewSession {
    provider: UsageDataProvider,
    titles: Vec<ReportTitle>,
    total_records: u64,
    pending: HashMap<String, PendingEdit>,
    revision: u64,
}

impl ReviewSession {
    /// Canonical records with in-flight edits laid over them
    fn effective_titles(&self) -> Vec<ReviewedTitle> {
        self.titles
            .iter()
            .map(|title| match self.pending.get(&title.id) {
                Some(edit) => ReviewedTitle::new(edit.title.clone(), true),
                None => ReviewedTitle::new(title.clone(), false),
            })
            .collect()
    }

    fn effective(&self, title_id: &str) -> Option<&ReportTitle> {
        if let Some(edit) = self.pending.get(title_id) {
            return Some(&edit.title);
        }
        self.titles.iter().find(|t| t.id == title_id)
    }
}

#[derive(Clone)]
pub struct ReviewService {
    api: Arc<dyn EusageApi>,
    notifier: Arc<dyn Notifier>,
    page_limit: u32,
    sessions: Arc<RwLock<HashMap<String, ReviewSession>>>,
    next_seq: Arc<AtomicU64>,
    changes: Arc<watch::Sender<u64>>,
}

impl ReviewService {
    pub fn new(api: Arc<dyn EusageApi>, notifier: Arc<dyn Notifier>, page_limit: u32) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            api,
            notifier,
            page_limit,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            next_seq: Arc::new(AtomicU64::new(1)),
            changes: Arc::new(changes),
        }
    }

    /// Change counter bumped whenever any session's titles change
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    fn touch(&self, session: &mut ReviewSession) {
        session.revision += 1;
        self.changes.send_modify(|n| *n += 1);
    }

    /// (Re)load the provider and the first page of its titles
    pub async fn load(&self, provider_id: &str) -> AppResult<()> {
        let query = TitleQuery {
            provider_id: provider_id.to_string(),
            match_type: None,
            limit: self.page_limit,
            offset: 0,
        };
        let (provider, page) = tokio::try_join!(
            self.api.fetch_provider(provider_id),
            self.api.fetch_report_titles(&query),
        )
        .map_err(|e| self.load_failed(provider_id, e))?;

        tracing::info!(
            "Loaded {} of {} report titles for provider {}",
            page.titles.len(),
            page.total_records(),
            provider.label
        );

        let mut sessions = self.sessions.write().await;
        let revision = sessions.get(provider_id).map_or(0, |s| s.revision);
        let mut session = ReviewSession {
            provider,
            total_records: page.total_records(),
            titles: page.titles,
            pending: HashMap::new(),
            revision,
        };
        self.touch(&mut session);
        sessions.insert(provider_id.to_string(), session);
        Ok(())
    }

    fn load_failed(&self, provider_id: &str, error: AppError) -> AppError {
        tracing::warn!("Loading report titles for provider {} failed: {}", provider_id, error);
        self.notifier.notify(
            remote_failure("report-titles.not-loaded", "Could not load report titles", &error)
                .with_value("providerId", provider_id),
        );
        error
    }

    async fn ensure_loaded(&self, provider_id: &str) -> AppResult<()> {
        if self.sessions.read().await.contains_key(provider_id) {
            return Ok(());
        }
        self.load(provider_id).await
    }

    /// Append the next page of titles; returns how many were added
    pub async fn load_more(&self, provider_id: &str) -> AppResult<usize> {
        self.ensure_loaded(provider_id).await?;

        let offset = {
            let sessions = self.sessions.read().await;
            let session = sessions
                .get(provider_id)
                .ok_or_else(|| AppError::ProviderNotFound(provider_id.to_string()))?;
            if session.titles.len() as u64 >= session.total_records {
                return Ok(0);
            }
            session.titles.len() as u32
        };

        let page = self
            .api
            .fetch_report_titles(&TitleQuery {
                provider_id: provider_id.to_string(),
                match_type: None,
                limit: self.page_limit,
                offset,
            })
            .await
            .map_err(|e| self.load_failed(provider_id, e))?;

        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(provider_id)
            .ok_or_else(|| AppError::ProviderNotFound(provider_id.to_string()))?;

        let added = page
            .titles
            .into_iter()
            .filter(|t| !session.titles.iter().any(|known| known.id == t.id))
            .collect::<Vec<_>>();
        let count = added.len();
        session.titles.extend(added);
        session.total_records = page
            .result_info
            .and_then(|info| info.total_records)
            .unwrap_or(session.total_records);
        self.touch(session);

        tracing::debug!("Appended {} report titles for provider {}", count, provider_id);
        Ok(count)
    }

    /// Titles of one category, in load order
    pub async fn titles(&self, provider_id: &str, category: MatchCategory) -> AppResult<Vec<ReviewedTitle>> {
        self.ensure_loaded(provider_id).await?;
        let sessions = self.sessions.read().await;
        let session = sessions
            .get(provider_id)
            .ok_or_else(|| AppError::ProviderNotFound(provider_id.to_string()))?;

        let effective = session.effective_titles();
        let mut categories = matching::categorize(&effective);
        let bucket = categories.swap_remove(&category).unwrap_or_default();
        Ok(bucket.into_iter().cloned().collect())
    }

    /// Counts per category and the overall review status
    pub async fn summary(&self, provider_id: &str) -> AppResult<ReviewSummary> {
        self.ensure_loaded(provider_id).await?;
        let sessions = self.sessions.read().await;
        let session = sessions
            .get(provider_id)
            .ok_or_else(|| AppError::ProviderNotFound(provider_id.to_string()))?;

        let effective = session.effective_titles();
        let categories = matching::categorize(&effective);
        let loaded = effective.len();
        let unmatched = categories[&MatchCategory::Unmatched].len();
        let complete = loaded as u64 >= session.total_records;

        let categories: Vec<CategorySummary> = categories
            .iter()
            .map(|(key, bucket)| CategorySummary {
                key: *key,
                count: bucket.len(),
                label: if *key == MatchCategory::Loaded && !complete {
                    format!("{} of {}", bucket.len(), session.total_records)
                } else {
                    bucket.len().to_string()
                },
            })
            .collect();

        Ok(ReviewSummary {
            harvested_on: session.provider.harvested_on(),
            provider: session.provider.clone(),
            status: matching::derive_status(loaded, unmatched),
            complete,
            total_records: session.total_records,
            revision: session.revision,
            categories,
        })
    }

    /// Actions currently offered for one title
    pub async fn legal_actions(&self, provider_id: &str, title_id: &str) -> AppResult<Vec<ActionKind>> {
        self.ensure_loaded(provider_id).await?;
        let sessions = self.sessions.read().await;
        let title = sessions
            .get(provider_id)
            .and_then(|s| s.effective(title_id))
            .ok_or_else(|| AppError::TitleNotFound(title_id.to_string()))?;
        Ok(matching::legal_actions(title.status()).to_vec())
    }

    /// Apply a manual match edit and persist it.
    ///
    /// Returns the committed record. On failure the canonical record is
    /// unchanged and an error notification has been raised.
    pub async fn apply_edit(
        &self,
        provider_id: &str,
        title_id: &str,
        action: MatchAction,
    ) -> AppResult<ReportTitle> {
        self.ensure_loaded(provider_id).await?;
        let tag = action.tag();

        let (seq, edited) = {
            let mut sessions = self.sessions.write().await;
            let session = sessions
                .get_mut(provider_id)
                .ok_or_else(|| AppError::ProviderNotFound(provider_id.to_string()))?;
            let current = session
                .effective(title_id)
                .ok_or_else(|| AppError::TitleNotFound(title_id.to_string()))?;

            let edited = matching::apply_action(current, &action).map_err(|e| {
                tracing::warn!("Rejected edit of report title {}: {}", title_id, e);
                e
            })?;

            let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
            session.pending.insert(
                title_id.to_string(),
                PendingEdit {
                    seq,
                    title: edited.clone(),
                },
            );
            self.touch(session);
            (seq, edited)
        };

        tracing::debug!("Sending {} edit #{} for report title {}", tag.as_str(), seq, title_id);
        let result = self.api.upsert_report_titles(std::slice::from_ref(&edited)).await;

        {
            let mut sessions = self.sessions.write().await;
            if let Some(session) = sessions.get_mut(provider_id) {
                // a later edit of the same record keeps its own marker
                if session.pending.get(title_id).map(|p| p.seq) == Some(seq) {
                    session.pending.remove(title_id);
                }
                if result.is_ok() {
                    if let Some(slot) = session.titles.iter_mut().find(|t| t.id == edited.id) {
                        *slot = edited.clone();
                    }
                }
                self.touch(session);
            }
        }

        match result {
            Ok(()) => {
                self.notifier.notify(edit_succeeded(tag, &edited));
                Ok(edited)
            }
            Err(e) => {
                self.notifier.notify(edit_failed(tag, &e));
                Err(e)
            }
        }
    }
}

fn edit_succeeded(tag: ActionTag, title: &ReportTitle) -> Notification {
    let name = title.display_title();
    let message = match tag {
        ActionTag::Edited => format!("Updated match for \"{}\"", name),
        ActionTag::Ignored => format!("Ignoring \"{}\"", name),
        ActionTag::Unignored => format!("No longer ignoring \"{}\"", name),
    };
    Notification::new(
        NotificationKind::Success,
        format!("action.{}", tag.as_str()),
        message,
    )
    .with_value("title", name)
}

fn edit_failed(tag: ActionTag, error: &AppError) -> Notification {
    let message = match tag {
        ActionTag::Edited => format!("Could not update match: {}", error),
        ActionTag::Ignored => format!("Could not ignore title: {}", error),
        ActionTag::Unignored => format!("Could not stop ignoring title: {}", error),
    };
    Notification::new(
        NotificationKind::Error,
        format!("action.not-{}", tag.as_str()),
        message,
    )
    .with_value("error", error.to_string())
}
