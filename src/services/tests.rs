//! Service tests against a mocked eusage-reports API

use std::collections::VecDeque;
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::json;
use tokio::sync::oneshot;
use tokio_test::{assert_err, assert_ok};

use super::{
    notifications::Notifier,
    operations::{LongOperationRunner, OperationOutcome},
    refresh::RefreshService,
    reports::ReportsService,
    review::ReviewService,
};
use crate::{
    error::{AppError, AppResult},
    matching::{ActionKind, MatchAction, ReviewStatus, SegmentLookupError},
    models::{
        CountType, CounterReportGroup, MatchCategory, MatchStatus, Notification, NotificationKind,
        ReportTitle, ReqsByPubYearQuery, ReqsByPubYearReport, TitlePage, TitleQuery,
        UsageDataProvider, UseOverTimeQuery, UseOverTimeReport,
    },
    repository::{EusageApi, MockEusageApi},
};

#[derive(Default)]
struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    fn keys(&self) -> Vec<String> {
        self.seen.lock().unwrap().iter().map(|n| n.key.clone()).collect()
    }

    fn last(&self) -> Notification {
        self.seen.lock().unwrap().last().cloned().expect("no notification")
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

fn title(id: &str, kb_title_id: Option<&str>, kb_manual_match: bool) -> ReportTitle {
    serde_json::from_value(json!({
        "id": id,
        "counterReportTitle": format!("Title {}", id),
        "kbTitleId": kb_title_id,
        "kbTitleName": kb_title_id.map(|kb| format!("KB {}", kb)),
        "kbManualMatch": kb_manual_match,
    }))
    .unwrap()
}

fn sample_titles() -> Vec<ReportTitle> {
    vec![
        title("a", Some("kb-a"), false),
        title("b", None, false),
        title("c", None, true),
        title("d", None, false),
    ]
}

fn provider() -> UsageDataProvider {
    UsageDataProvider {
        id: "udp-1".into(),
        label: "Wiley".into(),
        harvesting_date: Some("2021-09-22T20:26:29.995390".into()),
    }
}

/// Mock serving `titles` as the first page, with `total` records remotely
fn loaded_api(titles: Vec<ReportTitle>, total: u64) -> MockEusageApi {
    let mut api = MockEusageApi::new();
    api.expect_fetch_provider()
        .withf(|id: &str| id == "udp-1")
        .returning(|_| Ok(provider()));
    api.expect_fetch_report_titles()
        .withf(|q| q.offset == 0)
        .returning(move |_| Ok(TitlePage::new(titles.clone(), total)));
    api
}

fn review(api: MockEusageApi) -> (ReviewService, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let service = ReviewService::new(Arc::new(api), notifier.clone(), 200);
    (service, notifier)
}

#[tokio::test]
async fn test_summary_counts_and_status() {
    let (service, _) = review(loaded_api(sample_titles(), 42));

    let summary = assert_ok!(service.summary("udp-1").await);
    assert_eq!(summary.status, ReviewStatus::Pending);
    assert!(!summary.complete);
    assert_eq!(summary.provider.label, "Wiley");
    assert_eq!(summary.harvested_on.unwrap().to_string(), "2021-09-22");

    let counts: Vec<_> = summary
        .categories
        .iter()
        .map(|c| (c.key, c.count, c.label.as_str()))
        .collect();
    assert_eq!(
        counts,
        [
            (MatchCategory::Loaded, 4, "4 of 42"),
            (MatchCategory::Matched, 1, "1"),
            (MatchCategory::Unmatched, 2, "2"),
            (MatchCategory::Ignored, 1, "1"),
        ]
    );
}

#[tokio::test]
async fn test_summary_without_records() {
    let (service, _) = review(loaded_api(vec![], 0));

    let summary = assert_ok!(service.summary("udp-1").await);
    assert_eq!(summary.status, ReviewStatus::NoRecords);
    assert!(summary.complete);
    assert!(summary.categories.iter().all(|c| c.count == 0));
    assert_eq!(summary.categories[0].label, "0");
}

#[tokio::test]
async fn test_summary_reviewed_when_all_matched() {
    let titles = vec![title("a", Some("kb-a"), false), title("b", Some("kb-b"), true)];
    let (service, _) = review(loaded_api(titles, 2));

    let summary = assert_ok!(service.summary("udp-1").await);
    assert_eq!(summary.status, ReviewStatus::Reviewed);
}

#[tokio::test]
async fn test_ignore_commits_after_upsert() {
    let mut api = loaded_api(sample_titles(), 4);
    api.expect_upsert_report_titles()
        .times(1)
        .withf(|titles: &[ReportTitle]| {
            titles.len() == 1
                && titles[0].id == "a"
                && titles[0].kb_title_id.is_none()
                && titles[0].kb_manual_match
        })
        .returning(|_| Ok(()));
    let (service, notifier) = review(api);
    let before = assert_ok!(service.summary("udp-1").await).revision;

    let edited = assert_ok!(service.apply_edit("udp-1", "a", MatchAction::Ignore).await);
    assert_eq!(edited.status(), MatchStatus::Ignored);
    assert_eq!(edited.kb_title_name, None);

    let ignored = assert_ok!(service.titles("udp-1", MatchCategory::Ignored).await);
    let ids: Vec<_> = ignored.iter().map(|t| t.title.id.as_str()).collect();
    assert_eq!(ids, ["a", "c"]);
    assert!(ignored.iter().all(|t| !t.pending));

    let summary = assert_ok!(service.summary("udp-1").await);
    assert!(summary.revision > before);

    let note = notifier.last();
    assert_eq!(note.kind, NotificationKind::Success);
    assert_eq!(note.key, "action.ignored");
    assert_eq!(note.values["title"], "Title a");
}

#[tokio::test]
async fn test_failed_upsert_leaves_record_untouched() {
    let mut api = loaded_api(sample_titles(), 4);
    api.expect_upsert_report_titles().returning(|_| {
        Err(AppError::Upstream {
            status: 500,
            body: "database unavailable".into(),
        })
    });
    let (service, notifier) = review(api);

    let action = MatchAction::Assign {
        kb_title_id: "kb-new".into(),
        kb_title_name: "New Match".into(),
    };
    let err = assert_err!(service.apply_edit("udp-1", "b", action).await);
    assert!(matches!(err, AppError::Upstream { status: 500, .. }));

    let unmatched = assert_ok!(service.titles("udp-1", MatchCategory::Unmatched).await);
    let b = unmatched.iter().find(|t| t.title.id == "b").expect("b still unmatched");
    assert_eq!(b.title.kb_title_id, None);
    assert!(!b.title.kb_manual_match);
    assert!(!b.pending);

    let note = notifier.last();
    assert_eq!(note.kind, NotificationKind::Error);
    assert_eq!(note.key, "action.not-edited");
    assert!(note.values["error"].contains("database unavailable"));
}

#[tokio::test]
async fn test_illegal_action_sends_nothing() {
    let mut api = loaded_api(sample_titles(), 4);
    api.expect_upsert_report_titles().never();
    let (service, notifier) = review(api);

    let err = assert_err!(service.apply_edit("udp-1", "b", MatchAction::Unignore).await);
    assert!(matches!(err, AppError::IllegalAction(_)));

    let err = assert_err!(service.apply_edit("udp-1", "c", MatchAction::Ignore).await);
    assert!(matches!(err, AppError::IllegalAction(_)));
    assert!(notifier.keys().is_empty());
}

#[tokio::test]
async fn test_unknown_title() {
    let (service, _) = review(loaded_api(sample_titles(), 4));
    let err = assert_err!(service.apply_edit("udp-1", "zzz", MatchAction::Ignore).await);
    assert!(matches!(err, AppError::TitleNotFound(ref id) if id == "zzz"));
}

#[tokio::test]
async fn test_legal_actions_follow_status() {
    let (service, _) = review(loaded_api(sample_titles(), 4));
    assert_eq!(
        assert_ok!(service.legal_actions("udp-1", "c").await),
        [ActionKind::Assign, ActionKind::Unignore]
    );
    assert_eq!(
        assert_ok!(service.legal_actions("udp-1", "a").await),
        [ActionKind::Assign, ActionKind::Ignore]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_edit_is_pending_until_confirmed() {
    let (entered_tx, entered_rx) = mpsc::channel::<()>();
    let (release_tx, release_rx) = mpsc::channel::<()>();

    let mut api = loaded_api(sample_titles(), 4);
    api.expect_upsert_report_titles().returning(move |_| {
        entered_tx.send(()).unwrap();
        release_rx.recv().unwrap();
        Ok(())
    });
    let (service, _) = review(api);
    assert_ok!(service.load("udp-1").await);

    let editing = service.clone();
    let edit = tokio::spawn(async move { editing.apply_edit("udp-1", "c", MatchAction::Unignore).await });

    tokio::task::spawn_blocking(move || entered_rx.recv().unwrap())
        .await
        .unwrap();

    let unmatched = assert_ok!(service.titles("udp-1", MatchCategory::Unmatched).await);
    let c = unmatched.iter().find(|t| t.title.id == "c").expect("c shown as unmatched");
    assert!(c.pending);

    release_tx.send(()).unwrap();
    assert_ok!(edit.await.unwrap());

    let unmatched = assert_ok!(service.titles("udp-1", MatchCategory::Unmatched).await);
    let c = unmatched.iter().find(|t| t.title.id == "c").unwrap();
    assert!(!c.pending);
}

#[tokio::test]
async fn test_load_more_appends_next_page() {
    let mut api = loaded_api(sample_titles(), 6);
    api.expect_fetch_report_titles()
        .withf(|q| q.offset == 4 && q.provider_id == "udp-1")
        .times(1)
        .returning(|_| Ok(TitlePage::new(vec![title("e", None, false), title("f", Some("kb-f"), false)], 6)));
    let (service, _) = review(api);

    assert_eq!(assert_ok!(service.load_more("udp-1").await), 2);
    let summary = assert_ok!(service.summary("udp-1").await);
    assert!(summary.complete);
    assert_eq!(summary.categories[0].label, "6");

    // everything loaded: no further request
    assert_eq!(assert_ok!(service.load_more("udp-1").await), 0);
}

// ---------------------------------------------------------------------------
// Bulk refresh
// ---------------------------------------------------------------------------

fn counter_reports() -> Vec<CounterReportGroup> {
    serde_json::from_value(json!([
        {
            "year": 2020,
            "reportsPerType": [
                { "reportType": "TR", "counterReports": [{ "id": "z", "yearMonth": "2020-12" }] }
            ]
        },
        {
            "year": 2021,
            "reportsPerType": [
                {
                    "reportType": "TR",
                    "counterReports": [
                        { "id": "a", "yearMonth": "2021-01" },
                        { "id": "b", "yearMonth": "2021-03" }
                    ]
                }
            ]
        }
    ]))
    .unwrap()
}

fn refresh(api: MockEusageApi) -> (RefreshService, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let runner = LongOperationRunner::new(notifier.clone(), Duration::from_secs(5));
    let service = RefreshService::new(Arc::new(api), notifier.clone(), runner);
    (service, notifier)
}

#[tokio::test]
async fn test_refresh_uses_latest_segment() {
    let mut api = MockEusageApi::new();
    api.expect_fetch_counter_reports()
        .returning(|_| Ok(counter_reports()));
    api.expect_update_matches_from_counter()
        .withf(|id: &str| id == "b")
        .times(1)
        .returning(|_| Ok(()));
    let (service, notifier) = refresh(api);

    let (done_tx, done_rx) = tokio::sync::oneshot::channel();
    let started = assert_ok!(
        service
            .update_matches("udp-1", move |outcome| async move {
                let _ = done_tx.send(outcome);
            })
            .await
    );
    assert_eq!(started.segment.id, "b");
    assert_eq!(started.segment.year_month, "2021-03");

    assert_ok!(started.handle.await.unwrap());
    assert_eq!(done_rx.await.unwrap(), OperationOutcome::Completed);
    assert_eq!(
        notifier.keys(),
        ["update-matches.requested", "update-matches.completed"]
    );
    assert_eq!(notifier.last().values["yearMonth"], "2021-03");
}

#[tokio::test]
async fn test_refresh_without_reports_sends_nothing() {
    let mut api = MockEusageApi::new();
    api.expect_fetch_counter_reports().returning(|_| Ok(vec![]));
    api.expect_update_matches_from_counter().never();
    let (service, notifier) = refresh(api);

    let err = assert_err!(service.update_matches("udp-1", |_| async {}).await);
    assert!(matches!(
        err,
        AppError::SegmentLookup(SegmentLookupError::NoRecentReport)
    ));

    let note = notifier.last();
    assert_eq!(note.key, "update-matches.error");
    assert_eq!(note.values["reason"], "no-recent-report");
}

#[tokio::test]
async fn test_refresh_without_title_report() {
    let mut api = MockEusageApi::new();
    api.expect_fetch_counter_reports().returning(|_| {
        Ok(serde_json::from_value(json!([
            { "year": 2021, "reportsPerType": [{ "reportType": "DR", "counterReports": [] }] }
        ]))
        .unwrap())
    });
    api.expect_update_matches_from_counter().never();
    let (service, notifier) = refresh(api);

    let err = assert_err!(service.update_matches("udp-1", |_| async {}).await);
    assert!(matches!(err, AppError::SegmentLookup(SegmentLookupError::NoTrReport)));
    assert_eq!(notifier.last().values["reason"], "no-tr-report");
}

#[tokio::test]
async fn test_refresh_failure_still_completes() {
    let mut api = MockEusageApi::new();
    api.expect_fetch_counter_reports()
        .returning(|_| Ok(counter_reports()));
    api.expect_update_matches_from_counter().returning(|_| {
        Err(AppError::Upstream {
            status: 422,
            body: "unknown counter report".into(),
        })
    });
    let (service, notifier) = refresh(api);

    let (done_tx, done_rx) = tokio::sync::oneshot::channel();
    let started = assert_ok!(
        service
            .update_matches("udp-1", move |outcome| async move {
                let _ = done_tx.send(outcome);
            })
            .await
    );

    assert_err!(started.handle.await.unwrap());
    assert_eq!(done_rx.await.unwrap(), OperationOutcome::Failed);

    let note = notifier.last();
    assert_eq!(note.key, "update-matches.failed");
    assert_eq!(note.kind, NotificationKind::Error);
}

#[tokio::test]
async fn test_refresh_fetch_failure_is_reported() {
    let mut api = MockEusageApi::new();
    api.expect_fetch_counter_reports().returning(|_| {
        Err(AppError::Upstream {
            status: 500,
            body: "erm-usage down".into(),
        })
    });
    api.expect_update_matches_from_counter().never();
    let (service, notifier) = refresh(api);

    let err = assert_err!(service.update_matches("udp-1", |_| async {}).await);
    assert!(matches!(err, AppError::Upstream { status: 500, .. }));

    assert_eq!(notifier.keys(), ["update-matches.failed"]);
    let note = notifier.last();
    assert_eq!(note.kind, NotificationKind::Error);
    assert!(note.values["error"].contains("erm-usage down"));
}

#[tokio::test(start_paused = true)]
async fn test_operation_timeout_fails_and_completes() {
    let notifier = Arc::new(RecordingNotifier::default());
    let runner = LongOperationRunner::new(notifier.clone(), Duration::from_secs(5));

    let (done_tx, done_rx) = oneshot::channel();
    let handle = runner.run(
        "op",
        IndexMap::new(),
        std::future::pending::<AppResult<()>>(),
        move |outcome| async move {
            let _ = done_tx.send(outcome);
        },
    );

    let err = assert_err!(handle.await.unwrap());
    assert!(matches!(err, AppError::Timeout(_)));
    assert_eq!(done_rx.await.unwrap(), OperationOutcome::Failed);
    assert_eq!(notifier.keys(), ["op.requested", "op.failed"]);
}

// ---------------------------------------------------------------------------
// Loading and upsert payloads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_load_failure_is_reported() {
    let mut api = MockEusageApi::new();
    api.expect_fetch_provider().returning(|_| Ok(provider()));
    api.expect_fetch_report_titles().returning(|_| {
        Err(AppError::Upstream {
            status: 503,
            body: "eusage-reports unavailable".into(),
        })
    });
    let (service, notifier) = review(api);

    let err = assert_err!(service.summary("udp-1").await);
    assert!(matches!(err, AppError::Upstream { status: 503, .. }));

    let note = notifier.last();
    assert_eq!(note.key, "report-titles.not-loaded");
    assert_eq!(note.values["providerId"], "udp-1");
    assert!(note.values["error"].contains("eusage-reports unavailable"));
}

#[tokio::test]
async fn test_upsert_sends_unmodeled_fields_back() {
    let fetched: ReportTitle = serde_json::from_value(json!({
        "id": "x",
        "counterReportTitle": "Journal of Extras",
        "kbManualMatch": false,
        "providerId": "udp-1",
        "lastMatched": "2021-01-01",
    }))
    .unwrap();

    let mut api = loaded_api(vec![fetched], 1);
    api.expect_upsert_report_titles()
        .times(1)
        .withf(|titles: &[ReportTitle]| {
            let body = serde_json::to_value(&titles[0]).unwrap();
            body["providerId"] == "udp-1"
                && body["lastMatched"] == "2021-01-01"
                && body["kbManualMatch"] == true
        })
        .returning(|_| Ok(()));
    let (service, _) = review(api);

    let edited = assert_ok!(service.apply_edit("udp-1", "x", MatchAction::Ignore).await);
    assert_eq!(edited.extra["providerId"], "udp-1");
}

/// Mock-backed API whose upserts wait for an explicit verdict, in call order
struct GatedUpserts {
    inner: MockEusageApi,
    gates: Mutex<VecDeque<oneshot::Receiver<AppResult<()>>>>,
}

#[async_trait]
impl EusageApi for GatedUpserts {
    async fn ping(&self) -> AppResult<()> {
        self.inner.ping().await
    }

    async fn fetch_provider(&self, provider_id: &str) -> AppResult<UsageDataProvider> {
        self.inner.fetch_provider(provider_id).await
    }

    async fn fetch_counter_reports(&self, provider_id: &str) -> AppResult<Vec<CounterReportGroup>> {
        self.inner.fetch_counter_reports(provider_id).await
    }

    async fn fetch_report_titles(&self, query: &TitleQuery) -> AppResult<TitlePage> {
        self.inner.fetch_report_titles(query).await
    }

    async fn upsert_report_titles(&self, _titles: &[ReportTitle]) -> AppResult<()> {
        let gate = self.gates.lock().unwrap().pop_front().expect("unexpected upsert");
        gate.await.unwrap_or_else(|_| Err(AppError::Internal("gate dropped".into())))
    }

    async fn update_matches_from_counter(&self, counter_report_id: &str) -> AppResult<()> {
        self.inner.update_matches_from_counter(counter_report_id).await
    }

    async fn fetch_use_over_time(
        &self,
        agreement_id: &str,
        query: &UseOverTimeQuery,
    ) -> AppResult<UseOverTimeReport> {
        self.inner.fetch_use_over_time(agreement_id, query).await
    }

    async fn fetch_reqs_by_pub_year(
        &self,
        agreement_id: &str,
        query: &ReqsByPubYearQuery,
    ) -> AppResult<ReqsByPubYearReport> {
        self.inner.fetch_reqs_by_pub_year(agreement_id, query).await
    }
}

async fn title_b(service: &ReviewService) -> crate::services::review::ReviewedTitle {
    let loaded = service.titles("udp-1", MatchCategory::Loaded).await.unwrap();
    loaded.into_iter().find(|t| t.title.id == "b").unwrap()
}

#[tokio::test]
async fn test_earlier_failure_keeps_later_pending_edit() {
    let (first_tx, first_rx) = oneshot::channel();
    let (second_tx, second_rx) = oneshot::channel();
    let api = GatedUpserts {
        inner: loaded_api(sample_titles(), 4),
        gates: Mutex::new(VecDeque::from([first_rx, second_rx])),
    };
    let notifier = Arc::new(RecordingNotifier::default());
    let service = ReviewService::new(Arc::new(api), notifier.clone(), 200);
    assert_ok!(service.load("udp-1").await);

    let ignoring = service.clone();
    let first = tokio::spawn(async move { ignoring.apply_edit("udp-1", "b", MatchAction::Ignore).await });
    while !title_b(&service).await.pending {
        tokio::task::yield_now().await;
    }
    assert_eq!(title_b(&service).await.status, MatchStatus::Ignored);

    // assigning is legal against the pending ignored copy
    let assigning = service.clone();
    let second = tokio::spawn(async move {
        let action = MatchAction::Assign {
            kb_title_id: "kb-z".into(),
            kb_title_name: "Zeta".into(),
        };
        assigning.apply_edit("udp-1", "b", action).await
    });
    while title_b(&service).await.title.kb_title_id.is_none() {
        tokio::task::yield_now().await;
    }

    first_tx
        .send(Err(AppError::Upstream {
            status: 500,
            body: "stale".into(),
        }))
        .unwrap();
    assert_err!(first.await.unwrap());

    let b = title_b(&service).await;
    assert!(b.pending);
    assert_eq!(b.title.kb_title_id.as_deref(), Some("kb-z"));

    second_tx.send(Ok(())).unwrap();
    assert_ok!(second.await.unwrap());

    let b = title_b(&service).await;
    assert!(!b.pending);
    assert_eq!(b.status, MatchStatus::Matched);
    assert_eq!(b.title.kb_title_id.as_deref(), Some("kb-z"));
    assert_eq!(notifier.keys(), ["action.not-ignored", "action.edited"]);
}

// ---------------------------------------------------------------------------
// Stored reports
// ---------------------------------------------------------------------------

fn reports(api: MockEusageApi) -> (ReportsService, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    (ReportsService::new(Arc::new(api), notifier.clone()), notifier)
}

fn pub_year_query(count_type: &str) -> ReqsByPubYearQuery {
    serde_json::from_value(json!({
        "startDate": "2020-01",
        "endDate": "2021-12",
        "yopInterval": "1Y",
        "countType": count_type
    }))
    .unwrap()
}

#[tokio::test]
async fn test_requests_by_publication_year() {
    let mut api = MockEusageApi::new();
    api.expect_fetch_reqs_by_pub_year()
        .withf(|agreement: &str, query: &ReqsByPubYearQuery| {
            agreement == "ag-1" && query.count_type == CountType::Total
        })
        .times(1)
        .returning(|_, _| {
            Ok(serde_json::from_value(json!({
                "accessCountPeriods": ["2020", "2021"],
                "items": [
                    { "publicationYear": "2019", "metricType": "Total_Item_Requests", "accessCountsByPeriod": [3, 4] },
                    { "publicationYear": "2019", "metricType": "Unique_Item_Requests", "accessCountsByPeriod": [1, 1] }
                ]
            }))
            .unwrap())
        });
    let (service, notifier) = reports(api);

    let chart = assert_ok!(service.requests_by_publication_year("ag-1", &pub_year_query("total")).await);
    assert_eq!(chart.count_type, CountType::Total);
    assert_eq!(chart.series.len(), 1);
    assert_eq!(chart.series[0].total, 7);
    assert!(notifier.keys().is_empty());
}

#[tokio::test]
async fn test_report_range_checked_before_fetch() {
    let mut api = MockEusageApi::new();
    api.expect_fetch_reqs_by_pub_year().never();
    let (service, _) = reports(api);

    let mut query = pub_year_query("unique");
    query.start_date = "2022-01".into();
    let err = assert_err!(service.requests_by_publication_year("ag-1", &query).await);
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_report_failure_is_reported() {
    let mut api = MockEusageApi::new();
    api.expect_fetch_use_over_time().returning(|_, _| {
        Err(AppError::Upstream {
            status: 400,
            body: "agreement has no usage".into(),
        })
    });
    let (service, notifier) = reports(api);

    let query: UseOverTimeQuery =
        serde_json::from_value(json!({ "startDate": "2020-01", "endDate": "2020-12" })).unwrap();
    assert_err!(service.use_over_time("ag-9", &query).await);

    let note = notifier.last();
    assert_eq!(note.key, "use-over-time.not-loaded");
    assert_eq!(note.values["agreementId"], "ag-9");
}
