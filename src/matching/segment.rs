//! Selection of the COUNTER segment a bulk match update starts from

use thiserror::Error;

use crate::models::{CounterReportGroup, CounterReportSegment};

/// Report type of COUNTER title reports
pub const TITLE_REPORT: &str = "TR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SegmentLookupError {
    #[error("No recent COUNTER report found")]
    NoRecentReport,
    #[error("The most recent COUNTER report has no title report (TR)")]
    NoTrReport,
    #[error("The title report has no dated segments")]
    NoSegment,
}

impl SegmentLookupError {
    /// Stable code used in notifications and error bodies
    pub fn code(self) -> &'static str {
        match self {
            SegmentLookupError::NoRecentReport => "no-recent-report",
            SegmentLookupError::NoTrReport => "no-tr-report",
            SegmentLookupError::NoSegment => "no-segment",
        }
    }
}

/// Latest title-report segment: newest year, then its `TR` report, then the
/// newest `yearMonth` in it.
///
/// Ties are not meaningful. The first year group and the first segment
/// holding the maximum are kept, while the last `TR` report of a year wins.
pub fn most_recent_segment(
    groups: &[CounterReportGroup],
) -> Result<&CounterReportSegment, SegmentLookupError> {
    let newest = groups
        .iter()
        .reduce(|best, group| if group.year > best.year { group } else { best })
        .ok_or(SegmentLookupError::NoRecentReport)?;

    let title_report = newest
        .reports_per_type
        .iter()
        .rev()
        .find(|report| report.report_type == TITLE_REPORT)
        .ok_or(SegmentLookupError::NoTrReport)?;

    title_report
        .counter_reports
        .iter()
        .reduce(|best, segment| {
            if segment.year_month > best.year_month {
                segment
            } else {
                best
            }
        })
        .ok_or(SegmentLookupError::NoSegment)
}
