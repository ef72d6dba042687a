//! Overall review status of a provider's titles

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewStatus {
    NoRecords,
    Reviewed,
    Pending,
}

/// `no-records` when nothing is loaded, `pending` while any title is
/// unmatched, `reviewed` otherwise.
pub fn derive_status(total: usize, unmatched: usize) -> ReviewStatus {
    if total == 0 {
        ReviewStatus::NoRecords
    } else if unmatched == 0 {
        ReviewStatus::Reviewed
    } else {
        ReviewStatus::Pending
    }
}
