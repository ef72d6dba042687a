//! Title-match review logic
//!
//! Pure functions behind the review workflow: sorting loaded titles into
//! categories, computing manual match edits, choosing the COUNTER segment a
//! bulk match update starts from and deriving the overall review status.
//! Nothing here performs I/O.

pub mod classifier;
pub mod edit;
pub mod segment;
pub mod status;

pub use classifier::{categorize, TitleCategories};
pub use edit::{apply_action, legal_actions, ActionKind, ActionTag, IllegalAction, MatchAction};
pub use segment::{most_recent_segment, SegmentLookupError, TITLE_REPORT};
pub use status::{derive_status, ReviewStatus};
