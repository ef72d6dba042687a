//! Data models for the eUsage review service

pub mod counter_report;
pub mod notification;
pub mod provider;
pub mod report_title;
pub mod reqs_by_pub_year;
pub mod use_over_time;

// Re-export commonly used types
pub use counter_report::{CounterReportGroup, CounterReportSegment, ReportsPerType};
pub use notification::{Notification, NotificationKind};
pub use provider::UsageDataProvider;
pub use report_title::{MatchCategory, MatchStatus, ReportTitle, TitlePage, TitleQuery};
pub use reqs_by_pub_year::{CountType, ReqsByPubYearItem, ReqsByPubYearQuery, ReqsByPubYearReport};
pub use use_over_time::{UseOverTimeItem, UseOverTimeQuery, UseOverTimeReport};
