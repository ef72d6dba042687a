//! Usage report presentation helpers

pub mod pub_year;
pub mod use_over_time;

pub use pub_year::{requests_by_publication_year, PublicationYearChart, PublicationYearSeries};
pub use use_over_time::{use_over_time_table, UseOverTimeRow, UseOverTimeTable};
