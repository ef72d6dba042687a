//! Partition of report titles into review categories

use indexmap::IndexMap;

use crate::models::{MatchCategory, ReportTitle};

/// Category buckets in display order, each preserving input order
pub type TitleCategories<'a, T> = IndexMap<MatchCategory, Vec<&'a T>>;

/// Sort titles into the `loaded`, `matched`, `unmatched` and `ignored` buckets.
///
/// `loaded` is the whole input; every record also lands in exactly one of
/// the three status buckets.
pub fn categorize<T: AsRef<ReportTitle>>(titles: &[T]) -> TitleCategories<'_, T> {
    let mut categories: TitleCategories<'_, T> = MatchCategory::ALL
        .into_iter()
        .map(|category| (category, Vec::new()))
        .collect();

    for title in titles {
        for (category, bucket) in categories.iter_mut() {
            if category.contains(title.as_ref()) {
                bucket.push(title);
            }
        }
    }

    categories
}

impl AsRef<ReportTitle> for ReportTitle {
    fn as_ref(&self) -> &ReportTitle {
        self
    }
}
