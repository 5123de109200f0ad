//! Search, filter, sort and paginate for admin list pages.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::settings::AdminSettings;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Comparable value of one sortable column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Number(i64),
    Text(String),
    Time(DateTime<Utc>),
}

impl SortKey {
    /// Case-insensitive text key.
    pub fn text(s: &str) -> Self {
        SortKey::Text(s.to_lowercase())
    }
}

/// A record that can be shown on an admin list page.
pub trait Listable {
    /// Text matched by the search box.
    fn search_text(&self) -> String;

    /// Whether the record passes a `field = value` filter (status dropdowns,
    /// category pickers). Unknown fields should return `false`.
    fn matches_filter(&self, field: &str, value: &str) -> bool;

    /// Key for a sortable column, `None` when the column is unknown.
    fn sort_key(&self, field: &str) -> Option<SortKey>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub search: String,
    /// `(field, value)` pairs; all must match. An empty value or `"all"`
    /// disables that filter.
    pub filters: Vec<(String, String)>,
    pub sort_by: Option<String>,
    pub direction: SortDirection,
    /// 1-based page number.
    pub page: usize,
    /// 0 means "use the default page size".
    pub page_size: usize,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_by = Some(field.into());
        self.direction = direction;
        self
    }

    pub fn page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

fn filter_active(value: &str) -> bool {
    let v = value.trim();
    !v.is_empty() && !v.eq_ignore_ascii_case("all")
}

/// Run a list query over `items`.
///
/// Sorting is stable; records without a key for the sort column go last in
/// either direction. A page past the end comes back empty with the totals
/// still filled in.
pub fn run_query<T: Listable + Clone>(
    items: &[T],
    query: &ListQuery,
    settings: &AdminSettings,
) -> Page<T> {
    let needle = query.search.trim().to_lowercase();
    let mut matched: Vec<&T> = items
        .iter()
        .filter(|item| needle.is_empty() || item.search_text().to_lowercase().contains(&needle))
        .filter(|item| {
            query
                .filters
                .iter()
                .filter(|(_, value)| filter_active(value))
                .all(|(field, value)| item.matches_filter(field, value.trim()))
        })
        .collect();

    if let Some(field) = query.sort_by.as_deref() {
        matched.sort_by(|a, b| {
            match (a.sort_key(field), b.sort_key(field)) {
                (Some(x), Some(y)) => match query.direction {
                    SortDirection::Asc => x.cmp(&y),
                    SortDirection::Desc => y.cmp(&x),
                },
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        });
    }

    let page_size = settings.clamp_page_size(query.page_size);
    let total_items = matched.len();
    let total_pages = total_items.div_ceil(page_size);
    let page = query.page.max(1);

    let items: Vec<T> = matched
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .cloned()
        .collect();

    debug!(
        total_items,
        page,
        page_size,
        returned = items.len(),
        "list query"
    );

    Page {
        items,
        page,
        page_size,
        total_items,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        status: &'static str,
        qty: Option<i64>,
    }

    impl Listable for Row {
        fn search_text(&self) -> String {
            self.name.to_string()
        }

        fn matches_filter(&self, field: &str, value: &str) -> bool {
            field == "status" && self.status.eq_ignore_ascii_case(value)
        }

        fn sort_key(&self, field: &str) -> Option<SortKey> {
            match field {
                "name" => Some(SortKey::text(self.name)),
                "qty" => self.qty.map(SortKey::Number),
                _ => None,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Wrap Dress", status: "active", qty: Some(4) },
            Row { name: "linen shirt", status: "draft", qty: None },
            Row { name: "Denim Jacket", status: "active", qty: Some(12) },
            Row { name: "Silk Scarf", status: "archived", qty: Some(0) },
            Row { name: "Knit Dress", status: "active", qty: Some(7) },
        ]
    }

    fn settings() -> AdminSettings {
        AdminSettings::default()
    }

    #[test]
    fn search_is_case_insensitive() {
        let page = run_query(&rows(), &ListQuery::new().search("DRESS"), &settings());
        assert_eq!(page.total_items, 2);
    }

    #[test]
    fn filters_combine_and_all_disables() {
        let q = ListQuery::new().search("dress").filter("status", "active");
        assert_eq!(run_query(&rows(), &q, &settings()).total_items, 2);

        let q = ListQuery::new().filter("status", "All");
        assert_eq!(run_query(&rows(), &q, &settings()).total_items, 5);

        let q = ListQuery::new().filter("color", "red");
        assert_eq!(run_query(&rows(), &q, &settings()).total_items, 0);
    }

    #[test]
    fn sort_puts_missing_keys_last() {
        let q = ListQuery::new().sort("qty", SortDirection::Desc);
        let names: Vec<_> = run_query(&rows(), &q, &settings())
            .items
            .iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(
            names,
            vec!["Denim Jacket", "Knit Dress", "Wrap Dress", "Silk Scarf", "linen shirt"]
        );

        let q = ListQuery::new().sort("name", SortDirection::Asc);
        let first = run_query(&rows(), &q, &settings()).items[0].name;
        assert_eq!(first, "Denim Jacket");
    }

    #[test]
    fn unknown_sort_field_keeps_input_order() {
        let q = ListQuery::new().sort("nope", SortDirection::Desc);
        assert_eq!(run_query(&rows(), &q, &settings()).items, rows());
    }

    #[test]
    fn paginates_with_totals() {
        let q = ListQuery::new().page(2, 2);
        let page = run_query(&rows(), &q, &settings());
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].name, "Denim Jacket");
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next());
        assert!(page.has_previous());

        let past = run_query(&rows(), &ListQuery::new().page(9, 2), &settings());
        assert!(past.items.is_empty());
        assert_eq!(past.total_items, 5);

        let zero = run_query(&rows(), &ListQuery::new().page(0, 2), &settings());
        assert_eq!(zero.page, 1);
    }

    #[test]
    fn empty_input_has_zero_pages() {
        let page = run_query::<Row>(&[], &ListQuery::new(), &settings());
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: walking every page yields each matched record exactly once.
            #[test]
            fn pages_partition_results(n in 0usize..60, size in 1usize..15) {
                let items: Vec<Row> = (0..n)
                    .map(|i| Row { name: "Tee", status: "active", qty: Some(i as i64) })
                    .collect();
                let s = settings();
                let first = run_query(&items, &ListQuery::new().page(1, size), &s);
                let mut seen = Vec::new();
                for p in 1..=first.total_pages {
                    let page = run_query(&items, &ListQuery::new().page(p, size), &s);
                    seen.extend(page.items.into_iter().map(|r| r.qty));
                }
                prop_assert_eq!(seen.len(), n);
                prop_assert_eq!(seen, items.iter().map(|r| r.qty).collect::<Vec<_>>());
            }
        }
    }
}
