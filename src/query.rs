//! Filtering, text search and pagination over a [`Catalog`].
//!
//! Everything here is a pure function of the catalog, a [`FilterSpec`] and
//! the requested page. Results keep catalog order; there is no relevance
//! ranking.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::record::{CanonicalRecord, RecordType};

/// Records per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// The user's current search text and filters.
///
/// A filter that is `None` or `Some("")` matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Case-insensitive substring matched against name, description,
    /// author and tags. Trimmed before use.
    #[serde(default)]
    pub query: String,
    #[serde(default, rename = "type")]
    pub record_type: Option<RecordType>,
    /// Raw category slug.
    #[serde(default)]
    pub category: Option<String>,
    /// GitHub primary language, exact match.
    #[serde(default)]
    pub language: Option<String>,
}

impl FilterSpec {
    /// Whether no field restricts the result set.
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
            && self.record_type.is_none()
            && set(&self.category).is_none()
            && set(&self.language).is_none()
    }

    /// Whether `record` satisfies every active filter.
    pub fn matches(&self, record: &CanonicalRecord) -> bool {
        self.matcher().matches(record)
    }

    fn matcher(&self) -> Matcher<'_> {
        Matcher {
            needle: self.query.trim().to_lowercase(),
            record_type: self.record_type,
            category: set(&self.category),
            language: set(&self.language),
        }
    }
}

fn set(filter: &Option<String>) -> Option<&str> {
    filter.as_deref().filter(|v| !v.is_empty())
}

/// A [`FilterSpec`] prepared for one search pass.
struct Matcher<'a> {
    needle: String,
    record_type: Option<RecordType>,
    category: Option<&'a str>,
    language: Option<&'a str>,
}

impl Matcher<'_> {
    fn matches(&self, record: &CanonicalRecord) -> bool {
        if let Some(wanted) = self.record_type {
            if record.record_type != wanted {
                return false;
            }
        }
        if let Some(wanted) = self.category {
            if record.category.as_deref() != Some(wanted) {
                return false;
            }
        }
        if let Some(wanted) = self.language {
            if record.language() != Some(wanted) {
                return false;
            }
        }
        self.matches_text(record)
    }

    fn matches_text(&self, record: &CanonicalRecord) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        let name = if record.display_name.is_empty() {
            record.name.as_deref().unwrap_or("")
        } else {
            record.display_name.as_str()
        };
        [
            name,
            record.description_or_empty(),
            record.author_name.as_str(),
            record.tags_or_empty(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

/// One page of search results plus pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ResultPage<'a> {
    /// At most `page_size` records, in catalog order.
    pub items: Vec<&'a CanonicalRecord>,
    /// Number of records matching the filter across all pages.
    pub total_count: usize,
    /// 1-based, always within `1..=total_pages`.
    pub page_index: usize,
    /// At least 1, even with no matches.
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl ResultPage<'_> {
    /// The single empty page returned when nothing can match.
    pub fn empty() -> Self {
        ResultPage {
            items: Vec::new(),
            total_count: 0,
            page_index: 1,
            total_pages: 1,
            has_prev: false,
            has_next: false,
        }
    }
}

/// Page number from an untrusted request parameter.
///
/// Anything that is not a non-negative integer reads as page 1. Range
/// clamping is left to [`search`].
pub fn parse_page_index(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok()).unwrap_or(1)
}

/// Number of pages for `count` matches: `ceil(count / page_size)`, at least 1.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Every record matching `spec`, in catalog order.
pub fn filter<'a>(catalog: &'a Catalog, spec: &FilterSpec) -> Vec<&'a CanonicalRecord> {
    let matcher = spec.matcher();
    catalog.iter().filter(|r| matcher.matches(r)).collect()
}

/// Number of records matching `spec`.
pub fn count_matches(catalog: &Catalog, spec: &FilterSpec) -> usize {
    let matcher = spec.matcher();
    catalog.iter().filter(|r| matcher.matches(r)).count()
}

/// Filter the catalog and cut out one page.
///
/// `page_index` is clamped into `1..=total_pages`; a `page_size` of 0 is
/// treated as 1.
pub fn search<'a>(
    catalog: &'a Catalog,
    spec: &FilterSpec,
    page_index: usize,
    page_size: usize,
) -> ResultPage<'a> {
    let page_size = page_size.max(1);
    let matches = filter(catalog, spec);
    let total_count = matches.len();
    let total_pages = total_pages(total_count, page_size);
    let page_index = page_index.clamp(1, total_pages);

    let items = matches
        .into_iter()
        .skip((page_index - 1) * page_size)
        .take(page_size)
        .collect();

    ResultPage {
        items,
        total_count,
        page_index,
        total_pages,
        has_prev: page_index > 1,
        has_next: page_index < total_pages,
    }
}
