//! Interactive search session over a catalog.
//!
//! [`Explorer`] is the single owner of the mutable browsing state: the
//! current [`FilterSpec`], the page index and the pending search-box input.
//! The catalog itself is read-only; every page is recomputed from scratch
//! through [`query::search`].

use std::time::{Duration, Instant};

use crate::catalog::Catalog;
use crate::debounce::Debouncer;
use crate::query::{self, FilterSpec, ResultPage};
use crate::record::{CanonicalRecord, RecordId, RecordType};

pub struct Explorer {
    catalog: Catalog,
    filter: FilterSpec,
    page_index: usize,
    page_size: usize,
    query_input: Debouncer<String>,
}

impl Explorer {
    pub fn new(catalog: Catalog, page_size: usize, quiet_period: Duration) -> Self {
        Self {
            catalog,
            filter: FilterSpec::default(),
            page_index: 1,
            page_size: page_size.max(1),
            query_input: Debouncer::new(quiet_period),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replace the catalog after a data reload. Filters are kept; the page
    /// index goes back to 1.
    pub fn reload(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.page_index = 1;
    }

    // ── Filters ─────────────────────────────────────────────────────────

    /// Set the search text immediately. Any debounced input still pending
    /// is discarded.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query_input.flush();
        self.filter.query = query.into();
        self.page_index = 1;
    }

    pub fn set_type(&mut self, record_type: Option<RecordType>) {
        self.filter.record_type = record_type;
        self.page_index = 1;
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.filter.category = category;
        self.page_index = 1;
    }

    pub fn set_language(&mut self, language: Option<String>) {
        self.filter.language = language;
        self.page_index = 1;
    }

    pub fn set_filter(&mut self, filter: FilterSpec) {
        self.query_input.flush();
        self.filter = filter;
        self.page_index = 1;
    }

    pub fn clear_filters(&mut self) {
        self.set_filter(FilterSpec::default());
    }

    // ── Debounced search box ────────────────────────────────────────────

    /// Record a keystroke's worth of search text. It takes effect on a later
    /// [`poll`](Self::poll) once input has been quiet long enough.
    pub fn input_query(&mut self, text: impl Into<String>, now: Instant) {
        self.query_input.push(text.into(), now);
    }

    /// Apply pending search text whose quiet period has elapsed.
    ///
    /// Returns `true` when the query changed and a new page should be shown.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.query_input.poll(now) {
            Some(text) => {
                self.filter.query = text;
                self.page_index = 1;
                true
            }
            None => false,
        }
    }

    /// Whether search text is waiting out its quiet period.
    pub fn has_pending_input(&self) -> bool {
        self.query_input.is_pending()
    }

    // ── Pagination ──────────────────────────────────────────────────────

    /// Total pages for the current filter, at least 1.
    pub fn total_pages(&self) -> usize {
        query::total_pages(query::count_matches(&self.catalog, &self.filter), self.page_size)
    }

    /// Move to page `page`. Out-of-range requests leave the page unchanged.
    ///
    /// Returns whether the page changed.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() || page == self.page_index {
            return false;
        }
        self.page_index = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.page_index + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        match self.page_index.checked_sub(1) {
            Some(page) => self.go_to_page(page),
            None => false,
        }
    }

    // ── Views ───────────────────────────────────────────────────────────

    pub fn current_page(&self) -> ResultPage<'_> {
        query::search(&self.catalog, &self.filter, self.page_index, self.page_size)
    }

    /// Detail lookup for a record shown on a page.
    pub fn record(&self, id: RecordId) -> Option<&CanonicalRecord> {
        self.catalog.get(id)
    }
}
