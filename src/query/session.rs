use super::{
    matches_filters, run_query, total_pages_for, FilterOptions, QueryPage, SortConfig, SortKey,
};
use crate::models::SkuRecord;

/// Stateful view over a record set: filters, sort, current page, plus a
/// generation counter that keeps late fetch results from landing on a
/// view that has moved on.
#[derive(Debug)]
pub struct CatalogSession {
    records: Vec<SkuRecord>,
    filters: FilterOptions,
    sort: SortConfig,
    page: usize,
    generation: u64,
}

/// Ties an in-flight fetch to the session state it started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

impl Default for CatalogSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogSession {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            filters: FilterOptions::default(),
            sort: SortConfig::default(),
            page: 1,
            generation: 0,
        }
    }

    /// Mark the start of a fetch. Any ticket issued earlier becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Invalidate every outstanding ticket, e.g. on teardown.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Install fetched records if the ticket is still current, snapping
    /// back to the first page. A stale ticket's records are dropped so a
    /// slow fetch cannot clobber a newer view; returns whether the
    /// records were installed.
    pub fn commit_records(&mut self, ticket: FetchTicket, records: Vec<SkuRecord>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale fetch result"
            );
            return false;
        }
        self.records = records;
        self.page = 1;
        true
    }

    pub fn records(&self) -> &[SkuRecord] {
        &self.records
    }

    pub fn filters(&self) -> &FilterOptions {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: FilterOptions) {
        self.filters = filters;
        self.page = 1;
    }

    pub fn sort(&self) -> SortConfig {
        self.sort
    }

    pub fn set_sort(&mut self, sort: SortConfig) {
        self.sort = sort;
        self.page = 1;
    }

    /// Reselecting the current key flips direction; a new key starts
    /// ascending. Either way the view snaps back to the first page.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort.key == key {
            self.sort.direction = self.sort.direction.toggled();
        } else {
            self.sort = SortConfig::ascending(key);
        }
        self.page = 1;
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Move to a page, clamped to the filtered result's page range.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages());
    }

    pub fn total_pages(&self) -> usize {
        let count = self
            .records
            .iter()
            .filter(|record| matches_filters(record, &self.filters))
            .count();
        total_pages_for(count)
    }

    /// The current page under the current filters and sort.
    pub fn current_page(&self) -> QueryPage {
        run_query(&self.records, &self.filters, &self.sort, self.page)
    }
}
