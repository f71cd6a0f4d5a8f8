//! Generic paginated lister shared by every list endpoint.
//!
//! Unauthenticated callers get an empty page rather than an error.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{AccessGuard, DomainResult, RecordStore, SearchFilter};
use crate::shared::{PageRequest, PageResult};

/// How `total_matching` is computed for a non-empty query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchCount {
    /// Number of rows on the fetched page. Historic behaviour; makes the
    /// page count collapse to the current page on filtered searches.
    #[default]
    PageLocal,
    /// A separate filtered count across all pages.
    Global,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSettings {
    pub page_size: u32,
    pub match_count: MatchCount,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            page_size: 10,
            match_count: MatchCount::PageLocal,
        }
    }
}

pub struct Lister<R> {
    store: Arc<dyn RecordStore<Record = R>>,
    settings: ListSettings,
}

impl<R> Clone for Lister<R> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            settings: self.settings,
        }
    }
}

impl<R: Send + Sync + 'static> Lister<R> {
    pub fn new(store: Arc<dyn RecordStore<Record = R>>, settings: ListSettings) -> Self {
        Self { store, settings }
    }

    /// Page request using the configured page size.
    pub fn request(&self, query: &str, page: u32) -> PageRequest {
        PageRequest::new(query, page, self.settings.page_size)
    }

    pub async fn list(
        &self,
        guard: &dyn AccessGuard,
        request: &PageRequest,
    ) -> DomainResult<PageResult<R>> {
        if guard.principal().await.is_none() {
            debug!("list requested without a principal, returning empty page");
            return Ok(PageResult::empty(request));
        }

        let filter = SearchFilter::from_query(&request.query);
        let items = self
            .store
            .find_many(
                &filter,
                self.store.default_order(),
                request.offset(),
                Some(request.limit()),
            )
            .await?;

        let total = match (&filter, self.settings.match_count) {
            (SearchFilter::All, _) => self.store.count(&SearchFilter::All).await?,
            (_, MatchCount::PageLocal) => items.len() as u64,
            (_, MatchCount::Global) => self.store.count(&filter).await?,
        };

        debug!(
            query = %request.query,
            page = request.page,
            page_size = request.page_size,
            returned = items.len(),
            total,
            "listed records"
        );
        Ok(PageResult::new(items, total, request))
    }

    /// Everything, label ascending, for dropdowns. Empty without a principal.
    pub async fn options(&self, guard: &dyn AccessGuard) -> DomainResult<Vec<R>> {
        if guard.principal().await.is_none() {
            return Ok(Vec::new());
        }
        self.store
            .find_many(
                &SearchFilter::All,
                crate::domain::ListOrder::LabelAscending,
                0,
                None,
            )
            .await
    }
}
