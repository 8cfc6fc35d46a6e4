//! Paginated table view model.
//!
//! Owns the current [`PageQuery`] for one table and the last page loaded
//! from its [`PageSource`]. Filter changes reset to the first page; a failed
//! load keeps the previous rows on screen and records the error text.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::client::ApiError;
use crate::domain::{PageQuery, Paginated, PaginationMeta};

/// Anything that can fetch one page of a table.
#[async_trait]
pub trait PageSource<T>: Send + Sync {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Paginated<T>, ApiError>;
}

/// [`PageSource`] backed by a closure.
pub struct FnPageSource<T, F> {
    fetch: F,
    _marker: PhantomData<fn() -> T>,
}

/// Wrap a closure `Fn(PageQuery) -> Future<Result<Paginated<T>>>` as a page source.
pub fn page_source_fn<T, F, Fut>(fetch: F) -> FnPageSource<T, F>
where
    F: Fn(PageQuery) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Paginated<T>, ApiError>> + Send,
{
    FnPageSource {
        fetch,
        _marker: PhantomData,
    }
}

#[async_trait]
impl<T, F, Fut> PageSource<T> for FnPageSource<T, F>
where
    T: Send,
    F: Fn(PageQuery) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Paginated<T>, ApiError>> + Send,
{
    async fn fetch_page(&self, query: &PageQuery) -> Result<Paginated<T>, ApiError> {
        (self.fetch)(query.clone()).await
    }
}

/// What a table renders.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

impl<T> PageView<T> {
    fn empty(query: &PageQuery) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: query.page,
            page_size: query.page_size,
            total_pages: 0,
        }
    }

    fn from_page(page: Paginated<T>) -> Self {
        let PaginationMeta {
            page: current,
            page_size,
            total,
        } = page.pagination;
        Self {
            total_pages: page.pagination.total_pages(),
            items: page.items,
            total,
            page: current,
            page_size,
        }
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages
    }
}

pub struct PaginatedQuery<T> {
    source: Arc<dyn PageSource<T>>,
    query: PageQuery,
    view: PageView<T>,
    /// The query changed since `view` was loaded
    stale: bool,
    loading: bool,
    error: Option<String>,
}

impl<T: Send> PaginatedQuery<T> {
    pub fn new(source: Arc<dyn PageSource<T>>, page_size: u32) -> Self {
        let query = PageQuery::new(1, page_size);
        Self {
            view: PageView::empty(&query),
            source,
            query,
            stale: false,
            loading: false,
            error: None,
        }
    }

    pub fn query(&self) -> &PageQuery {
        &self.query
    }

    pub fn view(&self) -> &PageView<T> {
        &self.view
    }

    pub fn items(&self) -> &[T] {
        &self.view.items
    }

    pub fn total(&self) -> u64 {
        self.view.total
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_page(&mut self, page: u32) {
        self.query.page = page.max(1);
        self.stale = true;
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        let status = self.query.status.take();
        let search = self.query.search.take();
        self.query = PageQuery {
            status,
            search,
            ..PageQuery::new(1, page_size)
        };
        self.stale = true;
    }

    pub fn set_status(&mut self, status: Option<String>) {
        self.query.status = None;
        if let Some(status) = status {
            self.query = self.query.clone().with_status(status);
        }
        self.query.page = 1;
        self.stale = true;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query = self.query.clone().with_search(search);
        self.query.page = 1;
        self.stale = true;
    }

    /// Fetch the page for the current query.
    pub async fn load(&mut self) -> Result<&PageView<T>, ApiError> {
        self.loading = true;
        let result = self.source.fetch_page(&self.query).await;
        self.loading = false;

        match result {
            Ok(page) => {
                self.view = PageView::from_page(page);
                self.stale = false;
                self.error = None;
                Ok(&self.view)
            }
            Err(err) => {
                tracing::warn!(error = %err, page = self.query.page, "Failed to load page");
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Step forward from the current query. A pending filter change is
    /// loaded first so the bound comes from the filtered table.
    pub async fn next_page(&mut self) -> Result<&PageView<T>, ApiError> {
        if self.stale {
            self.load().await?;
        }
        if self.view.has_next() {
            self.query.page = self.view.page + 1;
        }
        self.load().await
    }

    pub async fn prev_page(&mut self) -> Result<&PageView<T>, ApiError> {
        self.query.page = self.query.page.saturating_sub(1).max(1);
        self.load().await
    }
}
