use crate::domain::product::{Product, ProductFilter};
use crate::pagination::{DEFAULT_PAGE_SIZE, Page, PageRequest};
use crate::repository::ProductReader;
use crate::repository::errors::RepositoryResult;

/// Lifecycle of a [`CatalogFeed`] with respect to an outstanding fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    /// No fetch has been issued yet.
    Idle,
    /// A fetch is outstanding; further triggers are ignored.
    Loading,
    /// The last fetch completed, successfully or not.
    Loaded,
}

/// Whether a fetch replaces the accumulated list or extends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchKind {
    Reset,
    More,
}

/// One fetch handed out by [`CatalogFeed`]. The generation ties the eventual
/// response back to the feed epoch that issued it.
#[derive(Debug, Clone)]
pub struct FeedRequest {
    generation: u64,
    kind: FetchKind,
    /// Filter the fetch must run with.
    pub filter: ProductFilter,
    /// Native window the fetch must request.
    pub page: PageRequest,
}

/// Client-side paging state for a product listing with load-more semantics.
///
/// The feed does not query the store itself. It hands out [`FeedRequest`]
/// descriptions and consumes their outcomes through [`CatalogFeed::complete`],
/// so the at-most-one-outstanding-fetch rule and the stale-response guard
/// hold regardless of how the fetch is executed. [`CatalogFeed::run`] covers
/// the common synchronous path.
#[derive(Debug, Clone)]
pub struct CatalogFeed {
    /// Accumulated products, in fetch order.
    pub items: Vec<Product>,
    /// Exact number of native matches reported by the last fetch.
    pub total: i64,
    /// Whether another window can still be requested.
    pub has_more: bool,
    /// Fetch lifecycle state.
    pub state: FeedState,
    /// Message of the last failed fetch, cleared by the next success.
    pub error: Option<String>,
    filter: ProductFilter,
    page_size: i64,
    offset: i64,
    generation: u64,
}

impl Default for CatalogFeed {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl CatalogFeed {
    /// Create an empty feed that fetches `page_size` records per window.
    pub fn new(page_size: i64) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            has_more: false,
            state: FeedState::Idle,
            error: None,
            filter: ProductFilter::new(),
            page_size: page_size.max(1),
            offset: 0,
            generation: 0,
        }
    }

    /// Discard the accumulated list and start over with `filter`.
    ///
    /// Permitted in every state, including while a fetch is outstanding: the
    /// generation bump makes the superseded response fall on the floor when
    /// it eventually arrives. Pages fetched under different filters are never
    /// mixed.
    pub fn reset(&mut self, filter: ProductFilter) -> FeedRequest {
        self.items.clear();
        self.total = 0;
        self.has_more = false;
        self.error = None;
        self.offset = 0;
        self.filter = filter;
        self.generation += 1;
        self.state = FeedState::Loading;

        FeedRequest {
            generation: self.generation,
            kind: FetchKind::Reset,
            filter: self.filter.clone(),
            page: PageRequest::first(self.page_size),
        }
    }

    /// Request the next window, or `None` while a fetch is outstanding or the
    /// listing is exhausted. Rapid repeat triggers collapse into one fetch.
    pub fn load_more(&mut self) -> Option<FeedRequest> {
        if self.state == FeedState::Loading || !self.has_more {
            return None;
        }
        self.state = FeedState::Loading;

        Some(FeedRequest {
            generation: self.generation,
            kind: FetchKind::More,
            filter: self.filter.clone(),
            page: PageRequest {
                limit: self.page_size,
                offset: self.offset,
            },
        })
    }

    /// Feed the outcome of `request` back in.
    ///
    /// Responses from a superseded generation are dropped without touching
    /// any state. A failure keeps the accumulated list and `has_more` as they
    /// were and records the error for display, so a retry stays possible.
    pub fn complete(&mut self, request: &FeedRequest, result: RepositoryResult<Page<Product>>) {
        if request.generation != self.generation || self.state != FeedState::Loading {
            return;
        }

        match result {
            Ok(page) => {
                match request.kind {
                    FetchKind::Reset => self.items = page.items,
                    FetchKind::More => self.items.extend(page.items),
                }
                self.total = page.total;
                self.offset = page.next_offset;
                self.has_more = page.has_more;
                self.error = None;
                self.state = FeedState::Loaded;
            }
            Err(err) => {
                self.error = Some(err.to_string());
                self.state = FeedState::Loaded;
            }
        }
    }

    /// Execute `request` against `repo` and feed the outcome back in.
    pub fn run<R>(&mut self, repo: &R, request: FeedRequest)
    where
        R: ProductReader + ?Sized,
    {
        let result = repo.search_products_page(&request.filter, request.page);
        self.complete(&request, result);
    }
}
