use serde::{Deserialize, Serialize};

use crate::domain::product::ProductFilter;
use crate::feed::CatalogFeed;
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::repository::ProductReader;
use crate::routes::empty_string_as_none;
use crate::services::view::ProductView;
use crate::services::{ServiceError, ServiceResult};

/// Upper bound on the windows replayed for a single request.
const MAX_PAGES: usize = 50;

/// Query parameters accepted by the catalog page.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CatalogQuery {
    /// Free text matched against title and description.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub search: Option<String>,
    /// Exact category filter.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub categoria: Option<String>,
    /// Inclusive lower price bound.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub precio_min: Option<f64>,
    /// Inclusive upper price bound.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub precio_max: Option<f64>,
    /// Restrict the listing to featured products.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub destacado: Option<bool>,
    /// Number of windows the listing has loaded so far.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub pages: Option<usize>,
}

impl CatalogQuery {
    fn filter(&self) -> ProductFilter {
        let mut filter = ProductFilter::new();

        if let Some(value) = self.categoria.as_ref() {
            filter = filter.category(value);
        }
        if let Some(value) = self.destacado {
            filter = filter.featured(value);
        }
        if let Some(value) = self.search.as_ref() {
            filter = filter.search(value);
        }
        if let Some(value) = self.precio_min {
            filter = filter.min_price(value);
        }
        if let Some(value) = self.precio_max {
            filter = filter.max_price(value);
        }

        filter
    }
}

/// Data required to render the catalog template.
pub struct CatalogPageData {
    /// Accumulated products across the loaded windows.
    pub products: Vec<ProductView>,
    /// Distinct category labels for the filter bar.
    pub categories: Vec<String>,
    /// Whether a further window can still be loaded.
    pub has_more: bool,
    /// Exact number of native matches for the current filter.
    pub total: i64,
    /// Message of the last failed fetch, shown as a banner.
    pub error: Option<String>,
    /// Number of windows actually loaded.
    pub pages: usize,
    /// Raw query echoed back to the template.
    pub query: CatalogQuery,
}

/// Loads the catalog listing, replaying the windows the client has
/// accumulated so far.
///
/// A failed fetch is not an error at this level: the page still renders with
/// whatever the feed holds plus an error banner.
pub fn load_catalog_page<R>(repo: &R, query: CatalogQuery) -> ServiceResult<CatalogPageData>
where
    R: ProductReader + ?Sized,
{
    let pages = query.pages.unwrap_or(1).clamp(1, MAX_PAGES);

    let mut feed = CatalogFeed::new(DEFAULT_PAGE_SIZE);
    let request = feed.reset(query.filter());
    feed.run(repo, request);

    for _ in 1..pages {
        match feed.load_more() {
            Some(request) => feed.run(repo, request),
            None => break,
        }
    }

    let categories = repo.list_categories().map_err(ServiceError::from)?;

    if let Some(err) = feed.error.as_ref() {
        log::error!("Catalog fetch failed: {err}");
    }

    let products = feed.items.into_iter().map(ProductView::from).collect();

    Ok(CatalogPageData {
        products,
        categories,
        has_more: feed.has_more,
        total: feed.total,
        error: feed.error,
        pages,
        query,
    })
}
