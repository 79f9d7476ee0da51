use crate::db::{DbConnection, DbPool};
use crate::domain::product::{NewProduct, Product, ProductFilter, UpdateProduct};
use crate::pagination::{Page, PageRequest};
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod product;

#[cfg(test)]
pub mod mock;

/// Diesel-backed store adapter that wraps an r2d2 pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over the product catalog.
///
/// Every listing is ordered newest first (creation timestamp descending,
/// identifier descending as tiebreak).
pub trait ProductReader {
    /// Point lookup. Absence is `Ok(None)`, not an error.
    fn get_product_by_id(&self, id: &str) -> RepositoryResult<Option<Product>>;
    fn list_products(&self) -> RepositoryResult<Vec<Product>>;
    /// Carousel picks. Capped at the newest [`FEATURED_LIMIT`] featured
    /// records no matter how many exist.
    ///
    /// [`FEATURED_LIMIT`]: crate::domain::product::FEATURED_LIMIT
    fn list_featured_products(&self) -> RepositoryResult<Vec<Product>>;
    fn search_products(&self, filter: &ProductFilter) -> RepositoryResult<Vec<Product>>;
    /// One native window of the filtered listing. `total` and `has_more`
    /// count the native matches; in-memory predicates only shrink `items`.
    fn search_products_page(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> RepositoryResult<Page<Product>>;
    /// Distinct category labels, sorted ascending. Derived from a full scan.
    fn list_categories(&self) -> RepositoryResult<Vec<String>>;
}

/// Write operations over the product catalog.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(&self, product_id: &str, updates: &UpdateProduct)
    -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: &str) -> RepositoryResult<()>;
}
