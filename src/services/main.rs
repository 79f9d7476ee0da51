use crate::repository::ProductReader;
use crate::services::view::ProductView;
use crate::services::{ServiceError, ServiceResult};

/// Data required to render the storefront home page.
pub struct IndexPageData {
    /// Products shown in the featured carousel, newest first.
    pub featured: Vec<ProductView>,
}

/// Loads the featured carousel for the home page.
pub fn load_index_page<R>(repo: &R) -> ServiceResult<IndexPageData>
where
    R: ProductReader + ?Sized,
{
    let featured = repo
        .list_featured_products()
        .map_err(ServiceError::from)?
        .into_iter()
        .map(ProductView::from)
        .collect();

    Ok(IndexPageData { featured })
}
