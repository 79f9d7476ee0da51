use std::collections::BTreeSet;
use std::io::{Read, Seek, SeekFrom};

use serde::Serialize;

use crate::domain::product::Product;
use crate::forms::products::{SaveProductForm, UploadImageForm};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::view::ProductView;
use crate::services::{ServiceError, ServiceResult};
use crate::storage::{MediaStore, StorageError};

/// Catalog counters shown at the top of the admin panel.
#[derive(Debug, Serialize)]
pub struct AdminStats {
    pub total: usize,
    pub featured: usize,
    pub categories: usize,
}

/// Data required to render the admin panel template.
pub struct AdminPageData {
    /// Full catalog, newest first.
    pub products: Vec<ProductView>,
    pub stats: AdminStats,
}

/// Loads the product table and its counters for the admin panel.
pub fn load_admin_page<R>(repo: &R) -> ServiceResult<AdminPageData>
where
    R: ProductReader + ?Sized,
{
    let products = repo.list_products().map_err(ServiceError::from)?;

    let featured = products.iter().filter(|product| product.featured).count();
    let categories: BTreeSet<&str> = products
        .iter()
        .map(|product| product.category.as_str())
        .collect();

    let stats = AdminStats {
        total: products.len(),
        featured,
        categories: categories.len(),
    };

    let products = products.into_iter().map(ProductView::from).collect();

    Ok(AdminPageData { products, stats })
}

/// Creates a product from the submitted admin form.
pub fn create_product<R>(repo: &R, form: SaveProductForm) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let payload = form
        .into_new_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_product(&payload).map_err(ServiceError::from)
}

/// Applies the submitted admin form to an existing product.
///
/// When the edit swaps the image out, the replaced file is deleted from the
/// media store. A failed deletion is logged but never fails the update.
pub fn update_product<R>(
    repo: &R,
    store: &MediaStore,
    product_id: &str,
    form: SaveProductForm,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    let updates = form
        .into_update_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let previous = repo
        .get_product_by_id(product_id)
        .map_err(ServiceError::from)?;

    let updated = repo
        .update_product(product_id, &updates)
        .map_err(ServiceError::from)?;

    if let Some(previous) = previous
        && previous.image != updated.image
        && store.owns(&previous.image)
        && let Err(err) = store.remove(&previous.image)
    {
        log::error!("Failed to remove replaced image {}: {err}", previous.image);
    }

    Ok(updated)
}

/// Deletes a product and its stored image.
pub fn delete_product<R>(repo: &R, store: &MediaStore, product_id: &str) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    let product = repo
        .get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    repo.delete_product(product_id).map_err(ServiceError::from)?;

    if store.owns(&product.image)
        && let Err(err) = store.remove(&product.image)
    {
        log::error!(
            "Failed to remove image {} of deleted product {product_id}: {err}",
            product.image
        );
    }

    Ok(())
}

/// Stores an uploaded image and returns its public URL.
pub fn upload_product_image(store: &MediaStore, mut form: UploadImageForm) -> ServiceResult<String> {
    let file_name = form
        .imagen
        .file_name
        .clone()
        .unwrap_or_else(|| "imagen".to_string());

    let mut bytes = Vec::with_capacity(form.imagen.size);
    form.imagen
        .file
        .as_file_mut()
        .seek(SeekFrom::Start(0))
        .map_err(StorageError::from)?;
    form.imagen
        .file
        .as_file_mut()
        .read_to_end(&mut bytes)
        .map_err(StorageError::from)?;

    let url = store.store(&file_name, &bytes)?;
    Ok(url)
}
