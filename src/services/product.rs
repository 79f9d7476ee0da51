use crate::domain::product::ProductFilter;
use crate::repository::ProductReader;
use crate::services::view::ProductView;
use crate::services::{ServiceError, ServiceResult};

/// Number of same-category products shown under the detail view.
const RELATED_LIMIT: usize = 4;

/// Data required to render the product detail template.
pub struct ProductPageData {
    pub product: ProductView,
    /// Other products from the same category, newest first.
    pub related: Vec<ProductView>,
}

/// Loads one product plus its related picks.
pub fn load_product_page<R>(repo: &R, product_id: &str) -> ServiceResult<ProductPageData>
where
    R: ProductReader + ?Sized,
{
    let product = repo
        .get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let filter = ProductFilter::new().category(&product.category);
    let related: Vec<ProductView> = repo
        .search_products(&filter)
        .map_err(ServiceError::from)?
        .into_iter()
        .filter(|candidate| candidate.id != product.id)
        .take(RELATED_LIMIT)
        .map(ProductView::from)
        .collect();

    Ok(ProductPageData {
        product: ProductView::from(product),
        related,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::product::Product;
    use crate::repository::mock::MockProductReader;

    fn fixed_datetime() -> NaiveDateTime {
        match NaiveDate::from_ymd_opt(2024, 1, 1) {
            Some(date) => date.and_hms_opt(0, 0, 0).unwrap_or_default(),
            None => NaiveDateTime::default(),
        }
    }

    fn sample_product(id: &str, category: &str) -> Product {
        Product {
            id: id.to_string(),
            title: format!("Producto {id}"),
            description: "Producto oficial".to_string(),
            information: None,
            price: 25000.0,
            image: String::new(),
            category: category.to_string(),
            featured: false,
            available_sizes: Vec::new(),
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    #[test]
    fn load_product_page_excludes_the_product_itself_from_related() {
        let mut repo = MockProductReader::new();

        repo.expect_get_product_by_id()
            .times(1)
            .withf(|id| id == "p-1")
            .returning(|_| Ok(Some(sample_product("p-1", "Camisetas"))));

        repo.expect_search_products()
            .times(1)
            .withf(|filter| filter.category.as_deref() == Some("Camisetas"))
            .returning(|_| {
                Ok(vec![
                    sample_product("p-1", "Camisetas"),
                    sample_product("p-2", "Camisetas"),
                    sample_product("p-3", "Camisetas"),
                ])
            });

        let result = load_product_page(&repo, "p-1");

        let data = match result {
            Ok(value) => value,
            Err(err) => panic!("expected success, got error: {err}"),
        };

        assert_eq!(data.product.id, "p-1");
        let related_ids: Vec<&str> = data.related.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(related_ids, ["p-2", "p-3"]);
    }

    #[test]
    fn load_product_page_caps_related_picks() {
        let mut repo = MockProductReader::new();

        repo.expect_get_product_by_id()
            .times(1)
            .returning(|_| Ok(Some(sample_product("p-1", "Camisetas"))));

        repo.expect_search_products().times(1).returning(|_| {
            Ok((2..=9)
                .map(|n| sample_product(&format!("p-{n}"), "Camisetas"))
                .collect())
        });

        let result = load_product_page(&repo, "p-1");

        let data = match result {
            Ok(value) => value,
            Err(err) => panic!("expected success, got error: {err}"),
        };

        assert_eq!(data.related.len(), RELATED_LIMIT);
    }

    #[test]
    fn load_product_page_reports_missing_products() {
        let mut repo = MockProductReader::new();

        repo.expect_get_product_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let result = load_product_page(&repo, "missing");

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
