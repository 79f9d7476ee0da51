use mockall::mock;

use super::{ProductReader, ProductWriter};
use crate::domain::product::{NewProduct, Product, ProductFilter, UpdateProduct};
use crate::pagination::{Page, PageRequest};
use crate::repository::errors::RepositoryResult;

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: &str) -> RepositoryResult<Option<Product>>;
        fn list_products(&self) -> RepositoryResult<Vec<Product>>;
        fn list_featured_products(&self) -> RepositoryResult<Vec<Product>>;
        fn search_products(&self, filter: &ProductFilter) -> RepositoryResult<Vec<Product>>;
        fn search_products_page(&self, filter: &ProductFilter, page: PageRequest) -> RepositoryResult<Page<Product>>;
        fn list_categories(&self) -> RepositoryResult<Vec<String>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: &str, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: &str) -> RepositoryResult<()>;
    }
}
