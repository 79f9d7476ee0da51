use std::collections::BTreeSet;

use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::product::{
    FEATURED_LIMIT, NewProduct as DomainNewProduct, Product as DomainProduct, ProductFilter,
    UpdateProduct as DomainUpdateProduct,
};
use crate::models::product::{NewProducto, Producto, UpdateProducto};
use crate::pagination::{Page, PageRequest};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ProductReader, ProductWriter};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: &str) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::productos;

        let mut conn = self.conn()?;
        let product = productos::table
            .filter(productos::id.eq(id))
            .first::<Producto>(&mut conn)
            .optional()?;

        Ok(product.map(Into::into))
    }

    fn list_products(&self) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::productos;

        let mut conn = self.conn()?;
        let rows = productos::table
            .order((productos::fecha_creacion.desc(), productos::id.desc()))
            .load::<Producto>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn list_featured_products(&self) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::productos;

        let mut conn = self.conn()?;
        let rows = productos::table
            .filter(productos::destacado.eq(true))
            .order((productos::fecha_creacion.desc(), productos::id.desc()))
            .limit(FEATURED_LIMIT)
            .load::<Producto>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn search_products(&self, filter: &ProductFilter) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::productos;

        let mut conn = self.conn()?;

        let mut items = productos::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category) = filter.category.as_ref() {
            items = items.filter(productos::categoria.eq(category));
        }
        if let Some(featured) = filter.featured {
            items = items.filter(productos::destacado.eq(featured));
        }

        let rows = items
            .order((productos::fecha_creacion.desc(), productos::id.desc()))
            .load::<Producto>(&mut conn)?;

        let mut products: Vec<DomainProduct> = rows.into_iter().map(Into::into).collect();
        filter.retain_local(&mut products);

        Ok(products)
    }

    fn search_products_page(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> RepositoryResult<Page<DomainProduct>> {
        use crate::schema::productos;

        let mut conn = self.conn()?;

        let limit = page.limit.max(0);
        let offset = page.offset.max(0);

        let mut count_query = productos::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category) = filter.category.as_ref() {
            count_query = count_query.filter(productos::categoria.eq(category));
        }
        if let Some(featured) = filter.featured {
            count_query = count_query.filter(productos::destacado.eq(featured));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)?;

        let mut items = productos::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category) = filter.category.as_ref() {
            items = items.filter(productos::categoria.eq(category));
        }
        if let Some(featured) = filter.featured {
            items = items.filter(productos::destacado.eq(featured));
        }

        let rows = items
            .order((productos::fecha_creacion.desc(), productos::id.desc()))
            .offset(offset)
            .limit(limit)
            .load::<Producto>(&mut conn)?;

        let next_offset = offset + rows.len() as i64;
        let has_more = next_offset < total;

        let mut products: Vec<DomainProduct> = rows.into_iter().map(Into::into).collect();
        filter.retain_local(&mut products);

        Ok(Page {
            items: products,
            total,
            has_more,
            next_offset,
        })
    }

    fn list_categories(&self) -> RepositoryResult<Vec<String>> {
        use crate::schema::productos;

        let mut conn = self.conn()?;
        let labels = productos::table
            .select(productos::categoria)
            .load::<String>(&mut conn)?;

        let distinct: BTreeSet<String> = labels.into_iter().collect();
        Ok(distinct.into_iter().collect())
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::productos;

        validate_new_product(new_product)?;

        let mut conn = self.conn()?;
        let id = Uuid::new_v4().to_string();
        let now = chrono::Local::now().naive_utc();
        let db_new = NewProducto::from_domain(&id, new_product, now);

        let created = diesel::insert_into(productos::table)
            .values(&db_new)
            .get_result::<Producto>(&mut conn)?;

        Ok(created.into())
    }

    fn update_product(
        &self,
        product_id: &str,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::productos;

        validate_update_product(updates)?;

        let mut conn = self.conn()?;
        let now = chrono::Local::now().naive_utc();
        let db_updates = UpdateProducto::from_domain(updates, now);

        let target = productos::table.filter(productos::id.eq(product_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<Producto>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_product(&self, product_id: &str) -> RepositoryResult<()> {
        use crate::schema::productos;

        let mut conn = self.conn()?;

        let target = productos::table.filter(productos::id.eq(product_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

fn validate_new_product(new_product: &DomainNewProduct) -> RepositoryResult<()> {
    if new_product.title.trim().is_empty() {
        return Err(RepositoryError::Validation("title is required".to_string()));
    }
    if new_product.description.trim().is_empty() {
        return Err(RepositoryError::Validation(
            "description is required".to_string(),
        ));
    }
    if new_product.category.trim().is_empty() {
        return Err(RepositoryError::Validation(
            "category is required".to_string(),
        ));
    }
    validate_price(new_product.price)
}

fn validate_update_product(updates: &DomainUpdateProduct) -> RepositoryResult<()> {
    if let Some(title) = updates.title.as_deref()
        && title.trim().is_empty()
    {
        return Err(RepositoryError::Validation(
            "title cannot be empty".to_string(),
        ));
    }
    if let Some(description) = updates.description.as_deref()
        && description.trim().is_empty()
    {
        return Err(RepositoryError::Validation(
            "description cannot be empty".to_string(),
        ));
    }
    if let Some(category) = updates.category.as_deref()
        && category.trim().is_empty()
    {
        return Err(RepositoryError::Validation(
            "category cannot be empty".to_string(),
        ));
    }
    if let Some(price) = updates.price {
        validate_price(price)?;
    }
    Ok(())
}

fn validate_price(price: f64) -> RepositoryResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(RepositoryError::Validation(format!(
            "price must be a non-negative number, got {price}"
        )));
    }
    Ok(())
}
