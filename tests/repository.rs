use std::collections::HashSet;
use std::thread::sleep;
use std::time::Duration;

use tienda_diablos::domain::product::{NewProduct, ProductFilter, UpdateProduct};
use tienda_diablos::pagination::PageRequest;
use tienda_diablos::repository::errors::RepositoryError;
use tienda_diablos::repository::{DieselRepository, ProductReader, ProductWriter};

mod common;

// Creation timestamps are assigned by the store. A short pause keeps them
// distinct when a test depends on insertion order.
fn pause() {
    sleep(Duration::from_millis(5));
}

#[test]
fn test_product_repository_crud() {
    let test_db = common::TestDb::new("test_product_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_product(
            &NewProduct::new(
                "Camiseta Titular 2024",
                "Camiseta oficial del club",
                89990.0,
                "Camisetas",
            )
            .with_information("Tecnología de última generación")
            .with_image("/media/productos/titular.jpg")
            .with_sizes(["S", "M", "L", "XL"])
            .featured(),
        )
        .unwrap();

    assert!(!created.id.is_empty());
    assert_eq!(created.title, "Camiseta Titular 2024");
    assert_eq!(created.available_sizes, ["S", "M", "L", "XL"]);
    assert!(created.featured);

    let fetched = repo
        .get_product_by_id(&created.id)
        .unwrap()
        .expect("created product must be readable");
    assert_eq!(fetched, created);

    let updates = UpdateProduct::new()
        .title("Camiseta Titular 2025")
        .price(99990.0)
        .information(None::<String>);
    let updated = repo.update_product(&created.id, &updates).unwrap();

    assert_eq!(updated.title, "Camiseta Titular 2025");
    assert_eq!(updated.price, 99990.0);
    assert_eq!(updated.information, None);
    // Untouched fields survive a partial patch.
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.available_sizes, created.available_sizes);
    assert!(updated.updated_at >= created.updated_at);
    assert_eq!(updated.created_at, created.created_at);

    let err = repo
        .update_product("missing-id", &UpdateProduct::new().title("x"))
        .expect_err("updating an unknown id must fail");
    assert!(matches!(err, RepositoryError::NotFound));

    repo.delete_product(&created.id).unwrap();
    assert!(repo.get_product_by_id(&created.id).unwrap().is_none());

    let err = repo
        .delete_product(&created.id)
        .expect_err("deleting twice must fail");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_listings_are_newest_first() {
    let test_db = common::TestDb::new("test_listings_are_newest_first.db");
    let repo = DieselRepository::new(test_db.pool());

    for title in ["Primero", "Segundo", "Tercero"] {
        repo.create_product(&NewProduct::new(title, "Producto", 1000.0, "Varios"))
            .unwrap();
        pause();
    }

    let titles: Vec<String> = repo
        .list_products()
        .unwrap()
        .into_iter()
        .map(|product| product.title)
        .collect();

    assert_eq!(titles, ["Tercero", "Segundo", "Primero"]);
}

#[test]
fn test_featured_listing_caps_at_eight_newest() {
    let test_db = common::TestDb::new("test_featured_listing_caps_at_eight_newest.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_product(&NewProduct::new("Comun", "Producto", 1000.0, "Varios"))
        .unwrap();
    pause();

    for n in 1..=12 {
        repo.create_product(
            &NewProduct::new(format!("Destacado {n:02}"), "Producto", 1000.0, "Varios").featured(),
        )
        .unwrap();
        pause();
    }

    let featured = repo.list_featured_products().unwrap();

    assert_eq!(featured.len(), 8);
    assert!(featured.iter().all(|product| product.featured));
    let titles: Vec<&str> = featured.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles[0], "Destacado 12");
    assert_eq!(titles[7], "Destacado 05");
}

#[test]
fn test_page_walk_covers_every_record_once() {
    let test_db = common::TestDb::new("test_page_walk_covers_every_record_once.db");
    let repo = DieselRepository::new(test_db.pool());

    for n in 0..25 {
        repo.create_product(&NewProduct::new(
            format!("Producto {n:02}"),
            "Producto",
            1000.0,
            "Varios",
        ))
        .unwrap();
    }

    let filter = ProductFilter::new();
    let mut seen = HashSet::new();
    let mut offset = 0;

    loop {
        let page = repo
            .search_products_page(&filter, PageRequest { limit: 10, offset })
            .unwrap();
        assert_eq!(page.total, 25);

        for product in &page.items {
            assert!(seen.insert(product.id.clone()), "no record repeats");
        }

        if !page.has_more {
            break;
        }
        assert_eq!(page.next_offset, offset + 10);
        offset = page.next_offset;
    }

    assert_eq!(seen.len(), 25, "every record appears exactly once");
}

#[test]
fn test_native_predicates_combine_on_the_server_side() {
    let test_db = common::TestDb::new("test_native_predicates_combine.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_product(&NewProduct::new("Camiseta", "Producto", 1000.0, "Camisetas").featured())
        .unwrap();
    repo.create_product(&NewProduct::new("Gorra", "Producto", 1000.0, "Accesorios"))
        .unwrap();
    repo.create_product(&NewProduct::new("Bufanda", "Producto", 1000.0, "Accesorios").featured())
        .unwrap();

    let filter = ProductFilter::new().category("Accesorios").featured(true);
    let page = repo
        .search_products_page(&filter, PageRequest::first(10))
        .unwrap();

    assert_eq!(page.total, 1, "count runs with both predicates");
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].title, "Bufanda");
    assert!(page.items[0].featured);
    assert!(!page.has_more);
}

#[test]
fn test_post_filter_trims_the_window_but_keeps_native_totals() {
    let test_db = common::TestDb::new("test_post_filter_trims_the_window.db");
    let repo = DieselRepository::new(test_db.pool());

    let titles = [
        "Camiseta Titular",
        "Camiseta Suplente",
        "Short Oficial",
        "Bufanda",
        "Gorra",
    ];
    for title in titles {
        repo.create_product(&NewProduct::new(title, "Producto", 1000.0, "Oficial"))
            .unwrap();
    }

    let filter = ProductFilter::new().category("Oficial").search("camiseta");
    let page = repo
        .search_products_page(&filter, PageRequest::first(10))
        .unwrap();

    assert_eq!(page.items.len(), 2, "search trims the fetched window");
    assert!(
        page.items
            .iter()
            .all(|product| product.title.starts_with("Camiseta"))
    );
    // Totals count the native window, not the post-filtered one.
    assert_eq!(page.total, 5);
    assert!(!page.has_more);
}

#[test]
fn test_price_bounds_are_inclusive() {
    let test_db = common::TestDb::new("test_price_bounds_are_inclusive.db");
    let repo = DieselRepository::new(test_db.pool());

    for (title, price) in [("Barato", 100.0), ("Medio", 200.0), ("Caro", 300.0)] {
        repo.create_product(&NewProduct::new(title, "Producto", price, "Varios"))
            .unwrap();
    }

    let filter = ProductFilter::new().min_price(100.0).max_price(300.0);
    let all = repo.search_products(&filter).unwrap();
    assert_eq!(all.len(), 3, "bounds include their endpoints");

    let filter = ProductFilter::new().min_price(150.0);
    let some: Vec<String> = repo
        .search_products(&filter)
        .unwrap()
        .into_iter()
        .map(|product| product.title)
        .collect();
    assert_eq!(some.len(), 2);
    assert!(some.contains(&"Medio".to_string()));
    assert!(some.contains(&"Caro".to_string()));
}

#[test]
fn test_distinct_categories_are_sorted() {
    let test_db = common::TestDb::new("test_distinct_categories_are_sorted.db");
    let repo = DieselRepository::new(test_db.pool());

    for category in ["Shorts", "Accesorios", "Camisetas", "Accesorios"] {
        repo.create_product(&NewProduct::new("Producto", "Producto", 1000.0, category))
            .unwrap();
    }

    let categories = repo.list_categories().unwrap();

    assert_eq!(categories, ["Accesorios", "Camisetas", "Shorts"]);
}

#[test]
fn test_negative_prices_are_rejected() {
    let test_db = common::TestDb::new("test_negative_prices_are_rejected.db");
    let repo = DieselRepository::new(test_db.pool());

    let err = repo
        .create_product(&NewProduct::new("Producto", "Producto", -1.0, "Varios"))
        .expect_err("negative price must be rejected");
    assert!(matches!(err, RepositoryError::Validation(_)));

    let created = repo
        .create_product(&NewProduct::new("Producto", "Producto", 1000.0, "Varios"))
        .unwrap();

    let err = repo
        .update_product(&created.id, &UpdateProduct::new().price(-0.01))
        .expect_err("negative price must be rejected");
    assert!(matches!(err, RepositoryError::Validation(_)));

    let unchanged = repo
        .get_product_by_id(&created.id)
        .unwrap()
        .expect("product must survive a rejected update");
    assert_eq!(unchanged.price, 1000.0);
    assert_eq!(unchanged.updated_at, created.updated_at);
}
