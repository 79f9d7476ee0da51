use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Maximum number of products surfaced by the featured carousel. Fixed
/// business rule, not configurable per call.
pub const FEATURED_LIMIT: i64 = 8;

/// Domain representation of a single catalog product.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    /// Store-assigned identifier, opaque to callers and immutable.
    pub id: String,
    /// Display title shown in listings and on the detail page.
    pub title: String,
    /// Short description shown in listings.
    pub description: String,
    /// Optional long-form text shown on the detail page.
    pub information: Option<String>,
    /// Price in the store currency. Never negative.
    pub price: f64,
    /// Public URL of the product image, may be empty.
    pub image: String,
    /// Freeform category label. Not a foreign key.
    pub category: String,
    /// Whether the product appears in the homepage carousel.
    pub featured: bool,
    /// Ordered size labels offered for the product.
    pub available_sizes: Vec<String>,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new product. The store assigns the
/// identifier and both timestamps on insert.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Display title shown in listings and on the detail page.
    pub title: String,
    /// Short description shown in listings.
    pub description: String,
    /// Optional long-form text shown on the detail page.
    pub information: Option<String>,
    /// Price in the store currency. Never negative.
    pub price: f64,
    /// Public URL of the product image, may be empty.
    pub image: String,
    /// Freeform category label.
    pub category: String,
    /// Whether the product appears in the homepage carousel.
    pub featured: bool,
    /// Ordered size labels offered for the product.
    pub available_sizes: Vec<String>,
}

impl NewProduct {
    /// Build a new product payload with the supplied required details.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            information: None,
            price,
            image: String::new(),
            category: category.into(),
            featured: false,
            available_sizes: Vec::new(),
        }
    }

    /// Attach long-form informational text to the payload.
    pub fn with_information(mut self, information: impl Into<String>) -> Self {
        self.information = Some(information.into());
        self
    }

    /// Attach an image URL to the payload.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Mark the product for inclusion in the featured carousel.
    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    /// Attach the available size labels to the payload.
    pub fn with_sizes<I, S>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.available_sizes = sizes.into_iter().map(Into::into).collect();
        self
    }
}

/// Patch data applied when updating an existing product. Fields left as
/// `None` are not touched; the store refreshes the modification timestamp.
#[derive(Debug, Clone, Default)]
pub struct UpdateProduct {
    /// Optional title update.
    pub title: Option<String>,
    /// Optional description update.
    pub description: Option<String>,
    /// Optional informational text update, using `None` to clear it.
    pub information: Option<Option<String>>,
    /// Optional price update.
    pub price: Option<f64>,
    /// Optional image URL update.
    pub image: Option<String>,
    /// Optional category update.
    pub category: Option<String>,
    /// Optional featured flag update.
    pub featured: Option<bool>,
    /// Optional replacement of the size labels.
    pub available_sizes: Option<Vec<String>>,
}

impl UpdateProduct {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the product title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Update the product description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Update the informational text, using `None` to clear an existing value.
    pub fn information(mut self, information: Option<impl Into<String>>) -> Self {
        self.information = Some(information.map(|value| value.into()));
        self
    }

    /// Update the product price.
    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Update the image URL.
    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Update the category label.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Show or hide the product in the featured carousel.
    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    /// Replace the available size labels.
    pub fn sizes<I, S>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.available_sizes = Some(sizes.into_iter().map(Into::into).collect());
        self
    }
}

/// Search criteria applied when listing catalog products.
///
/// Category and the featured flag translate into native query predicates.
/// The search term and price bounds cannot be expressed by the store query
/// and are applied in memory to each fetched page instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Optional exact category match.
    pub category: Option<String>,
    /// Optional exact featured-flag match.
    pub featured: Option<bool>,
    /// Optional case-insensitive substring match on title or description.
    pub search: Option<String>,
    /// Optional inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Optional inclusive upper price bound.
    pub max_price: Option<f64>,
}

impl ProductFilter {
    /// Construct an empty filter that matches every product.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the results to an exact category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restrict the results by the featured flag.
    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    /// Restrict the results by a search term applied to the title or description.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Restrict the results to prices at or above `min_price`.
    pub fn min_price(mut self, min_price: f64) -> Self {
        self.min_price = Some(min_price);
        self
    }

    /// Restrict the results to prices at or below `max_price`.
    pub fn max_price(mut self, max_price: f64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    /// Whether any predicate must be applied in memory after the fetch.
    pub fn has_local_predicates(&self) -> bool {
        self.search.is_some() || self.min_price.is_some() || self.max_price.is_some()
    }

    /// Apply the in-memory predicates to a single product.
    pub fn matches_local(&self, product: &Product) -> bool {
        if let Some(term) = &self.search {
            let needle = term.to_lowercase();
            if !product.title.to_lowercase().contains(&needle)
                && !product.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(min_price) = self.min_price
            && product.price < min_price
        {
            return false;
        }
        if let Some(max_price) = self.max_price
            && product.price > max_price
        {
            return false;
        }
        true
    }

    /// Drop the products that fail the in-memory predicates, preserving the
    /// relative order of the survivors.
    pub fn retain_local(&self, products: &mut Vec<Product>) {
        if self.has_local_predicates() {
            products.retain(|product| self.matches_local(product));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(title: &str, description: &str, price: f64) -> Product {
        let now = chrono::Local::now().naive_utc();
        Product {
            id: "p1".to_string(),
            title: title.to_string(),
            description: description.to_string(),
            information: None,
            price,
            image: String::new(),
            category: "Camisetas".to_string(),
            featured: false,
            available_sizes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn search_is_case_insensitive_across_title_and_description() {
        let titular = product("Camiseta Titular 2024", "Version oficial", 45000.0);
        let short = product("Short de juego", "Incluye camiseta de regalo", 20000.0);
        let socks = product("Medias", "Par de medias rojas", 8000.0);

        for term in ["camiseta", "CAMISETA"] {
            let filter = ProductFilter::new().search(term);
            assert!(filter.matches_local(&titular));
            assert!(filter.matches_local(&short));
            assert!(!filter.matches_local(&socks));
        }
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let filter = ProductFilter::new().min_price(100.0).max_price(200.0);

        assert!(filter.matches_local(&product("A", "d", 100.0)));
        assert!(filter.matches_local(&product("B", "d", 200.0)));
        assert!(!filter.matches_local(&product("C", "d", 99.99)));
        assert!(!filter.matches_local(&product("D", "d", 200.01)));
    }

    #[test]
    fn inverted_price_bounds_match_nothing() {
        let filter = ProductFilter::new().min_price(500.0).max_price(100.0);

        for price in [50.0, 100.0, 300.0, 500.0, 900.0] {
            assert!(!filter.matches_local(&product("A", "d", price)));
        }
    }

    #[test]
    fn retain_local_is_stable_and_skips_without_predicates() {
        let mut products = vec![
            product("Camiseta", "d", 10.0),
            product("Gorra", "d", 20.0),
            product("Camiseta suplente", "d", 30.0),
        ];

        ProductFilter::new().retain_local(&mut products);
        assert_eq!(products.len(), 3);

        ProductFilter::new()
            .search("camiseta")
            .retain_local(&mut products);
        let titles: Vec<&str> = products.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Camiseta", "Camiseta suplente"]);
    }
}
