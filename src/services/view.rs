use serde::Serialize;

use crate::domain::product::Product;

/// Product prepared for page templates.
#[derive(Debug, Serialize)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub information: Option<String>,
    pub price: f64,
    /// Price with thousands separators, ready for display.
    pub price_formatted: String,
    pub image: String,
    pub category: String,
    pub featured: bool,
    pub available_sizes: Vec<String>,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        let price_formatted = format_price(product.price);

        Self {
            id: product.id,
            title: product.title,
            description: product.description,
            information: product.information,
            price: product.price,
            price_formatted,
            image: product.image,
            category: product.category,
            featured: product.featured,
            available_sizes: product.available_sizes,
        }
    }
}

/// Formats a price the way the storefront shows it, grouping thousands with
/// dots.
pub fn format_price(price: f64) -> String {
    let whole = price.round() as i64;
    let digits = whole.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if whole < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
