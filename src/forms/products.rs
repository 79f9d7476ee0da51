use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidateUrl, ValidationErrors};

use crate::domain::product::{NewProduct, UpdateProduct};
use crate::routes::empty_string_as_none;

/// Maximum allowed length for a product title.
const TITLE_MAX_LEN: usize = 128;
const TITLE_MAX_LEN_VALIDATOR: u64 = TITLE_MAX_LEN as u64;

/// Maximum allowed length for a category label.
const CATEGORY_MAX_LEN: usize = 64;
const CATEGORY_MAX_LEN_VALIDATOR: u64 = CATEGORY_MAX_LEN as u64;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided title is empty after sanitization.
    #[error("product title cannot be empty")]
    EmptyTitle,
    /// The provided description is empty after sanitization.
    #[error("product description cannot be empty")]
    EmptyDescription,
    /// The provided category is empty after sanitization.
    #[error("product category cannot be empty")]
    EmptyCategory,
    /// The image reference is neither a URL nor a stored media path.
    #[error("invalid image reference `{value}`")]
    InvalidImage { value: String },
}

/// Form payload emitted by the admin product editor. The same form backs
/// both the create and the edit flow; field names match the store schema.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveProductForm {
    /// Title entered by the user.
    #[validate(length(min = 1, max = TITLE_MAX_LEN_VALIDATOR))]
    pub titulo: String,
    /// Short description shown in listings.
    #[validate(length(min = 1))]
    pub descripcion: String,
    /// Optional long-form text (empty string clears it).
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub informacion: Option<String>,
    /// Price in the store currency.
    #[validate(range(min = 0.0))]
    pub precio: f64,
    /// Image URL or stored media path (empty string clears it).
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub imagen: Option<String>,
    /// Category label.
    #[validate(length(min = 1, max = CATEGORY_MAX_LEN_VALIDATOR))]
    pub categoria: String,
    /// Featured-carousel checkbox.
    #[serde(default)]
    pub destacado: Option<bool>,
    /// Comma-separated size labels.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub talles: Option<String>,
}

impl SaveProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let title = sanitize_inline_text(&self.titulo);
        if title.is_empty() {
            return Err(ProductFormError::EmptyTitle);
        }

        let description = sanitize_multiline_text(&self.descripcion);
        if description.is_empty() {
            return Err(ProductFormError::EmptyDescription);
        }

        let category = sanitize_inline_text(&self.categoria);
        if category.is_empty() {
            return Err(ProductFormError::EmptyCategory);
        }

        let information = self
            .informacion
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty());

        let image = sanitize_image_reference(self.imagen.as_deref())?;

        let mut new_product = NewProduct::new(title, description, self.precio, category);

        if let Some(information) = information {
            new_product = new_product.with_information(information);
        }

        if let Some(image) = image {
            new_product = new_product.with_image(image);
        }

        if self.destacado.unwrap_or(false) {
            new_product = new_product.featured();
        }

        let sizes = parse_size_labels(self.talles.as_deref());
        if !sizes.is_empty() {
            new_product = new_product.with_sizes(sizes);
        }

        Ok(new_product)
    }

    /// Validates and sanitizes the payload into a domain `UpdateProduct`.
    ///
    /// The editor posts every field, so the resulting patch replaces the
    /// whole record; an empty `informacion` or `imagen` clears the stored
    /// value.
    pub fn into_update_product(self) -> ProductFormResult<UpdateProduct> {
        self.validate()?;

        let title = sanitize_inline_text(&self.titulo);
        if title.is_empty() {
            return Err(ProductFormError::EmptyTitle);
        }

        let description = sanitize_multiline_text(&self.descripcion);
        if description.is_empty() {
            return Err(ProductFormError::EmptyDescription);
        }

        let category = sanitize_inline_text(&self.categoria);
        if category.is_empty() {
            return Err(ProductFormError::EmptyCategory);
        }

        let information = self
            .informacion
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty());

        let image = sanitize_image_reference(self.imagen.as_deref())?;

        let updates = UpdateProduct::new()
            .title(title)
            .description(description)
            .information(information)
            .price(self.precio)
            .image(image.unwrap_or_default())
            .category(category)
            .featured(self.destacado.unwrap_or(false))
            .sizes(parse_size_labels(self.talles.as_deref()));

        Ok(updates)
    }
}

/// Multipart form for uploading a product image.
#[derive(MultipartForm)]
pub struct UploadImageForm {
    /// Uploaded image file.
    #[multipart(limit = "10MB")]
    pub imagen: TempFile,
}

fn sanitize_image_reference(input: Option<&str>) -> ProductFormResult<Option<String>> {
    let Some(raw) = input else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    // Accepts absolute URLs and the store-relative paths handed back by the
    // image upload endpoint.
    if trimmed.starts_with('/') || trimmed.validate_url() {
        return Ok(Some(trimmed.to_string()));
    }

    Err(ProductFormError::InvalidImage {
        value: trimmed.to_string(),
    })
}

/// Split a comma-separated size list into sanitized, deduplicated labels.
fn parse_size_labels(input: Option<&str>) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    let Some(raw) = input else {
        return labels;
    };

    for token in raw.split(',') {
        let label = sanitize_inline_text(token);
        if !label.is_empty() && !labels.contains(&label) {
            labels.push(label);
        }
    }

    labels
}

fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

fn sanitize_multiline_text(input: &str) -> String {
    let mut lines: Vec<String> = input.lines().map(sanitize_inline_text).collect();

    while matches!(lines.first(), Some(line) if line.is_empty()) {
        lines.remove(0);
    }

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        return String::new();
    }

    let mut result = Vec::with_capacity(lines.len());
    let mut previous_empty = false;
    for line in lines {
        let is_empty = line.is_empty();
        if is_empty {
            if previous_empty {
                continue;
            }
            previous_empty = true;
            result.push(String::new());
        } else {
            previous_empty = false;
            result.push(line);
        }
    }

    result.join("\n")
}
