use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};

/// Row shape of the `productos` table. The store schema keeps the original
/// Spanish column names; this module is the single place where they are
/// mapped onto the domain entity and back.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::productos)]
pub struct Producto {
    pub id: String,
    pub titulo: String,
    pub descripcion: String,
    pub informacion: Option<String>,
    pub precio: f64,
    pub imagen: String,
    pub categoria: String,
    pub destacado: bool,
    pub talles_disponibles: Option<String>,
    pub fecha_creacion: NaiveDateTime,
    pub fecha_actualizacion: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::productos)]
pub struct NewProducto<'a> {
    pub id: &'a str,
    pub titulo: &'a str,
    pub descripcion: &'a str,
    pub informacion: Option<&'a str>,
    pub precio: f64,
    pub imagen: &'a str,
    pub categoria: &'a str,
    pub destacado: bool,
    pub talles_disponibles: Option<String>,
    pub fecha_creacion: NaiveDateTime,
    pub fecha_actualizacion: NaiveDateTime,
}

/// Partial changeset. `None` fields are left untouched; the modification
/// timestamp is always refreshed.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::productos)]
pub struct UpdateProducto<'a> {
    pub titulo: Option<&'a str>,
    pub descripcion: Option<&'a str>,
    pub informacion: Option<Option<&'a str>>,
    pub precio: Option<f64>,
    pub imagen: Option<&'a str>,
    pub categoria: Option<&'a str>,
    pub destacado: Option<bool>,
    pub talles_disponibles: Option<Option<String>>,
    pub fecha_actualizacion: NaiveDateTime,
}

/// Encode size labels as a JSON array for storage, `None` when there are none.
fn encode_sizes(sizes: &[String]) -> Option<String> {
    if sizes.is_empty() {
        None
    } else {
        serde_json::to_string(sizes).ok()
    }
}

/// Decode the stored JSON array of size labels. NULL and unreadable cells
/// decode to an empty list rather than failing the whole read.
fn decode_sizes(raw: Option<&str>) -> Vec<String> {
    raw.and_then(|value| serde_json::from_str(value).ok())
        .unwrap_or_default()
}

impl From<Producto> for DomainProduct {
    fn from(value: Producto) -> Self {
        Self {
            id: value.id,
            title: value.titulo,
            description: value.descripcion,
            information: value.informacion,
            price: value.precio,
            image: value.imagen,
            category: value.categoria,
            featured: value.destacado,
            available_sizes: decode_sizes(value.talles_disponibles.as_deref()),
            created_at: value.fecha_creacion,
            updated_at: value.fecha_actualizacion,
        }
    }
}

impl<'a> NewProducto<'a> {
    /// Build an insertable row from the domain payload. The caller supplies
    /// the generated identifier and the insertion timestamp.
    pub fn from_domain(id: &'a str, value: &'a DomainNewProduct, now: NaiveDateTime) -> Self {
        Self {
            id,
            titulo: value.title.as_str(),
            descripcion: value.description.as_str(),
            informacion: value.information.as_deref(),
            precio: value.price,
            imagen: value.image.as_str(),
            categoria: value.category.as_str(),
            destacado: value.featured,
            talles_disponibles: encode_sizes(&value.available_sizes),
            fecha_creacion: now,
            fecha_actualizacion: now,
        }
    }
}

impl<'a> UpdateProducto<'a> {
    /// Build a changeset from the domain patch, refreshing the modification
    /// timestamp to `now`.
    pub fn from_domain(value: &'a DomainUpdateProduct, now: NaiveDateTime) -> Self {
        Self {
            titulo: value.title.as_deref(),
            descripcion: value.description.as_deref(),
            informacion: value.information.as_ref().map(|inner| inner.as_deref()),
            precio: value.price,
            imagen: value.image.as_deref(),
            categoria: value.category.as_deref(),
            destacado: value.featured,
            talles_disponibles: value.available_sizes.as_deref().map(encode_sizes),
            fecha_actualizacion: now,
        }
    }
}
