use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template};
use crate::services::catalog::{self as catalog_service, CatalogQuery};

#[get("/catalogo")]
pub async fn show_catalog(
    params: web::Query<CatalogQuery>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::load_catalog_page(repo.get_ref(), params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "catalog");
            context.insert("products", &data.products);
            context.insert("categories", &data.categories);
            context.insert("has_more", &data.has_more);
            context.insert("total", &data.total);
            context.insert("fetch_error", &data.error);
            context.insert("next_pages", &(data.pages + 1));
            context.insert("query", &data.query);
            render_template(&tera, "catalog/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load the catalog page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
