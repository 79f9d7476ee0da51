use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template};
use crate::services::ServiceError;
use crate::services::product as product_service;

#[get("/producto/{product_id}")]
pub async fn show_product(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let product_id = path.into_inner();

    match product_service::load_product_page(repo.get_ref(), &product_id) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "product");
            context.insert("product", &data.product);
            context.insert("related", &data.related);
            render_template(&tera, "product/detail.html", &context)
        }
        Err(ServiceError::NotFound) => {
            let context = base_context(&flash_messages, "product");
            match tera.render("product/not_found.html", &context) {
                Ok(body) => HttpResponse::NotFound()
                    .content_type(ContentType::html())
                    .body(body),
                Err(err) => {
                    log::error!("Failed to render the not-found page: {err}");
                    HttpResponse::NotFound().finish()
                }
            }
        }
        Err(err) => {
            log::error!("Failed to load product {product_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
