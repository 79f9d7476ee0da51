use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template};
use crate::services::main as main_service;

#[get("/")]
pub async fn show_index(
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match main_service::load_index_page(repo.get_ref()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "index");
            context.insert("featured", &data.featured);
            render_template(&tera, "main/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load the home page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
