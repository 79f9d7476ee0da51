use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde_json::json;
use tera::Tera;

use crate::auth::AdminUser;
use crate::forms::products::{SaveProductForm, UploadImageForm};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, admin as admin_service};
use crate::storage::{MediaStore, StorageError};

#[get("/admin")]
pub async fn show_admin(
    _user: AdminUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match admin_service::load_admin_page(repo.get_ref()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "admin");
            context.insert("products", &data.products);
            context.insert("stats", &data.stats);
            render_template(&tera, "admin/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load the admin panel: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/productos")]
pub async fn add_product(
    _user: AdminUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveProductForm>,
) -> impl Responder {
    match admin_service::create_product(repo.get_ref(), form) {
        Ok(product) => {
            FlashMessage::success(format!("Producto «{}» creado.", product.title)).send();
            redirect("/admin")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin")
        }
        Err(err) => {
            log::error!("Failed to create a product: {err}");
            FlashMessage::error("No se pudo crear el producto.").send();
            redirect("/admin")
        }
    }
}

#[post("/admin/productos/{product_id}")]
pub async fn update_product(
    path: web::Path<String>,
    _user: AdminUser,
    repo: web::Data<DieselRepository>,
    store: web::Data<MediaStore>,
    web::Form(form): web::Form<SaveProductForm>,
) -> impl Responder {
    let product_id = path.into_inner();

    match admin_service::update_product(repo.get_ref(), store.get_ref(), &product_id, form) {
        Ok(product) => {
            FlashMessage::success(format!("Producto «{}» actualizado.", product.title)).send();
            redirect("/admin")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Producto no encontrado o ya eliminado.").send();
            redirect("/admin")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin")
        }
        Err(err) => {
            log::error!("Failed to update product {product_id}: {err}");
            FlashMessage::error("No se pudo actualizar el producto.").send();
            redirect("/admin")
        }
    }
}

#[post("/admin/productos/{product_id}/eliminar")]
pub async fn delete_product(
    path: web::Path<String>,
    _user: AdminUser,
    repo: web::Data<DieselRepository>,
    store: web::Data<MediaStore>,
) -> impl Responder {
    let product_id = path.into_inner();

    match admin_service::delete_product(repo.get_ref(), store.get_ref(), &product_id) {
        Ok(()) => {
            FlashMessage::success("Producto eliminado.").send();
            redirect("/admin")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Producto no encontrado o ya eliminado.").send();
            redirect("/admin")
        }
        Err(err) => {
            log::error!("Failed to delete product {product_id}: {err}");
            FlashMessage::error("No se pudo eliminar el producto.").send();
            redirect("/admin")
        }
    }
}

#[post("/admin/imagenes")]
pub async fn upload_image(
    _user: AdminUser,
    store: web::Data<MediaStore>,
    MultipartForm(form): MultipartForm<UploadImageForm>,
) -> impl Responder {
    match admin_service::upload_product_image(store.get_ref(), form) {
        Ok(url) => HttpResponse::Ok().json(json!({ "url": url })),
        Err(ServiceError::Storage(StorageError::UnsupportedType(name))) => {
            HttpResponse::BadRequest().json(json!({
                "error": format!("Tipo de imagen no soportado: {name}"),
            }))
        }
        Err(err) => {
            log::error!("Failed to store an uploaded image: {err}");
            HttpResponse::InternalServerError().json(json!({
                "error": "No se pudo guardar la imagen.",
            }))
        }
    }
}
