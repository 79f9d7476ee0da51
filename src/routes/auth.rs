use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AdminUser;
use crate::config::ServerConfig;
use crate::forms::auth::LoginForm;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, auth as auth_service};

#[get("/admin/login")]
pub async fn show_login(
    user: Option<AdminUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if user.is_some() {
        return redirect("/admin");
    }

    let context = base_context(&flash_messages, "login");
    render_template(&tera, "admin/login.html", &context)
}

#[post("/admin/login")]
pub async fn login(
    request: HttpRequest,
    config: web::Data<ServerConfig>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    match auth_service::login(config.get_ref(), &form) {
        Ok(username) => match Identity::login(&request.extensions(), username) {
            Ok(_) => redirect("/admin"),
            Err(err) => {
                log::error!("Failed to establish a session: {err}");
                FlashMessage::error("No se pudo iniciar la sesión.").send();
                redirect("/admin/login")
            }
        },
        Err(ServiceError::InvalidCredentials) => {
            FlashMessage::error("Usuario o contraseña incorrectos.").send();
            redirect("/admin/login")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/login")
        }
        Err(err) => {
            log::error!("Failed to log in: {err}");
            FlashMessage::error("Error al iniciar sesión.").send();
            redirect("/admin/login")
        }
    }
}

#[post("/admin/logout")]
pub async fn logout(user: Option<Identity>) -> impl Responder {
    if let Some(user) = user {
        user.logout();
    }
    redirect("/admin/login")
}
