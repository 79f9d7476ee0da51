use std::future::{Ready, ready};

use actix_identity::Identity;
use actix_web::dev::Payload;
use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;

/// Rejection raised when a guarded route is hit without a session. Rendered
/// as a redirect to the login form instead of a bare 401.
#[derive(Debug, Error)]
#[error("authentication required")]
pub struct AuthRequired;

impl ResponseError for AuthRequired {
    fn status_code(&self) -> StatusCode {
        StatusCode::SEE_OTHER
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::SeeOther()
            .insert_header((header::LOCATION, "/admin/login"))
            .finish()
    }
}

/// Extractor proving the request carries an authenticated admin session.
/// Routes taking it are only reachable after a successful login.
#[derive(Debug, Clone)]
pub struct AdminUser {
    /// Username stored in the session at login.
    pub username: String,
}

impl FromRequest for AdminUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let result = match Identity::from_request(req, payload).into_inner() {
            Ok(identity) => match identity.id() {
                Ok(username) => Ok(AdminUser { username }),
                Err(_) => Err(AuthRequired.into()),
            },
            Err(_) => Err(AuthRequired.into()),
        };
        ready(result)
    }
}
