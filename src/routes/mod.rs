use std::fmt;
use std::str::FromStr;

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web::http::header::ContentType;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::{Deserialize, Deserializer, Serialize};
use tera::{Context, Tera};

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod main;
pub mod product;

/// Flash message prepared for the alert block of the base template.
#[derive(Serialize)]
struct Alert<'a> {
    level: &'static str,
    message: &'a str,
}

/// Builds the context shared by every page template.
pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts: Vec<Alert> = flash_messages
        .iter()
        .map(|message| Alert {
            level: match message.level() {
                Level::Success => "success",
                Level::Warning => "warning",
                Level::Error => "danger",
                Level::Debug | Level::Info => "info",
            },
            message: message.content(),
        })
        .collect();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", &current_page);
    context
}

/// Renders `name` with `context`, or a 500 when the template fails.
pub fn render_template(tera: &Tera, name: &str, context: &Context) -> HttpResponse {
    match tera.render(name, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(body),
        Err(err) => {
            log::error!("Failed to render template {name}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Responds with a see-other redirect to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Deserializes an optional form or query value, treating an empty or blank
/// string as absent.
pub fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct TestQuery {
        #[serde(default, deserialize_with = "empty_string_as_none")]
        price: Option<f64>,
        #[serde(default, deserialize_with = "empty_string_as_none")]
        term: Option<String>,
    }

    #[test]
    fn empty_string_as_none_treats_blank_values_as_absent() {
        let query: TestQuery =
            serde_json::from_value(json!({"price": "", "term": "  "})).expect("deserialize");

        assert_eq!(query.price, None);
        assert_eq!(query.term, None);
    }

    #[test]
    fn empty_string_as_none_parses_present_values() {
        let query: TestQuery =
            serde_json::from_value(json!({"price": "1250.5", "term": " camiseta "}))
                .expect("deserialize");

        assert_eq!(query.price, Some(1250.5));
        assert_eq!(query.term.as_deref(), Some("camiseta"));
    }

    #[test]
    fn empty_string_as_none_rejects_garbage_numbers() {
        let result = serde_json::from_value::<TestQuery>(json!({"price": "mucho"}));

        assert!(result.is_err());
    }
}
