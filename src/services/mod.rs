pub use crate::services::errors::{ServiceError, ServiceResult};

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod errors;
pub mod main;
pub mod product;
pub mod view;
