pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod feed;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;
pub mod storage;
