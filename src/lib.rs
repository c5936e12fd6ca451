pub mod auth;
pub mod config;
pub mod db;
pub mod entry;
pub mod errors;
pub mod expense;
pub mod extractors;
pub mod health;
pub mod income;
pub mod models;
pub mod openapi;
pub mod routes;
