pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod summary;
pub mod templates_structs;
pub mod webhook;
