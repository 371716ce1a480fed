pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod docs;
pub mod model;
pub mod models;
pub mod routes;
pub mod upload;
