// Library exports for testing
pub mod ai;
pub mod analysis;
pub mod cache;
pub mod coach;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod routes;
pub mod state;
