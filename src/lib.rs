pub mod api;
pub mod db;
pub mod error;
pub mod grades;
pub mod models;
pub mod scrape;
pub mod services;
pub mod state;
pub mod transcript;
