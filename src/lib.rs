pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod embeddings;
pub mod errors;
pub mod logging;
pub mod models;
pub mod search;


pub use config::AppConfig;
pub use errors::*;
