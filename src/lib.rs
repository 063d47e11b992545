pub mod config;
pub mod dtos;
pub mod error;
pub mod handler;
pub mod models;
pub mod routes;
pub mod service;
pub mod utils;

use config::Config;

#[derive(Debug, Clone)]
pub struct AppState {
    pub env: Config,
}
