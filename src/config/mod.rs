mod app_config;
mod dynamodb_config;

pub use app_config::{AppConfig, ServerConfig, StoreConfig};
pub use dynamodb_config::*;
