use crate::error::{AppError, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Connection parameters for the product store. The defaults target a local
/// DynamoDB, which ignores the region and accepts any credentials.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub endpoint: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .map_err(|_| AppError::Config("Invalid PORT value".to_string()))?,
            },
            store: StoreConfig {
                endpoint: env::var("DYNAMODB_ENDPOINT")
                    .unwrap_or_else(|_| "http://localhost:8000".to_string()),
                region: env::var("AWS_REGION").unwrap_or_else(|_| "us-west-2".to_string()),
                access_key_id: env::var("AWS_ACCESS_KEY_ID")
                    .unwrap_or_else(|_| "223344".to_string()),
                secret_access_key: env::var("AWS_SECRET_ACCESS_KEY")
                    .unwrap_or_else(|_| "dummy-secret-key".to_string()),
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
