use serde::Deserialize;
use std::env;
use std::path::PathBuf;

// Top-level configuration container, populated from the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub api: ApiConfig,
    pub receipt: ReceiptConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub rust_log: String,
}

// Backend REST API settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

// Where the post-checkout receipt snapshot is cached locally
#[derive(Debug, Clone, Deserialize)]
pub struct ReceiptConfig {
    pub cache_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            app: AppConfig {
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "cinema_booking=debug".to_string()),
            },
            api: ApiConfig {
                base_url: env::var("API_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:8080/api".to_string()),
                timeout_seconds: env::var("API_TIMEOUT_SECONDS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .expect("API_TIMEOUT_SECONDS must be a valid number"),
            },
            receipt: ReceiptConfig {
                cache_path: env::var("RECEIPT_CACHE_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| {
                        env::temp_dir().join("cinema-booking-last-receipt.json")
                    }),
            },
        }
    }
}
