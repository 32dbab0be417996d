pub mod config;
pub mod error;
pub mod grid;
pub mod models;
pub mod receipt;
pub mod selection;
pub mod services;
pub mod session;

pub use error::BookingError;
pub use selection::SeatMap;
pub use services::{ApiClient, PaymentRedirect};
pub use session::BookingSession;

// Shared state for the whole application
#[derive(Clone)]
pub struct AppContext {
    pub config: config::Config,
    pub api: services::ApiClient,
    pub receipts: receipt::ReceiptStore,
}

impl AppContext {
    pub fn new(config: config::Config) -> Self {
        let api = services::ApiClient::from_config(&config.api);
        let receipts = receipt::ReceiptStore::new(config.receipt.cache_path.clone());
        Self {
            config,
            api,
            receipts,
        }
    }
}
