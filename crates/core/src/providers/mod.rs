pub mod traits;

// API client implementations
pub mod exchange_rate_api;
pub mod transactions_api;
