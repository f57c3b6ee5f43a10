pub mod enriched;
pub mod exchange_rate;
pub mod page;
pub mod settings;
pub mod transaction;
pub mod view;
