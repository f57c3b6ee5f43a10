pub mod aggregation_service;
pub mod currency_service;
pub mod enrichment_service;
pub mod format_service;
pub mod view_service;
