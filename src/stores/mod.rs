pub mod product_store;
pub mod request_log;
pub mod user_registry;
