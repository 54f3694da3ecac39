pub mod echo;
pub mod fallback;
pub mod health;
pub mod metrics;
pub mod product;
pub mod users;
pub mod viewer;
