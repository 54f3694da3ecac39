pub mod api;
pub mod captured;
pub mod product;
pub mod user;
