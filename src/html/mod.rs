pub mod escape;
pub mod pages;
