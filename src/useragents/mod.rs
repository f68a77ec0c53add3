// src/useragents/mod.rs
pub mod client;
pub mod models;

pub use models::{Category, CategorySource, EMBEDDED_CATEGORIES, TABLE_CATEGORIES};
