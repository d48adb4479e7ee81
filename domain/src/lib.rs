pub mod errors;
pub mod links;
pub mod models;
pub mod repositories;
pub mod types;
