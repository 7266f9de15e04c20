// src/lib.rs

pub mod config;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod utils;

// Re-export specific items for convenience if needed
pub use routes::create_router;
pub use store::QuizStore;
