// College ERP backends - admin and academic HTTP services over the campus database

// Configuration and process bootstrap
pub mod config;
pub mod server;

// Database access and HTTP middleware
pub mod infrastructure;

// Row types and normalization helpers
pub mod models;

// Profile resolution
pub mod services;

// HTTP routes
pub mod api;
pub mod app_state;

// Common utilities
pub mod error;

// Re-exports for convenience
pub use error::{AppError, AppResult};
