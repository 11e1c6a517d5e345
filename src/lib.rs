// Event Hub - event catalog, membership ledger and search over SQLite

// Core types and primitives
pub mod core;

// Records and input forms
pub mod forms;
pub mod models;

// Persistence, identity and request plumbing
pub mod infrastructure;
pub mod store;

// Business operations
pub mod services;

// HTTP surface
pub mod api;
pub mod app_state;
pub mod config;

// Common utilities
pub mod error;

// Re-exports for convenience
pub use error::{AppError, AppResult, FieldErrors};
