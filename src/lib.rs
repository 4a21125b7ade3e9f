//! CodeArena - Competitive Programming Platform Backend
//!
//! This library provides the core functionality for the CodeArena platform:
//! problem and test case management with role-based access control.
//!
//! # Features
//!
//! - Firebase-backed authentication with a legacy email/password fallback
//! - Open role tags with policy-driven authorization
//! - Problem CRUD with visibility rules
//! - Test case metadata in Postgres, content in object storage
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Repositories**: Database access
//! - **Policy**: Pure access-control decisions
//! - **Models**: Domain models and DTOs

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod middleware;
pub mod models;
pub mod policy;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
