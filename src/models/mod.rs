//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod problem;
pub mod role;
pub mod test_case;
pub mod user;

pub use problem::*;
pub use role::*;
pub use test_case::*;
pub use user::*;
