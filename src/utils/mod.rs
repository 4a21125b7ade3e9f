//! Utility functions

pub mod pagination;
pub mod validation;
