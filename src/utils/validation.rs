//! Input validation utilities

use crate::{
    constants::{
        MAX_MEMORY_LIMIT_MB, MAX_TEST_CASE_INPUT_SIZE, MAX_TEST_CASE_NAME_LENGTH,
        MAX_TEST_CASE_OUTPUT_SIZE, MAX_TIME_LIMIT_MS, MIN_MEMORY_LIMIT_MB, MIN_TIME_LIMIT_MS,
    },
    error::{AppError, AppResult},
};

/// Validate a problem's execution limits
pub fn validate_problem_limits(time_limit_ms: i32, memory_limit_mb: i32) -> AppResult<()> {
    if !(MIN_TIME_LIMIT_MS..=MAX_TIME_LIMIT_MS).contains(&time_limit_ms) {
        return Err(AppError::Validation(format!(
            "Time limit must be between {MIN_TIME_LIMIT_MS} and {MAX_TIME_LIMIT_MS} ms"
        )));
    }
    if !(MIN_MEMORY_LIMIT_MB..=MAX_MEMORY_LIMIT_MB).contains(&memory_limit_mb) {
        return Err(AppError::Validation(format!(
            "Memory limit must be between {MIN_MEMORY_LIMIT_MB} and {MAX_MEMORY_LIMIT_MB} MB"
        )));
    }
    Ok(())
}

/// Validate a role tag: non-empty, upper snake case
pub fn validate_role_name(name: &str) -> AppResult<()> {
    if name.is_empty() || name.len() > 64 {
        return Err(AppError::Validation(
            "Role name must be between 1 and 64 characters".to_string(),
        ));
    }
    if !name.chars().all(|c| c.is_ascii_uppercase() || c == '_') {
        return Err(AppError::Validation(
            "Role name must contain only uppercase letters and underscores".to_string(),
        ));
    }
    Ok(())
}

/// Validate a test case name
pub fn validate_test_case_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation(
            "Test case name must not be empty".to_string(),
        ));
    }
    if name.len() as u64 > MAX_TEST_CASE_NAME_LENGTH {
        return Err(AppError::Validation(format!(
            "Test case name must be at most {MAX_TEST_CASE_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate test case input content size
pub fn validate_input_size(len: usize) -> AppResult<()> {
    if len > MAX_TEST_CASE_INPUT_SIZE {
        return Err(AppError::Validation(format!(
            "Input content exceeds {MAX_TEST_CASE_INPUT_SIZE} bytes"
        )));
    }
    Ok(())
}

/// Validate test case expected-output content size
pub fn validate_output_size(len: usize) -> AppResult<()> {
    if len > MAX_TEST_CASE_OUTPUT_SIZE {
        return Err(AppError::Validation(format!(
            "Output content exceeds {MAX_TEST_CASE_OUTPUT_SIZE} bytes"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_inside_bounds_pass() {
        assert!(validate_problem_limits(1000, 256).is_ok());
        assert!(validate_problem_limits(MIN_TIME_LIMIT_MS, MIN_MEMORY_LIMIT_MB).is_ok());
        assert!(validate_problem_limits(MAX_TIME_LIMIT_MS, MAX_MEMORY_LIMIT_MB).is_ok());
    }

    #[test]
    fn limits_outside_bounds_fail() {
        assert!(validate_problem_limits(MIN_TIME_LIMIT_MS - 1, 256).is_err());
        assert!(validate_problem_limits(1000, MAX_MEMORY_LIMIT_MB + 1).is_err());
    }

    #[test]
    fn role_names_are_upper_snake() {
        assert!(validate_role_name("CONTEST_MANAGER").is_ok());
        assert!(validate_role_name("").is_err());
        assert!(validate_role_name("moderator").is_err());
        assert!(validate_role_name("BAD-TAG").is_err());
    }

    #[test]
    fn blank_test_case_names_rejected() {
        assert!(validate_test_case_name("tc1").is_ok());
        assert!(validate_test_case_name("   ").is_err());
        assert!(validate_test_case_name(&"x".repeat(200)).is_err());
    }
}
