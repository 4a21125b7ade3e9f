//! Problem request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::{
    MAX_MEMORY_LIMIT_MB, MAX_PROBLEM_DESCRIPTION_LENGTH, MAX_PROBLEM_TITLE_LENGTH,
    MAX_TIME_LIMIT_MS, MIN_MEMORY_LIMIT_MB, MIN_TIME_LIMIT_MS,
};

/// Create problem request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProblemRequest {
    #[validate(length(min = 1, max = MAX_PROBLEM_TITLE_LENGTH))]
    pub title: String,

    #[validate(length(min = 1, max = MAX_PROBLEM_DESCRIPTION_LENGTH))]
    pub description: String,

    #[validate(length(min = 1, max = 32))]
    pub difficulty: String,

    #[validate(range(min = MIN_TIME_LIMIT_MS, max = MAX_TIME_LIMIT_MS))]
    pub time_limit_ms: i32,

    #[validate(range(min = MIN_MEMORY_LIMIT_MB, max = MAX_MEMORY_LIMIT_MB))]
    pub memory_limit_mb: i32,

    pub tags: Option<Vec<String>>,

    pub is_public: Option<bool>,
}

/// Update problem request (absent fields are left unchanged)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProblemRequest {
    #[validate(length(min = 1, max = MAX_PROBLEM_TITLE_LENGTH))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = MAX_PROBLEM_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 32))]
    pub difficulty: Option<String>,

    #[validate(range(min = MIN_TIME_LIMIT_MS, max = MAX_TIME_LIMIT_MS))]
    pub time_limit_ms: Option<i32>,

    #[validate(range(min = MIN_MEMORY_LIMIT_MB, max = MAX_MEMORY_LIMIT_MB))]
    pub memory_limit_mb: Option<i32>,

    pub tags: Option<Vec<String>>,

    pub is_public: Option<bool>,
}

/// List problems query parameters
#[derive(Debug, Deserialize)]
pub struct ListProblemsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
    pub difficulty: Option<String>,
    pub tag: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreateProblemRequest {
        CreateProblemRequest {
            title: "Two Sum".to_string(),
            description: "Find two numbers that add up to a target".to_string(),
            difficulty: "easy".to_string(),
            time_limit_ms: 1000,
            memory_limit_mb: 256,
            tags: None,
            is_public: None,
        }
    }

    #[test]
    fn limits_at_bounds_pass() {
        let mut req = valid_create();
        req.time_limit_ms = MAX_TIME_LIMIT_MS;
        req.memory_limit_mb = MIN_MEMORY_LIMIT_MB;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn oversized_title_fails_validation() {
        let mut req = valid_create();
        req.title = "x".repeat(MAX_PROBLEM_TITLE_LENGTH as usize + 1);
        assert!(req.validate().is_err());
    }

    #[test]
    fn out_of_range_limits_fail_validation() {
        let mut req = valid_create();
        req.time_limit_ms = MIN_TIME_LIMIT_MS - 1;
        assert!(req.validate().is_err());

        let mut req = valid_create();
        req.memory_limit_mb = MAX_MEMORY_LIMIT_MB + 1;
        assert!(req.validate().is_err());
    }
}
