//! Test case request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{constants::MAX_TEST_CASE_NAME_LENGTH, services::test_case_service::NewTestCase};

/// Create test case request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTestCaseRequest {
    #[validate(length(min = 1, max = MAX_TEST_CASE_NAME_LENGTH))]
    pub name: String,

    #[validate(length(max = 1024))]
    pub description: Option<String>,

    pub input_content: String,

    pub output_content: String,

    pub is_hidden: Option<bool>,

    pub is_sample: Option<bool>,
}

impl From<CreateTestCaseRequest> for NewTestCase {
    fn from(req: CreateTestCaseRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            input_content: req.input_content,
            output_content: req.output_content,
            is_hidden: req.is_hidden.unwrap_or(false),
            is_sample: req.is_sample.unwrap_or(false),
        }
    }
}

/// Bulk create request
#[derive(Debug, Deserialize, Validate)]
pub struct BulkCreateTestCasesRequest {
    #[validate(nested)]
    pub test_cases: Vec<CreateTestCaseRequest>,
}

/// Update test case request (absent fields are left unchanged; absent
/// content fields leave the stored blobs untouched)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTestCaseRequest {
    #[validate(length(min = 1, max = MAX_TEST_CASE_NAME_LENGTH))]
    pub name: Option<String>,

    #[validate(length(max = 1024))]
    pub description: Option<String>,

    pub is_hidden: Option<bool>,

    pub is_sample: Option<bool>,

    pub input_content: Option<String>,

    pub output_content: Option<String>,
}
