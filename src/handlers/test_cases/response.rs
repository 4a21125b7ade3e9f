//! Test case response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{models::TestCase, services::test_case_service::TestCaseWithContent};

/// Test case response; content fields are present only when the viewer
/// may see them
#[derive(Debug, Serialize)]
pub struct TestCaseResponse {
    pub id: Uuid,
    pub problem_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub input_file_name: String,
    pub output_file_name: String,
    pub size_bytes: i64,
    pub is_hidden: bool,
    pub is_sample: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_content: Option<String>,
}

impl From<TestCase> for TestCaseResponse {
    fn from(tc: TestCase) -> Self {
        Self {
            id: tc.id,
            problem_id: tc.problem_id,
            name: tc.name,
            description: tc.description,
            input_file_name: tc.input_file_name,
            output_file_name: tc.output_file_name,
            size_bytes: tc.size_bytes,
            is_hidden: tc.is_hidden,
            is_sample: tc.is_sample,
            created_by: tc.created_by,
            created_at: tc.created_at,
            updated_at: tc.updated_at,
            input_content: None,
            output_content: None,
        }
    }
}

impl From<TestCaseWithContent> for TestCaseResponse {
    fn from(tc: TestCaseWithContent) -> Self {
        let mut response = Self::from(tc.test_case);
        response.input_content = tc.input_content;
        response.output_content = tc.output_content;
        response
    }
}

/// Test case list response
#[derive(Debug, Serialize)]
pub struct TestCasesListResponse {
    pub test_cases: Vec<TestCaseResponse>,
    pub total: usize,
}
