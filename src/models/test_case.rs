//! Test case model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Test case database model
///
/// Only metadata lives in the database; input/output content lives in the
/// content store under `testcases/{problem_id}/{test_case_id}/{file}`.
/// `size_bytes` is the combined size of both blobs, recomputed from store
/// state after every content write.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TestCase {
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
}
