//! Test case repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::TestCase};

/// Repository for test case database operations
pub struct TestCaseRepository;

impl TestCaseRepository {
    /// Create a new test case row (content blobs are written separately)
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        problem_id: &Uuid,
        name: &str,
        description: Option<&str>,
        input_file_name: &str,
        output_file_name: &str,
        is_hidden: bool,
        is_sample: bool,
        created_by: &Uuid,
    ) -> AppResult<TestCase> {
        let test_case = sqlx::query_as::<_, TestCase>(
            r#"
            INSERT INTO test_cases (
                problem_id, name, description, input_file_name, output_file_name,
                is_hidden, is_sample, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(problem_id)
        .bind(name)
        .bind(description)
        .bind(input_file_name)
        .bind(output_file_name)
        .bind(is_hidden)
        .bind(is_sample)
        .bind(created_by)
        .fetch_one(pool)
        .await?;

        Ok(test_case)
    }

    /// Find test case by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<TestCase>> {
        let test_case = sqlx::query_as::<_, TestCase>(r#"SELECT * FROM test_cases WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(test_case)
    }

    /// Whether a test case with this name exists under the problem
    pub async fn name_exists(pool: &PgPool, problem_id: &Uuid, name: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"SELECT EXISTS (SELECT 1 FROM test_cases WHERE problem_id = $1 AND name = $2)"#,
        )
        .bind(problem_id)
        .bind(name)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// All test cases of a problem, optionally restricted to non-hidden ones
    pub async fn list_by_problem(
        pool: &PgPool,
        problem_id: &Uuid,
        include_hidden: bool,
    ) -> AppResult<Vec<TestCase>> {
        let test_cases = sqlx::query_as::<_, TestCase>(
            r#"
            SELECT * FROM test_cases
            WHERE problem_id = $1 AND ($2 OR NOT is_hidden OR is_sample)
            ORDER BY created_at
            "#,
        )
        .bind(problem_id)
        .bind(include_hidden)
        .fetch_all(pool)
        .await?;

        Ok(test_cases)
    }

    /// Sample test cases of a problem
    pub async fn list_samples(pool: &PgPool, problem_id: &Uuid) -> AppResult<Vec<TestCase>> {
        let test_cases = sqlx::query_as::<_, TestCase>(
            r#"SELECT * FROM test_cases WHERE problem_id = $1 AND is_sample ORDER BY created_at"#,
        )
        .bind(problem_id)
        .fetch_all(pool)
        .await?;

        Ok(test_cases)
    }

    /// Update metadata fields (absent fields keep their current value)
    pub async fn update(
        pool: &PgPool,
        id: &Uuid,
        name: Option<&str>,
        description: Option<&str>,
        is_hidden: Option<bool>,
        is_sample: Option<bool>,
    ) -> AppResult<TestCase> {
        let test_case = sqlx::query_as::<_, TestCase>(
            r#"
            UPDATE test_cases
            SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                is_hidden = COALESCE($4, is_hidden),
                is_sample = COALESCE($5, is_sample),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(is_hidden)
        .bind(is_sample)
        .fetch_one(pool)
        .await?;

        Ok(test_case)
    }

    /// Persist the recomputed combined blob size
    pub async fn update_size(pool: &PgPool, id: &Uuid, size_bytes: i64) -> AppResult<TestCase> {
        let test_case = sqlx::query_as::<_, TestCase>(
            r#"
            UPDATE test_cases
            SET size_bytes = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(size_bytes)
        .fetch_one(pool)
        .await?;

        Ok(test_case)
    }

    /// Delete test case row
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM test_cases WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }
}
