//! Problem repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::Problem};

/// Repository for problem database operations
pub struct ProblemRepository;

impl ProblemRepository {
    /// Create a new problem
    pub async fn create(
        pool: &PgPool,
        title: &str,
        description: &str,
        difficulty: &str,
        time_limit_ms: i32,
        memory_limit_mb: i32,
        tags: &[String],
        is_public: bool,
        created_by: &Uuid,
    ) -> AppResult<Problem> {
        let problem = sqlx::query_as::<_, Problem>(
            r#"
            INSERT INTO problems (
                title, description, difficulty, time_limit_ms, memory_limit_mb,
                tags, is_public, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(difficulty)
        .bind(time_limit_ms)
        .bind(memory_limit_mb)
        .bind(tags)
        .bind(is_public)
        .bind(created_by)
        .fetch_one(pool)
        .await?;

        Ok(problem)
    }

    /// Find problem by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Problem>> {
        let problem = sqlx::query_as::<_, Problem>(r#"SELECT * FROM problems WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(problem)
    }

    /// Find problem by its unique title
    pub async fn find_by_title(pool: &PgPool, title: &str) -> AppResult<Option<Problem>> {
        let problem = sqlx::query_as::<_, Problem>(r#"SELECT * FROM problems WHERE title = $1"#)
            .bind(title)
            .fetch_optional(pool)
            .await?;

        Ok(problem)
    }

    /// Update problem (absent fields keep their current value)
    pub async fn update(
        pool: &PgPool,
        id: &Uuid,
        title: Option<&str>,
        description: Option<&str>,
        difficulty: Option<&str>,
        time_limit_ms: Option<i32>,
        memory_limit_mb: Option<i32>,
        tags: Option<&[String]>,
        is_public: Option<bool>,
    ) -> AppResult<Problem> {
        let problem = sqlx::query_as::<_, Problem>(
            r#"
            UPDATE problems
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                difficulty = COALESCE($4, difficulty),
                time_limit_ms = COALESCE($5, time_limit_ms),
                memory_limit_mb = COALESCE($6, memory_limit_mb),
                tags = COALESCE($7, tags),
                is_public = COALESCE($8, is_public),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(difficulty)
        .bind(time_limit_ms)
        .bind(memory_limit_mb)
        .bind(tags)
        .bind(is_public)
        .fetch_one(pool)
        .await?;

        Ok(problem)
    }

    /// Delete problem row (child test case rows cascade)
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM problems WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// List problems with pagination.
    ///
    /// When `restrict_to` is set, only public problems and those owned by
    /// the given subject are returned; admins pass `None` and see all.
    #[allow(clippy::too_many_arguments)]
    pub async fn list(
        pool: &PgPool,
        offset: i64,
        limit: i64,
        search: Option<&str>,
        difficulty: Option<&str>,
        tag: Option<&str>,
        restrict_to: Option<&Uuid>,
    ) -> AppResult<(Vec<Problem>, i64)> {
        let search_pattern = search.map(|s| format!("%{}%", s));
        let restricted = restrict_to.is_some();

        let problems = sqlx::query_as::<_, Problem>(
            r#"
            SELECT * FROM problems
            WHERE
                ($1::text IS NULL OR title ILIKE $1)
                AND ($2::text IS NULL OR difficulty = $2)
                AND ($3::text IS NULL OR $3 = ANY(tags))
                AND (NOT $4 OR is_public OR created_by = $5)
            ORDER BY created_at DESC
            OFFSET $6 LIMIT $7
            "#,
        )
        .bind(&search_pattern)
        .bind(difficulty)
        .bind(tag)
        .bind(restricted)
        .bind(restrict_to)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM problems
            WHERE
                ($1::text IS NULL OR title ILIKE $1)
                AND ($2::text IS NULL OR difficulty = $2)
                AND ($3::text IS NULL OR $3 = ANY(tags))
                AND (NOT $4 OR is_public OR created_by = $5)
            "#,
        )
        .bind(&search_pattern)
        .bind(difficulty)
        .bind(tag)
        .bind(restricted)
        .bind(restrict_to)
        .fetch_one(pool)
        .await?;

        Ok((problems, count))
    }
}
