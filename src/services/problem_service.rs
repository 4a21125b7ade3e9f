//! Problem management service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::roles,
    db::repositories::{ProblemRepository, TestCaseRepository},
    error::{AppError, AppResult},
    models::Problem,
    policy,
    storage::{ContentKey, ContentStore},
    utils::validation,
};

/// Problem management service
pub struct ProblemService;

impl ProblemService {
    /// Create a new problem. Restricted to admins and problem setters;
    /// the creator becomes the owner.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        subject_id: &Uuid,
        subject_roles: &[String],
        title: &str,
        description: &str,
        difficulty: &str,
        time_limit_ms: i32,
        memory_limit_mb: i32,
        tags: &[String],
        is_public: bool,
    ) -> AppResult<Problem> {
        let may_create = subject_roles
            .iter()
            .any(|r| r == roles::ADMIN || r == roles::PROBLEM_SETTER);
        if !may_create {
            return Err(AppError::Forbidden(
                "Only admins and problem setters may create problems".to_string(),
            ));
        }

        validation::validate_problem_limits(time_limit_ms, memory_limit_mb)?;

        if ProblemRepository::find_by_title(pool, title).await?.is_some() {
            return Err(AppError::AlreadyExists(
                "Problem title already exists".to_string(),
            ));
        }

        ProblemRepository::create(
            pool,
            title,
            description,
            difficulty,
            time_limit_ms,
            memory_limit_mb,
            tags,
            is_public,
            subject_id,
        )
        .await
    }

    /// Get a problem the subject may view.
    ///
    /// A problem the subject may not see is reported as not found so that
    /// private problem ids never leak.
    pub async fn get(
        pool: &PgPool,
        subject_id: &Uuid,
        subject_roles: &[String],
        id: &Uuid,
    ) -> AppResult<Problem> {
        let problem = ProblemRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))?;

        if !policy::can_view_problem(
            problem.is_public,
            problem.created_by.as_ref(),
            subject_id,
            subject_roles,
        ) {
            return Err(AppError::NotFound("Problem not found".to_string()));
        }

        Ok(problem)
    }

    /// List problems visible to the subject, with pagination and filters
    #[allow(clippy::too_many_arguments)]
    pub async fn list(
        pool: &PgPool,
        subject_id: &Uuid,
        subject_roles: &[String],
        offset: i64,
        limit: i64,
        search: Option<&str>,
        difficulty: Option<&str>,
        tag: Option<&str>,
    ) -> AppResult<(Vec<Problem>, i64)> {
        let is_admin = subject_roles.iter().any(|r| r == roles::ADMIN);
        let restrict_to = if is_admin { None } else { Some(subject_id) };

        ProblemRepository::list(pool, offset, limit, search, difficulty, tag, restrict_to).await
    }

    /// Update a problem. Owner-or-admin only.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        pool: &PgPool,
        subject_id: &Uuid,
        subject_roles: &[String],
        id: &Uuid,
        title: Option<&str>,
        description: Option<&str>,
        difficulty: Option<&str>,
        time_limit_ms: Option<i32>,
        memory_limit_mb: Option<i32>,
        tags: Option<&[String]>,
        is_public: Option<bool>,
    ) -> AppResult<Problem> {
        let problem = Self::get(pool, subject_id, subject_roles, id).await?;

        if !policy::can_manage_problem(problem.created_by.as_ref(), subject_id, subject_roles) {
            return Err(AppError::Forbidden(
                "Not allowed to modify this problem".to_string(),
            ));
        }

        validation::validate_problem_limits(
            time_limit_ms.unwrap_or(problem.time_limit_ms),
            memory_limit_mb.unwrap_or(problem.memory_limit_mb),
        )?;

        // Renaming onto another problem's title is a conflict
        if let Some(new_title) = title {
            if new_title != problem.title
                && ProblemRepository::find_by_title(pool, new_title).await?.is_some()
            {
                return Err(AppError::AlreadyExists(
                    "Problem title already exists".to_string(),
                ));
            }
        }

        ProblemRepository::update(
            pool,
            id,
            title,
            description,
            difficulty,
            time_limit_ms,
            memory_limit_mb,
            tags,
            is_public,
        )
        .await
    }

    /// Delete a problem together with all of its test cases.
    ///
    /// Content blobs go first, then the problem row; child test case rows
    /// fall with it through the FK cascade. Owner-or-admin only.
    pub async fn delete(
        pool: &PgPool,
        store: &dyn ContentStore,
        subject_id: &Uuid,
        subject_roles: &[String],
        id: &Uuid,
    ) -> AppResult<()> {
        let problem = Self::get(pool, subject_id, subject_roles, id).await?;

        if !policy::can_manage_problem(problem.created_by.as_ref(), subject_id, subject_roles) {
            return Err(AppError::Forbidden(
                "Not allowed to delete this problem".to_string(),
            ));
        }

        let test_cases = TestCaseRepository::list_by_problem(pool, id, true).await?;
        for tc in &test_cases {
            let (input, output) = ContentKey::pair(*id, tc.id);
            store.delete(&input).await?;
            store.delete(&output).await?;
        }

        ProblemRepository::delete(pool, id).await?;

        tracing::info!(
            problem_id = %id,
            test_cases = test_cases.len(),
            "Deleted problem and its test case content"
        );

        Ok(())
    }
}
