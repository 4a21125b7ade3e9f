//! Test case management service
//!
//! Test case metadata lives in Postgres, content in the object store. The
//! two are written in sequence (row, then blobs, then the recomputed size);
//! there is no cross-store transaction, and a mid-sequence failure surfaces
//! as an error rather than being papered over.

use futures::try_join;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::{INPUT_FILE_NAME, OUTPUT_FILE_NAME},
    db::repositories::{ProblemRepository, TestCaseRepository},
    error::{AppError, AppResult},
    models::{Problem, TestCase},
    policy,
    storage::{ContentKey, ContentStore},
    utils::validation,
};

/// Content and metadata for one new test case
#[derive(Debug)]
pub struct NewTestCase {
    pub name: String,
    pub description: Option<String>,
    pub input_content: String,
    pub output_content: String,
    pub is_hidden: bool,
    pub is_sample: bool,
}

/// A test case with its content attached where the viewer may see it
#[derive(Debug)]
pub struct TestCaseWithContent {
    pub test_case: TestCase,
    pub input_content: Option<String>,
    pub output_content: Option<String>,
}

/// Test case management service
pub struct TestCaseService;

impl TestCaseService {
    /// Create a test case under a problem: row first, then both blobs, then
    /// the combined size recomputed from store state.
    pub async fn create(
        pool: &PgPool,
        store: &dyn ContentStore,
        subject_id: &Uuid,
        subject_roles: &[String],
        problem_id: &Uuid,
        spec: NewTestCase,
    ) -> AppResult<TestCase> {
        let problem = Self::load_for_manage(pool, subject_id, subject_roles, problem_id).await?;

        Self::create_unchecked(pool, store, subject_id, &problem, spec).await
    }

    /// Create several test cases under a problem in one request.
    ///
    /// Items are processed in order; the first failure aborts the batch and
    /// already-created items remain.
    pub async fn bulk_create(
        pool: &PgPool,
        store: &dyn ContentStore,
        subject_id: &Uuid,
        subject_roles: &[String],
        problem_id: &Uuid,
        specs: Vec<NewTestCase>,
    ) -> AppResult<Vec<TestCase>> {
        if specs.is_empty() {
            return Err(AppError::Validation("Empty test case batch".to_string()));
        }

        let problem = Self::load_for_manage(pool, subject_id, subject_roles, problem_id).await?;

        let mut created = Vec::with_capacity(specs.len());
        for spec in specs {
            created.push(Self::create_unchecked(pool, store, subject_id, &problem, spec).await?);
        }

        Ok(created)
    }

    /// Get a single test case, content attached where permitted
    pub async fn get(
        pool: &PgPool,
        store: &dyn ContentStore,
        subject_id: &Uuid,
        subject_roles: &[String],
        problem_id: &Uuid,
        test_case_id: &Uuid,
    ) -> AppResult<TestCaseWithContent> {
        let problem = Self::load_for_view(pool, subject_id, subject_roles, problem_id).await?;
        let test_case = Self::load_under_problem(pool, problem_id, test_case_id).await?;

        let can_manage = policy::can_manage_test_cases(
            problem.created_by.as_ref(),
            subject_id,
            subject_roles,
        );
        let privileged = policy::viewer_is_privileged(subject_roles);

        if !can_manage
            && !policy::test_case_visible(test_case.is_hidden, test_case.is_sample, privileged)
        {
            return Err(AppError::NotFound("Test case not found".to_string()));
        }

        Self::attach_content(store, test_case, can_manage).await
    }

    /// List a problem's test cases visible to the subject.
    ///
    /// Managers and privileged roles see hidden items; everyone else sees
    /// non-hidden and sample items only. Content rides along per item where
    /// the viewer may see it.
    pub async fn list(
        pool: &PgPool,
        store: &dyn ContentStore,
        subject_id: &Uuid,
        subject_roles: &[String],
        problem_id: &Uuid,
    ) -> AppResult<Vec<TestCaseWithContent>> {
        let problem = Self::load_for_view(pool, subject_id, subject_roles, problem_id).await?;

        let can_manage = policy::can_manage_test_cases(
            problem.created_by.as_ref(),
            subject_id,
            subject_roles,
        );
        let include_hidden = can_manage || policy::viewer_is_privileged(subject_roles);

        let test_cases =
            TestCaseRepository::list_by_problem(pool, problem_id, include_hidden).await?;

        let mut out = Vec::with_capacity(test_cases.len());
        for tc in test_cases {
            out.push(Self::attach_content(store, tc, can_manage).await?);
        }

        Ok(out)
    }

    /// Sample test cases of a public problem, content always included.
    /// Serves the unauthenticated samples endpoint.
    pub async fn list_samples(
        pool: &PgPool,
        store: &dyn ContentStore,
        problem_id: &Uuid,
    ) -> AppResult<Vec<TestCaseWithContent>> {
        let problem = ProblemRepository::find_by_id(pool, problem_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))?;

        if !problem.is_public {
            return Err(AppError::NotFound("Problem not found".to_string()));
        }

        let samples = TestCaseRepository::list_samples(pool, problem_id).await?;

        let mut out = Vec::with_capacity(samples.len());
        for tc in samples {
            // Samples are readable by anyone who can see them
            out.push(Self::attach_content(store, tc, false).await?);
        }

        Ok(out)
    }

    /// Update a test case's metadata and optionally overwrite its content.
    ///
    /// Absent content fields leave the stored blobs untouched; after any
    /// content write the combined size is recomputed from store state.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        pool: &PgPool,
        store: &dyn ContentStore,
        subject_id: &Uuid,
        subject_roles: &[String],
        problem_id: &Uuid,
        test_case_id: &Uuid,
        name: Option<&str>,
        description: Option<&str>,
        is_hidden: Option<bool>,
        is_sample: Option<bool>,
        input_content: Option<&str>,
        output_content: Option<&str>,
    ) -> AppResult<TestCase> {
        Self::load_for_manage(pool, subject_id, subject_roles, problem_id).await?;
        let existing = Self::load_under_problem(pool, problem_id, test_case_id).await?;

        if let Some(new_name) = name {
            validation::validate_test_case_name(new_name)?;
            if new_name != existing.name
                && TestCaseRepository::name_exists(pool, problem_id, new_name).await?
            {
                return Err(AppError::AlreadyExists(
                    "Test case name already exists for this problem".to_string(),
                ));
            }
        }

        if let Some(input) = input_content {
            validation::validate_input_size(input.len())?;
        }
        if let Some(output) = output_content {
            validation::validate_output_size(output.len())?;
        }

        let mut test_case = TestCaseRepository::update(
            pool,
            test_case_id,
            name,
            description,
            is_hidden,
            is_sample,
        )
        .await?;

        let (input_key, output_key) = ContentKey::pair(*problem_id, *test_case_id);
        let mut content_written = false;

        if let Some(input) = input_content {
            store.put(&input_key, input.as_bytes()).await?;
            content_written = true;
        }
        if let Some(output) = output_content {
            store.put(&output_key, output.as_bytes()).await?;
            content_written = true;
        }

        if content_written {
            let size = Self::combined_size(store, &input_key, &output_key).await?;
            test_case = TestCaseRepository::update_size(pool, test_case_id, size).await?;
        }

        Ok(test_case)
    }

    /// Delete a test case and its content blobs as a unit
    pub async fn delete(
        pool: &PgPool,
        store: &dyn ContentStore,
        subject_id: &Uuid,
        subject_roles: &[String],
        problem_id: &Uuid,
        test_case_id: &Uuid,
    ) -> AppResult<()> {
        Self::load_for_manage(pool, subject_id, subject_roles, problem_id).await?;
        Self::load_under_problem(pool, problem_id, test_case_id).await?;

        let (input_key, output_key) = ContentKey::pair(*problem_id, *test_case_id);
        store.delete(&input_key).await?;
        store.delete(&output_key).await?;

        TestCaseRepository::delete(pool, test_case_id).await
    }

    /// Row, blobs, then recomputed size. The manage guard has already run.
    async fn create_unchecked(
        pool: &PgPool,
        store: &dyn ContentStore,
        subject_id: &Uuid,
        problem: &Problem,
        spec: NewTestCase,
    ) -> AppResult<TestCase> {
        validation::validate_test_case_name(&spec.name)?;
        validation::validate_input_size(spec.input_content.len())?;
        validation::validate_output_size(spec.output_content.len())?;

        if TestCaseRepository::name_exists(pool, &problem.id, &spec.name).await? {
            return Err(AppError::AlreadyExists(
                "Test case name already exists for this problem".to_string(),
            ));
        }

        let test_case = TestCaseRepository::create(
            pool,
            &problem.id,
            &spec.name,
            spec.description.as_deref(),
            INPUT_FILE_NAME,
            OUTPUT_FILE_NAME,
            spec.is_hidden,
            spec.is_sample,
            subject_id,
        )
        .await?;

        let (input_key, output_key) = ContentKey::pair(problem.id, test_case.id);
        store.put(&input_key, spec.input_content.as_bytes()).await?;
        store.put(&output_key, spec.output_content.as_bytes()).await?;

        let size = Self::combined_size(store, &input_key, &output_key).await?;

        TestCaseRepository::update_size(pool, &test_case.id, size).await
    }

    /// Combined blob size as the store reports it, not as the request
    /// claimed it
    async fn combined_size(
        store: &dyn ContentStore,
        input_key: &ContentKey,
        output_key: &ContentKey,
    ) -> AppResult<i64> {
        let (input_size, output_size) = try_join!(store.size(input_key), store.size(output_key))?;

        Ok((input_size + output_size) as i64)
    }

    /// Attach content where the viewer may see it. A content-store read
    /// failure fails the whole request.
    async fn attach_content(
        store: &dyn ContentStore,
        test_case: TestCase,
        can_manage: bool,
    ) -> AppResult<TestCaseWithContent> {
        if !policy::content_visible(test_case.is_sample, can_manage) {
            return Ok(TestCaseWithContent {
                test_case,
                input_content: None,
                output_content: None,
            });
        }

        let (input_key, output_key) = ContentKey::pair(test_case.problem_id, test_case.id);
        let (input, output) = try_join!(store.get(&input_key), store.get(&output_key))?;

        Ok(TestCaseWithContent {
            test_case,
            input_content: Some(String::from_utf8_lossy(&input).into_owned()),
            output_content: Some(String::from_utf8_lossy(&output).into_owned()),
        })
    }

    /// Load a problem the subject may view; denial reads as not found
    async fn load_for_view(
        pool: &PgPool,
        subject_id: &Uuid,
        subject_roles: &[String],
        problem_id: &Uuid,
    ) -> AppResult<Problem> {
        let problem = ProblemRepository::find_by_id(pool, problem_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))?;

        if !policy::can_view_test_cases(
            problem.is_public,
            problem.created_by.as_ref(),
            subject_id,
            subject_roles,
        ) {
            return Err(AppError::NotFound("Problem not found".to_string()));
        }

        Ok(problem)
    }

    /// Load a problem the subject may manage test cases under.
    /// Viewers without manage standing get a 403; everyone else a 404.
    async fn load_for_manage(
        pool: &PgPool,
        subject_id: &Uuid,
        subject_roles: &[String],
        problem_id: &Uuid,
    ) -> AppResult<Problem> {
        let problem = Self::load_for_view(pool, subject_id, subject_roles, problem_id).await?;

        if !policy::can_manage_test_cases(
            problem.created_by.as_ref(),
            subject_id,
            subject_roles,
        ) {
            return Err(AppError::Forbidden(
                "Not allowed to manage test cases for this problem".to_string(),
            ));
        }

        Ok(problem)
    }

    /// A test case id under a different problem reads as not found
    async fn load_under_problem(
        pool: &PgPool,
        problem_id: &Uuid,
        test_case_id: &Uuid,
    ) -> AppResult<TestCase> {
        let test_case = TestCaseRepository::find_by_id(pool, test_case_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Test case not found".to_string()))?;

        if test_case.problem_id != *problem_id {
            return Err(AppError::NotFound("Test case not found".to_string()));
        }

        Ok(test_case)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryContentStore;
    use chrono::Utc;

    fn test_case(is_hidden: bool, is_sample: bool) -> TestCase {
        let now = Utc::now();
        TestCase {
            id: Uuid::new_v4(),
            problem_id: Uuid::new_v4(),
            name: "tc1".to_string(),
            description: None,
            input_file_name: INPUT_FILE_NAME.to_string(),
            output_file_name: OUTPUT_FILE_NAME.to_string(),
            size_bytes: 0,
            is_hidden,
            is_sample,
            created_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    async fn seed_content(store: &MemoryContentStore, tc: &TestCase) {
        let (input, output) = ContentKey::pair(tc.problem_id, tc.id);
        store.put(&input, b"1 2").await.unwrap();
        store.put(&output, b"3").await.unwrap();
    }

    #[tokio::test]
    async fn sample_content_attached_without_manage_standing() {
        let store = MemoryContentStore::new();
        let tc = test_case(true, true);
        seed_content(&store, &tc).await;

        let with_content = TestCaseService::attach_content(&store, tc, false).await.unwrap();
        assert_eq!(with_content.input_content.as_deref(), Some("1 2"));
        assert_eq!(with_content.output_content.as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn non_sample_content_withheld_from_non_managers() {
        let store = MemoryContentStore::new();
        let tc = test_case(false, false);
        seed_content(&store, &tc).await;

        let with_content = TestCaseService::attach_content(&store, tc, false).await.unwrap();
        assert!(with_content.input_content.is_none());
        assert!(with_content.output_content.is_none());
    }

    #[tokio::test]
    async fn managers_see_non_sample_content() {
        let store = MemoryContentStore::new();
        let tc = test_case(true, false);
        seed_content(&store, &tc).await;

        let with_content = TestCaseService::attach_content(&store, tc, true).await.unwrap();
        assert!(with_content.input_content.is_some());
    }

    #[tokio::test]
    async fn missing_content_fails_the_request() {
        let store = MemoryContentStore::new();
        let tc = test_case(false, true);

        let err = TestCaseService::attach_content(&store, tc, false).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn combined_size_reflects_store_state() {
        let store = MemoryContentStore::new();
        let tc = test_case(false, false);
        seed_content(&store, &tc).await;

        let (input, output) = ContentKey::pair(tc.problem_id, tc.id);
        let size = TestCaseService::combined_size(&store, &input, &output).await.unwrap();
        assert_eq!(size, 4);
    }
}
