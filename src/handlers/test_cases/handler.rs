//! Test case handler implementations

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    handlers::envelope::ApiResponse,
    middleware::auth::AuthenticatedUser,
    services::TestCaseService,
    state::AppState,
};

use super::{
    request::{BulkCreateTestCasesRequest, CreateTestCaseRequest, UpdateTestCaseRequest},
    response::{TestCaseResponse, TestCasesListResponse},
};

/// Create a test case under a problem
pub async fn create_test_case(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(problem_id): Path<Uuid>,
    Json(payload): Json<CreateTestCaseRequest>,
) -> AppResult<Json<ApiResponse<TestCaseResponse>>> {
    payload.validate()?;

    let test_case = TestCaseService::create(
        state.db(),
        state.content_store(),
        &auth_user.id,
        &auth_user.roles,
        &problem_id,
        payload.into(),
    )
    .await?;

    Ok(Json(ApiResponse::success(
        test_case.into(),
        "Test case created successfully",
    )))
}

/// Create several test cases in one request
pub async fn bulk_create_test_cases(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(problem_id): Path<Uuid>,
    Json(payload): Json<BulkCreateTestCasesRequest>,
) -> AppResult<Json<ApiResponse<TestCasesListResponse>>> {
    payload.validate()?;

    let specs = payload.test_cases.into_iter().map(Into::into).collect();

    let created = TestCaseService::bulk_create(
        state.db(),
        state.content_store(),
        &auth_user.id,
        &auth_user.roles,
        &problem_id,
        specs,
    )
    .await?;

    let test_cases: Vec<TestCaseResponse> = created.into_iter().map(Into::into).collect();
    let total = test_cases.len();

    Ok(Json(ApiResponse::success(
        TestCasesListResponse { test_cases, total },
        "Test cases created successfully",
    )))
}

/// List a problem's test cases visible to the subject
pub async fn list_test_cases(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(problem_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<TestCasesListResponse>>> {
    let listed = TestCaseService::list(
        state.db(),
        state.content_store(),
        &auth_user.id,
        &auth_user.roles,
        &problem_id,
    )
    .await?;

    let test_cases: Vec<TestCaseResponse> = listed.into_iter().map(Into::into).collect();
    let total = test_cases.len();

    Ok(Json(ApiResponse::success(
        TestCasesListResponse { test_cases, total },
        "Test cases retrieved",
    )))
}

/// Sample test cases of a public problem; no authentication required
pub async fn list_samples(
    State(state): State<AppState>,
    Path(problem_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<TestCasesListResponse>>> {
    let samples =
        TestCaseService::list_samples(state.db(), state.content_store(), &problem_id).await?;

    let test_cases: Vec<TestCaseResponse> = samples.into_iter().map(Into::into).collect();
    let total = test_cases.len();

    Ok(Json(ApiResponse::success(
        TestCasesListResponse { test_cases, total },
        "Sample test cases retrieved",
    )))
}

/// Get a single test case
pub async fn get_test_case(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((problem_id, tc_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<TestCaseResponse>>> {
    let test_case = TestCaseService::get(
        state.db(),
        state.content_store(),
        &auth_user.id,
        &auth_user.roles,
        &problem_id,
        &tc_id,
    )
    .await?;

    Ok(Json(ApiResponse::success(
        test_case.into(),
        "Test case retrieved",
    )))
}

/// Update a test case's metadata and optionally its content
pub async fn update_test_case(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((problem_id, tc_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateTestCaseRequest>,
) -> AppResult<Json<ApiResponse<TestCaseResponse>>> {
    payload.validate()?;

    let test_case = TestCaseService::update(
        state.db(),
        state.content_store(),
        &auth_user.id,
        &auth_user.roles,
        &problem_id,
        &tc_id,
        payload.name.as_deref(),
        payload.description.as_deref(),
        payload.is_hidden,
        payload.is_sample,
        payload.input_content.as_deref(),
        payload.output_content.as_deref(),
    )
    .await?;

    Ok(Json(ApiResponse::success(
        test_case.into(),
        "Test case updated successfully",
    )))
}

/// Delete a test case and its stored content
pub async fn delete_test_case(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((problem_id, tc_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<()>>> {
    TestCaseService::delete(
        state.db(),
        state.content_store(),
        &auth_user.id,
        &auth_user.roles,
        &problem_id,
        &tc_id,
    )
    .await?;

    Ok(Json(ApiResponse::message("Test case deleted successfully")))
}
