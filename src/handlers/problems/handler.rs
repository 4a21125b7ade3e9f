//! Problem handler implementations

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    error::AppResult,
    handlers::envelope::ApiResponse,
    middleware::auth::AuthenticatedUser,
    services::ProblemService,
    state::AppState,
    utils::pagination,
};

use super::{
    request::{CreateProblemRequest, ListProblemsQuery, UpdateProblemRequest},
    response::{ProblemResponse, ProblemsListResponse},
};

/// Create a new problem
pub async fn create_problem(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateProblemRequest>,
) -> AppResult<Json<ApiResponse<ProblemResponse>>> {
    payload.validate()?;

    let problem = ProblemService::create(
        state.db(),
        &auth_user.id,
        &auth_user.roles,
        &payload.title,
        &payload.description,
        &payload.difficulty,
        payload.time_limit_ms,
        payload.memory_limit_mb,
        payload.tags.as_deref().unwrap_or_default(),
        payload.is_public.unwrap_or(false),
    )
    .await?;

    Ok(Json(ApiResponse::success(
        problem.into(),
        "Problem created successfully",
    )))
}

/// List problems visible to the subject (paginated)
pub async fn list_problems(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<ListProblemsQuery>,
) -> AppResult<Json<ApiResponse<ProblemsListResponse>>> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let offset = pagination::offset(page, per_page);

    let (problems, total) = ProblemService::list(
        state.db(),
        &auth_user.id,
        &auth_user.roles,
        offset,
        per_page as i64,
        query.search.as_deref(),
        query.difficulty.as_deref(),
        query.tag.as_deref(),
    )
    .await?;

    Ok(Json(ApiResponse::success(
        ProblemsListResponse {
            problems: problems.into_iter().map(ProblemResponse::from).collect(),
            total,
            page,
            per_page,
        },
        "Problems retrieved",
    )))
}

/// Get a problem by ID
pub async fn get_problem(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ProblemResponse>>> {
    let problem = ProblemService::get(state.db(), &auth_user.id, &auth_user.roles, &id).await?;

    Ok(Json(ApiResponse::success(
        problem.into(),
        "Problem retrieved",
    )))
}

/// Update a problem
pub async fn update_problem(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProblemRequest>,
) -> AppResult<Json<ApiResponse<ProblemResponse>>> {
    payload.validate()?;

    let problem = ProblemService::update(
        state.db(),
        &auth_user.id,
        &auth_user.roles,
        &id,
        payload.title.as_deref(),
        payload.description.as_deref(),
        payload.difficulty.as_deref(),
        payload.time_limit_ms,
        payload.memory_limit_mb,
        payload.tags.as_deref(),
        payload.is_public,
    )
    .await?;

    Ok(Json(ApiResponse::success(
        problem.into(),
        "Problem updated successfully",
    )))
}

/// Delete a problem and all of its test cases
pub async fn delete_problem(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    ProblemService::delete(
        state.db(),
        state.content_store(),
        &auth_user.id,
        &auth_user.roles,
        &id,
    )
    .await?;

    Ok(Json(ApiResponse::message("Problem deleted successfully")))
}
