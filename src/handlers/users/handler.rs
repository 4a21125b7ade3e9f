//! User management handler implementations
//!
//! Every operation on this surface is admin-only.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::{
    constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    error::AppResult,
    handlers::envelope::ApiResponse,
    middleware::auth::AuthenticatedUser,
    services::UserService,
    state::AppState,
    utils::pagination,
};

use super::{
    request::{AssignRoleRequest, ListUsersQuery},
    response::{RoleSetResponse, RolesListResponse, UserProfileResponse, UsersListResponse},
};

/// List users (paginated, admin only)
pub async fn list_users(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<ListUsersQuery>,
) -> AppResult<Json<ApiResponse<UsersListResponse>>> {
    auth_user.ensure_admin()?;

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let offset = pagination::offset(page, per_page);

    let (users, total) =
        UserService::list(state.db(), offset, per_page as i64, query.search.as_deref()).await?;

    let users = users
        .into_iter()
        .map(|(user, roles)| UserProfileResponse::from_user(user, roles))
        .collect();

    Ok(Json(ApiResponse::success(
        UsersListResponse {
            users,
            total,
            page,
            per_page,
        },
        "Users retrieved",
    )))
}

/// Get a user by Firebase UID (admin only)
pub async fn get_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(uid): Path<String>,
) -> AppResult<Json<ApiResponse<UserProfileResponse>>> {
    auth_user.ensure_admin()?;

    let (user, roles) = UserService::get_by_uid(state.db(), &uid).await?;

    Ok(Json(ApiResponse::success(
        UserProfileResponse::from_user(user, roles),
        "User retrieved",
    )))
}

/// List all known role tags (admin only)
pub async fn list_roles(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<ApiResponse<RolesListResponse>>> {
    auth_user.ensure_admin()?;

    let roles = UserService::list_roles(state.db())
        .await?
        .into_iter()
        .map(|r| r.name)
        .collect();

    Ok(Json(ApiResponse::success(
        RolesListResponse { roles },
        "Roles retrieved",
    )))
}

/// Assign a role to a user (admin only, idempotent)
pub async fn assign_role(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(uid): Path<String>,
    Json(payload): Json<AssignRoleRequest>,
) -> AppResult<Json<ApiResponse<RoleSetResponse>>> {
    auth_user.ensure_admin()?;
    payload.validate()?;

    let roles = UserService::assign_role(state.db(), &uid, &payload.role).await?;

    Ok(Json(ApiResponse::success(
        RoleSetResponse { uid, roles },
        "Role assigned",
    )))
}

/// Remove a role from a user (admin only)
pub async fn remove_role(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((uid, role)): Path<(String, String)>,
) -> AppResult<Json<ApiResponse<RoleSetResponse>>> {
    auth_user.ensure_admin()?;

    let roles = UserService::remove_role(state.db(), &uid, &role).await?;

    Ok(Json(ApiResponse::success(
        RoleSetResponse { uid, roles },
        "Role removed",
    )))
}

/// Deactivate a user account (admin only)
pub async fn deactivate_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(uid): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    auth_user.ensure_admin()?;

    UserService::deactivate(state.db(), &uid).await?;

    Ok(Json(ApiResponse::message("User deactivated")))
}
