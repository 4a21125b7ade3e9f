//! Auth handler implementations

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    handlers::envelope::ApiResponse,
    middleware::auth::AuthenticatedUser,
    services::{AuthService, UserService},
    state::AppState,
};

use super::{
    request::{LoginRequest, RegisterRequest, UpdateProfileRequest, VerifyRequest},
    response::{LoginResponse, UserResponse, VerifyResponse},
};

/// Register the subject behind a Firebase ID token
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    payload.validate()?;

    let (user, roles) = AuthService::register(
        state.db(),
        state.identity(),
        &payload.id_token,
        payload.display_name.as_deref(),
        payload.password.as_deref(),
    )
    .await?;

    Ok(Json(ApiResponse::success(
        UserResponse::from_user(user, roles),
        "User registered successfully",
    )))
}

/// Legacy email/password login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    payload.validate()?;

    let (user, roles, token, expires_in) =
        AuthService::login(state.db(), state.config(), &payload.email, &payload.password).await?;

    Ok(Json(ApiResponse::success(
        LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in,
            user: UserResponse::from_user(user, roles),
        },
        "Login successful",
    )))
}

/// Verify a raw identity token and report registration status
pub async fn verify(
    State(state): State<AppState>,
    Json(payload): Json<VerifyRequest>,
) -> AppResult<Json<ApiResponse<VerifyResponse>>> {
    payload.validate()?;

    let (claims, registered) =
        AuthService::verify_identity(state.db(), state.identity(), &payload.id_token).await?;

    Ok(Json(ApiResponse::success(
        VerifyResponse {
            uid: claims.uid,
            email: claims.email,
            email_verified: claims.email_verified,
            name: claims.name,
            registered,
        },
        "Token verified",
    )))
}

/// Current subject and role set
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let (user, roles) = UserService::get_by_uid(state.db(), &auth_user.uid).await?;

    Ok(Json(ApiResponse::success(
        UserResponse::from_user(user, roles),
        "Current user",
    )))
}

/// Update the current subject's profile
pub async fn update_me(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    payload.validate()?;

    let (user, roles) = UserService::update_profile(
        state.db(),
        &auth_user.uid,
        payload.display_name.as_deref(),
    )
    .await?;

    Ok(Json(ApiResponse::success(
        UserResponse::from_user(user, roles),
        "Profile updated",
    )))
}
