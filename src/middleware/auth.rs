//! Authentication middleware
//!
//! Bearer tokens are resolved to a registered, active subject. A Firebase
//! ID token is tried first; the legacy HS256 session token is the fallback.
//! Either way the subject must exist in the users table.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{
    constants::roles,
    db::repositories::{RoleRepository, UserRepository},
    error::{AppError, AppResult},
    services::AuthService,
    state::AppState,
};

/// Authenticated subject extracted from a verified bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    /// Whether the subject holds the admin tag
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == roles::ADMIN)
    }

    /// Admin-only guard used by the user management surface
    pub fn ensure_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin role required".to_string()))
        }
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            debug!(path = %path, "Auth failed: No Authorization header");
            AppError::Unauthorized
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        debug!(path = %path, "Auth failed: expected 'Bearer <token>'");
        AppError::Unauthorized
    })?;

    let uid = resolve_subject_uid(&state, token).map_err(|e| {
        debug!(path = %path, error = ?e, "Auth failed: token verification failed");
        e
    })?;

    let user = UserRepository::find_by_uid(state.db(), &uid)
        .await?
        .ok_or_else(|| {
            debug!(path = %path, uid = %uid, "Auth failed: subject not registered");
            AppError::Unauthorized
        })?;

    if !user.is_active {
        debug!(path = %path, uid = %uid, "Auth failed: account deactivated");
        return Err(AppError::AccountInactive);
    }

    let role_names = RoleRepository::roles_of(state.db(), &user.id).await?;

    let subject = AuthenticatedUser {
        id: user.id,
        uid: user.firebase_uid,
        email: user.email,
        display_name: user.display_name,
        roles: role_names,
    };

    debug!(path = %path, user_id = %subject.id, "Subject authenticated");

    request.extensions_mut().insert(subject);
    Ok(next.run(request).await)
}

/// Map a raw bearer token to the subject's Firebase UID.
///
/// Firebase ID tokens and legacy session tokens share the header slot;
/// the session fallback only runs when Firebase verification rejects
/// the token outright.
fn resolve_subject_uid(state: &AppState, token: &str) -> AppResult<String> {
    match state.identity().verify_token(token) {
        Ok(claims) => Ok(claims.uid),
        Err(AppError::TokenExpired) => Err(AppError::TokenExpired),
        Err(_) => {
            let claims = AuthService::verify_session_token(token, &state.config().session.secret)?;
            Ok(claims.sub)
        }
    }
}
