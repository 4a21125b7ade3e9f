//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.
//! Every handler wraps its payload in the standard [`envelope::ApiResponse`].

pub mod auth;
pub mod envelope;
pub mod health;
pub mod problems;
pub mod test_cases;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/auth", auth::routes(state.clone()))
        .nest("/users", users::routes(state.clone()))
        .nest("/problems", problems::routes(state.clone()))
        .nest("/problems/{id}/test-cases", test_cases::routes(state))
}
