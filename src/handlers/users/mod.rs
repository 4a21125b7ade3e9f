//! User management handlers (admin surface)

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// User management routes; all require authentication, handlers enforce
/// the admin-only restriction
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_users))
        .route("/roles", get(handler::list_roles))
        .route("/{uid}", get(handler::get_user))
        .route("/{uid}/roles", put(handler::assign_role))
        .route("/{uid}/roles/{role}", delete(handler::remove_role))
        .route("/{uid}/deactivate", post(handler::deactivate_user))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
