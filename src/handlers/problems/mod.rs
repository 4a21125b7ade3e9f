//! Problem handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    middleware,
    routing::get,
    Router,
};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Problem routes; all require authentication
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_problems).post(handler::create_problem))
        .route(
            "/{id}",
            get(handler::get_problem)
                .put(handler::update_problem)
                .delete(handler::delete_problem),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
