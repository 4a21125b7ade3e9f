//! Test case handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Test case routes, nested under `/problems/{problem_id}/test-cases`.
/// The samples route is public; everything else requires authentication.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/samples", get(handler::list_samples))
        .merge(
            Router::new()
                .route(
                    "/",
                    get(handler::list_test_cases).post(handler::create_test_case),
                )
                .route("/bulk", post(handler::bulk_create_test_cases))
                .route(
                    "/{tc_id}",
                    get(handler::get_test_case)
                        .put(handler::update_test_case)
                        .delete(handler::delete_test_case),
                )
                .route_layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
}
