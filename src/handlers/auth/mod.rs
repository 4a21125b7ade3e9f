//! Authentication handlers

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

/// Auth routes; `/me` requires a verified subject, the rest are public
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        .route("/verify", post(handler::verify))
        .merge(
            Router::new()
                .route("/me", get(handler::me).put(handler::update_me))
                .route_layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
}
