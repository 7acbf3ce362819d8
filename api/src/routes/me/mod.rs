use crate::auth::guards::allow_instructor;
use axum::{Router, middleware::from_fn, routing::get};
use util::state::AppState;

pub mod dashboard;

use dashboard::get_dashboard;

/// Builds the `/me` route group: user-specific views. Currently the
/// instructor dashboard, gated on the instructor role.
pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route_layer(from_fn(allow_instructor))
}
