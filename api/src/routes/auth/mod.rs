use axum::{Router, routing::post};
use util::state::AppState;

pub mod post;

use post::{login, register};

/// Builds the `/auth` route group: registration and login. Both are public.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
