use crate::auth::guards::{allow_authenticated, allow_instructor};
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, patch},
};
use util::state::AppState;

pub mod get;
pub mod patch;

use get::{list_course_requests, list_timetable};
use patch::decide_course_request;

/// Builds the `/timetable` route group.
///
/// Reads require any authenticated user; deciding a course request is
/// instructor-only.
pub fn timetable_routes() -> Router<AppState> {
    let instructor_routes = Router::new()
        .route("/course-requests/{request_id}", patch(decide_course_request))
        .route_layer(from_fn(allow_instructor));

    Router::new()
        .route("/", get(list_timetable))
        .route("/course-requests", get(list_course_requests))
        .route_layer(from_fn(allow_authenticated))
        .merge(instructor_routes)
}
