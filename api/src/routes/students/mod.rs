use crate::auth::guards::{allow_admin, allow_instructor};
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, patch, post},
};
use util::state::AppState;

pub mod get;
pub mod patch;
pub mod post;

use get::{
    get_enrolled_for_instructor, get_majors, get_programs, get_sections, get_student_by_roll,
    get_student_timetable, get_students_by_section, list_students,
};
use patch::update_student_status;
use post::register_student;

/// Builds the `/students` route group.
///
/// Registration and catalog lookups are public (students register before
/// they have an account), roll-number lookups back the public timetable
/// view, and the query endpoints are gated per role:
/// - `/list`, `/section/{section_id}`, `/{student_id}/status` → admin only
/// - `/instructor-enrolled` → instructor (or admin)
pub fn student_routes() -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/list", get(list_students))
        .route("/section/{section_id}", get(get_students_by_section))
        .route("/{student_id}/status", patch(update_student_status))
        .route_layer(from_fn(allow_admin));

    let instructor_routes = Router::new()
        .route("/instructor-enrolled", get(get_enrolled_for_instructor))
        .route_layer(from_fn(allow_instructor));

    Router::new()
        .route("/register", post(register_student))
        .route("/programs", get(get_programs))
        .route("/majors", get(get_majors))
        .route("/sections", get(get_sections))
        .route("/roll/{roll_number}", get(get_student_by_roll))
        .route("/roll/{roll_number}/timetable", get(get_student_timetable))
        .merge(admin_routes)
        .merge(instructor_routes)
}
