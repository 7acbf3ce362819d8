use crate::response::ApiResponse;
use crate::routes::students::get::StudentItem;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::student::{Model as StudentModel, Status as StudentStatus};
use serde::Deserialize;
use std::str::FromStr;
use util::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// PATCH /api/students/{student_id}/status
///
/// Sets a student's registration status (`pending`, `approved` or
/// `rejected`). Requires admin privileges.
///
/// ### Responses
/// - `200 OK` → updated student in `data`
/// - `400 Bad Request` → unknown status value
/// - `404 Not Found` → no student with that id
pub async fn update_student_status(
    State(app_state): State<AppState>,
    Path(student_id): Path<i64>,
    Json(req): Json<UpdateStatusRequest>,
) -> impl IntoResponse {
    let Ok(status) = StudentStatus::from_str(&req.status) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<StudentItem>::error(
                "Status must be pending, approved or rejected",
            )),
        );
    };

    match StudentModel::set_status(app_state.db(), student_id, status).await {
        Ok(Some(student)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                StudentItem::from(student),
                "Student status updated successfully",
            )),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<StudentItem>::error(format!(
                "Student {} not found.",
                student_id
            ))),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<StudentItem>::error(
                "Database error while updating student status",
            )),
        ),
    }
}
