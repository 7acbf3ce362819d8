use crate::response::ApiResponse;
use crate::routes::students::get::StudentItem;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use db::models::student::Model as StudentModel;
use db::models::{major, program, section};
use sea_orm::EntityTrait;
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

lazy_static::lazy_static! {
    static ref ROLL_NUMBER_REGEX: regex::Regex = regex::Regex::new("^u\\d{8}$").unwrap();
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterStudentRequest {
    #[validate(regex(
        path = *ROLL_NUMBER_REGEX,
        message = "Roll number must be in format u12345678"
    ))]
    pub roll_number: String,

    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub program_id: i64,
    pub major_id: i64,
    pub section_id: i64,
}

/// POST /api/students/register
///
/// Public student registration. The student is created in `pending` status
/// and must be approved by an admin before appearing as active.
///
/// ### Request Body
/// ```json
/// {
///   "roll_number": "u12345678",
///   "name": "Alice Mokoena",
///   "email": "alice@example.com",
///   "program_id": 1,
///   "major_id": 2,
///   "section_id": 3
/// }
/// ```
///
/// ### Responses
///
/// - `201 Created` → registered student in `data`
/// - `400 Bad Request` → validation failure, or major not in the selected program
/// - `404 Not Found` → unknown program/major/section
/// - `409 Conflict` → duplicate roll number or email
/// - `500 Internal Server Error`
pub async fn register_student(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterStudentRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<StudentItem>::error(error_message)),
        );
    }

    let db = app_state.db();

    match program::Entity::find_by_id(req.program_id).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<StudentItem>::error(format!(
                    "Program {} not found.",
                    req.program_id
                ))),
            );
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<StudentItem>::error(
                    "Database error while checking program",
                )),
            );
        }
    }

    let major = match major::Entity::find_by_id(req.major_id).one(db).await {
        Ok(Some(major)) => major,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<StudentItem>::error(format!(
                    "Major {} not found.",
                    req.major_id
                ))),
            );
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<StudentItem>::error(
                    "Database error while checking major",
                )),
            );
        }
    };

    if major.program_id != req.program_id {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<StudentItem>::error(
                "Major does not belong to the selected program",
            )),
        );
    }

    match section::Entity::find_by_id(req.section_id).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<StudentItem>::error(format!(
                    "Section {} not found.",
                    req.section_id
                ))),
            );
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<StudentItem>::error(
                    "Database error while checking section",
                )),
            );
        }
    }

    if let Ok(Some(_)) = StudentModel::get_by_roll_number(db, &req.roll_number).await {
        return (
            StatusCode::CONFLICT,
            Json(ApiResponse::<StudentItem>::error(
                "A student with this roll number already exists",
            )),
        );
    }

    if let Ok(Some(_)) = StudentModel::get_by_email(db, &req.email).await {
        return (
            StatusCode::CONFLICT,
            Json(ApiResponse::<StudentItem>::error(
                "A student with this email already exists",
            )),
        );
    }

    match StudentModel::create(
        db,
        &req.roll_number,
        &req.name,
        &req.email,
        req.program_id,
        req.major_id,
        req.section_id,
    )
    .await
    {
        Ok(student) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                StudentItem::from(student),
                "Student registered successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<StudentItem>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
