use crate::auth::AuthUser;
use crate::response::ApiResponse;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::course_request::{Entity as RequestEntity, Status as RequestStatus};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use util::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DecideRequestBody {
    /// Either `accept` or `reject`.
    pub action: String,
}

#[derive(Serialize, Default)]
pub struct CourseRequestDecisionResponse {
    pub id: i64,
    pub course_id: i64,
    pub instructor_id: Option<i64>,
    pub status: String,
}

/// PATCH /api/timetable/course-requests/{request_id}
///
/// Decide a course request. Accepting claims the request for the acting
/// instructor; rejecting is allowed on pending requests or requests the
/// actor already owns. Requires instructor privileges.
///
/// ### Request Body
/// ```json
/// { "action": "accept" }
/// ```
///
/// ### Responses
/// - `200 OK` → updated request in `data`
/// - `400 Bad Request` → unknown action
/// - `404 Not Found` → no request with that id
/// - `409 Conflict` → request already decided by someone else
pub async fn decide_course_request(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(request_id): Path<i64>,
    Json(body): Json<DecideRequestBody>,
) -> impl IntoResponse {
    let db = app_state.db();

    let request = match RequestEntity::find_by_id(request_id).one(db).await {
        Ok(Some(request)) => request,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<CourseRequestDecisionResponse>::error(format!(
                    "Course request {} not found.",
                    request_id
                ))),
            );
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<CourseRequestDecisionResponse>::error(
                    "Database error while checking course request",
                )),
            );
        }
    };

    let updated = match body.action.as_str() {
        "accept" => {
            if request.status != RequestStatus::Pending {
                return (
                    StatusCode::CONFLICT,
                    Json(ApiResponse::<CourseRequestDecisionResponse>::error(
                        "Request has already been decided",
                    )),
                );
            }
            request.mark_accepted(db, claims.sub).await
        }
        "reject" => {
            let owned = request.instructor_id == Some(claims.sub);
            if request.status != RequestStatus::Pending && !owned {
                return (
                    StatusCode::CONFLICT,
                    Json(ApiResponse::<CourseRequestDecisionResponse>::error(
                        "Request has already been decided",
                    )),
                );
            }
            request.mark_rejected(db).await
        }
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<CourseRequestDecisionResponse>::error(
                    "Action must be accept or reject",
                )),
            );
        }
    };

    match updated {
        Ok(request) => {
            let message = if request.status == RequestStatus::Accepted {
                "Course request accepted"
            } else {
                "Course request rejected"
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    CourseRequestDecisionResponse {
                        id: request.id,
                        course_id: request.course_id,
                        instructor_id: request.instructor_id,
                        status: request.status.to_string(),
                    },
                    message,
                )),
            )
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<CourseRequestDecisionResponse>::error(
                "Database error while updating course request",
            )),
        ),
    }
}
