//! Read endpoints for the `/timetable` group: course requests and
//! scheduled class occurrences, with their course details joined in.

use crate::response::ApiResponse;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::course_request::{
    Column as RequestColumn, Entity as RequestEntity, Status as RequestStatus,
};
use db::models::{course, timetable_entry};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use util::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CourseRequestsQuery {
    /// Filter by request status (pending/accepted/rejected).
    pub status: Option<String>,
    /// Filter by the instructor that claimed the request.
    pub instructor_id: Option<i64>,
}

#[derive(Serialize, Default)]
pub struct CourseRequestsResponse {
    pub requests: Vec<CourseRequestItem>,
}

#[derive(Serialize)]
pub struct CourseRequestItem {
    pub id: i64,
    pub course_id: i64,
    pub course_code: String,
    pub course_title: String,
    pub instructor_id: Option<i64>,
    pub status: String,
    pub created_at: String,
}

/// GET /api/timetable/course-requests
///
/// List course requests with course details joined in, optionally filtered
/// by `status` and/or `instructor_id`.
///
/// ### Responses
/// - `200 OK` → `{"requests": [...]}` in `data`
/// - `400 Bad Request` → invalid status value
pub async fn list_course_requests(
    State(app_state): State<AppState>,
    Query(params): Query<CourseRequestsQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    let mut query = RequestEntity::find().order_by_asc(RequestColumn::Id);

    if let Some(status) = &params.status {
        match RequestStatus::from_str(status) {
            Ok(parsed) => {
                query = query.filter(RequestColumn::Status.eq(parsed));
            }
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<CourseRequestsResponse>::error(
                        "Invalid status parameter",
                    )),
                )
                    .into_response();
            }
        }
    }

    if let Some(instructor_id) = params.instructor_id {
        query = query.filter(RequestColumn::InstructorId.eq(instructor_id));
    }

    let requests = match query.all(db).await {
        Ok(requests) => requests,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<CourseRequestsResponse>::error(
                    "Failed to retrieve course requests",
                )),
            )
                .into_response();
        }
    };

    let courses: HashMap<i64, course::Model> = match course::Entity::find().all(db).await {
        Ok(courses) => courses.into_iter().map(|c| (c.id, c)).collect(),
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<CourseRequestsResponse>::error(
                    "Database error while retrieving courses",
                )),
            )
                .into_response();
        }
    };

    let items = requests
        .into_iter()
        .map(|request| {
            let (course_code, course_title) = courses
                .get(&request.course_id)
                .map(|c| (c.code.clone(), c.title.clone()))
                .unwrap_or_default();
            CourseRequestItem {
                id: request.id,
                course_id: request.course_id,
                course_code,
                course_title,
                instructor_id: request.instructor_id,
                status: request.status.to_string(),
                created_at: request.created_at.to_string(),
            }
        })
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            CourseRequestsResponse { requests: items },
            "Course requests retrieved successfully",
        )),
    )
        .into_response()
}

#[derive(Debug, Deserialize)]
pub struct TimetableQuery {
    /// Restrict to entries taught by one teacher.
    pub teacher_id: Option<i64>,
}

#[derive(Serialize, Default)]
pub struct TimetableListResponse {
    pub timetable: Vec<TimetableSlotItem>,
}

#[derive(Serialize)]
pub struct TimetableSlotItem {
    pub id: i64,
    pub course_id: i64,
    pub course_code: String,
    pub course_title: String,
    pub section_id: i64,
    pub teacher_id: i64,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
}

/// GET /api/timetable
///
/// List timetable entries ordered by day then start time, optionally
/// restricted to one teacher via `teacher_id`.
pub async fn list_timetable(
    State(app_state): State<AppState>,
    Query(params): Query<TimetableQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    let mut query = timetable_entry::Entity::find()
        .order_by_asc(timetable_entry::Column::DayOfWeek)
        .order_by_asc(timetable_entry::Column::StartTime);

    if let Some(teacher_id) = params.teacher_id {
        query = query.filter(timetable_entry::Column::TeacherId.eq(teacher_id));
    }

    let entries = match query.all(db).await {
        Ok(entries) => entries,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<TimetableListResponse>::error(
                    "Failed to retrieve timetable",
                )),
            )
                .into_response();
        }
    };

    let courses: HashMap<i64, course::Model> = match course::Entity::find().all(db).await {
        Ok(courses) => courses.into_iter().map(|c| (c.id, c)).collect(),
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<TimetableListResponse>::error(
                    "Database error while retrieving courses",
                )),
            )
                .into_response();
        }
    };

    let timetable = entries
        .into_iter()
        .map(|entry| {
            let (course_code, course_title) = courses
                .get(&entry.course_id)
                .map(|c| (c.code.clone(), c.title.clone()))
                .unwrap_or_default();
            TimetableSlotItem {
                id: entry.id,
                course_id: entry.course_id,
                course_code,
                course_title,
                section_id: entry.section_id,
                teacher_id: entry.teacher_id,
                day_of_week: entry.day_of_week,
                start_time: entry.start_time,
                end_time: entry.end_time,
            }
        })
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            TimetableListResponse { timetable },
            "Timetable retrieved successfully",
        )),
    )
        .into_response()
}
