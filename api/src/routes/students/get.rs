//! Read endpoints for the `/students` group: catalog lookups, roll-number
//! lookups, and the role-gated listing queries.

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::enrollment::{EnrolledStudentRow, Model as EnrollmentModel};
use db::models::student::{
    Column as StudentColumn, Entity as StudentEntity, Model as StudentModel,
    Status as StudentStatus,
};
use db::models::{course, major, program, section, timetable_entry};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use util::state::AppState;
use validator::Validate;

/// Response object for a single student record.
#[derive(Debug, Serialize, Default)]
pub struct StudentItem {
    pub id: i64,
    pub roll_number: String,
    pub name: String,
    pub email: String,
    pub program_id: i64,
    pub major_id: i64,
    pub section_id: i64,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<StudentModel> for StudentItem {
    fn from(student: StudentModel) -> Self {
        Self {
            id: student.id,
            roll_number: student.roll_number,
            name: student.name,
            email: student.email,
            program_id: student.program_id,
            major_id: student.major_id,
            section_id: student.section_id,
            status: student.status.to_string(),
            created_at: student.created_at.to_string(),
            updated_at: student.updated_at.to_string(),
        }
    }
}

#[derive(Serialize, Default)]
pub struct ProgramsResponse {
    pub programs: Vec<ProgramItem>,
}

#[derive(Serialize)]
pub struct ProgramItem {
    pub id: i64,
    pub name: String,
}

/// GET /api/students/programs
///
/// Public list of degree programs available at registration time.
pub async fn get_programs(State(app_state): State<AppState>) -> impl IntoResponse {
    match program::Entity::find()
        .order_by_asc(program::Column::Name)
        .all(app_state.db())
        .await
    {
        Ok(programs) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ProgramsResponse {
                    programs: programs
                        .into_iter()
                        .map(|p| ProgramItem {
                            id: p.id,
                            name: p.name,
                        })
                        .collect(),
                },
                "Programs retrieved successfully",
            )),
        )
            .into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<ProgramsResponse>::error(
                "Database error while retrieving programs",
            )),
        )
            .into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct MajorsQuery {
    /// Restrict to majors of one program.
    pub program_id: Option<i64>,
}

#[derive(Serialize, Default)]
pub struct MajorsResponse {
    pub majors: Vec<MajorItem>,
}

#[derive(Serialize)]
pub struct MajorItem {
    pub id: i64,
    pub program_id: i64,
    pub name: String,
}

/// GET /api/students/majors
///
/// Public list of majors, optionally filtered by `program_id`.
pub async fn get_majors(
    State(app_state): State<AppState>,
    Query(params): Query<MajorsQuery>,
) -> impl IntoResponse {
    let mut query = major::Entity::find().order_by_asc(major::Column::Name);
    if let Some(program_id) = params.program_id {
        query = query.filter(major::Column::ProgramId.eq(program_id));
    }

    match query.all(app_state.db()).await {
        Ok(majors) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                MajorsResponse {
                    majors: majors
                        .into_iter()
                        .map(|m| MajorItem {
                            id: m.id,
                            program_id: m.program_id,
                            name: m.name,
                        })
                        .collect(),
                },
                "Majors retrieved successfully",
            )),
        )
            .into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<MajorsResponse>::error(
                "Database error while retrieving majors",
            )),
        )
            .into_response(),
    }
}

#[derive(Serialize, Default)]
pub struct SectionsResponse {
    pub sections: Vec<SectionItem>,
}

#[derive(Serialize)]
pub struct SectionItem {
    pub id: i64,
    pub name: String,
    pub capacity: i32,
}

/// GET /api/students/sections
pub async fn get_sections(State(app_state): State<AppState>) -> impl IntoResponse {
    match section::Entity::find()
        .order_by_asc(section::Column::Name)
        .all(app_state.db())
        .await
    {
        Ok(sections) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                SectionsResponse {
                    sections: sections
                        .into_iter()
                        .map(|s| SectionItem {
                            id: s.id,
                            name: s.name,
                            capacity: s.capacity,
                        })
                        .collect(),
                },
                "Sections retrieved successfully",
            )),
        )
            .into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<SectionsResponse>::error(
                "Database error while retrieving sections",
            )),
        )
            .into_response(),
    }
}

/// GET /api/students/roll/{roll_number}
///
/// Public lookup of one student by roll number, used by the timetable view.
///
/// ### Responses
/// - `200 OK` → student in `data`
/// - `404 Not Found` → no student with that roll number
pub async fn get_student_by_roll(
    State(app_state): State<AppState>,
    Path(roll_number): Path<String>,
) -> impl IntoResponse {
    match StudentModel::get_by_roll_number(app_state.db(), &roll_number).await {
        Ok(Some(student)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                StudentItem::from(student),
                "Student retrieved successfully",
            )),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<StudentItem>::error(format!(
                "Student {} not found.",
                roll_number
            ))),
        )
            .into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<StudentItem>::error(
                "Database error while retrieving student",
            )),
        )
            .into_response(),
    }
}

#[derive(Serialize, Default)]
pub struct StudentTimetableResponse {
    pub timetable: Vec<StudentTimetableItem>,
}

#[derive(Serialize)]
pub struct StudentTimetableItem {
    pub id: i64,
    pub course_id: i64,
    pub course_code: String,
    pub course_title: String,
    pub section_id: i64,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
}

/// GET /api/students/roll/{roll_number}/timetable
///
/// Public timetable for a student's section, ordered by day then start time.
pub async fn get_student_timetable(
    State(app_state): State<AppState>,
    Path(roll_number): Path<String>,
) -> impl IntoResponse {
    let db = app_state.db();

    let student = match StudentModel::get_by_roll_number(db, &roll_number).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<StudentTimetableResponse>::error(format!(
                    "Student {} not found.",
                    roll_number
                ))),
            )
                .into_response();
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<StudentTimetableResponse>::error(
                    "Database error while retrieving student",
                )),
            )
                .into_response();
        }
    };

    let entries = match timetable_entry::Entity::find()
        .filter(timetable_entry::Column::SectionId.eq(student.section_id))
        .order_by_asc(timetable_entry::Column::DayOfWeek)
        .order_by_asc(timetable_entry::Column::StartTime)
        .all(db)
        .await
    {
        Ok(entries) => entries,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<StudentTimetableResponse>::error(
                    "Database error while retrieving timetable",
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
                Json(ApiResponse::<StudentTimetableResponse>::error(
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
            StudentTimetableItem {
                id: entry.id,
                course_id: entry.course_id,
                course_code,
                course_title,
                section_id: entry.section_id,
                day_of_week: entry.day_of_week,
                start_time: entry.start_time,
                end_time: entry.end_time,
            }
        })
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            StudentTimetableResponse { timetable },
            "Timetable retrieved successfully",
        )),
    )
        .into_response()
}

#[derive(Debug, Deserialize, Validate)]
pub struct ListStudentsQuery {
    #[validate(range(min = 1))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100))]
    pub per_page: Option<u64>,
    /// Case-insensitive partial match against roll number, name or email.
    pub query: Option<String>,
    /// Filter by registration status (pending/approved/rejected).
    pub status: Option<String>,
    /// Comma-separated sort fields. Use `-` prefix for descending.
    pub sort: Option<String>,
}

#[derive(Serialize, Default)]
pub struct StudentsListResponse {
    pub students: Vec<StudentItem>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// GET /api/students/list
///
/// Retrieve a paginated list of students with optional filtering and sorting.
/// Requires admin privileges.
///
/// ### Query Parameters
/// - `page` (optional): Page number (default: 1, min: 1)
/// - `per_page` (optional): Items per page (default: 20, min: 1, max: 100)
/// - `query` (optional): Partial match on roll number, name or email
/// - `status` (optional): Filter by registration status
/// - `sort` (optional): Comma-separated sort fields (`roll_number`, `name`,
///   `created_at`), `-` prefix for descending
///
/// ### Responses
/// - `200 OK` → `{students, page, per_page, total}`
/// - `400 Bad Request` → invalid query parameters
/// - `401 Unauthorized` / `403 Forbidden` → missing token / not an admin
pub async fn list_students(
    State(app_state): State<AppState>,
    Query(params): Query<ListStudentsQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(e) = params.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<StudentsListResponse>::error(
                common::format_validation_errors(&e),
            )),
        )
            .into_response();
    }

    let page = params.page.unwrap_or(1);
    let per_page = params.per_page.unwrap_or(20);

    let mut condition = Condition::all();

    if let Some(q) = &params.query {
        condition = condition.add(
            Condition::any()
                .add(StudentColumn::RollNumber.contains(q))
                .add(StudentColumn::Name.contains(q))
                .add(StudentColumn::Email.contains(q)),
        );
    }

    if let Some(status) = &params.status {
        match StudentStatus::from_str(status) {
            Ok(parsed) => {
                condition = condition.add(StudentColumn::Status.eq(parsed));
            }
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<StudentsListResponse>::error(
                        "Invalid status parameter",
                    )),
                )
                    .into_response();
            }
        }
    }

    let mut query = StudentEntity::find().filter(condition);

    if let Some(sort_param) = &params.sort {
        for sort_field in sort_param.split(',') {
            let (field, desc) = if let Some(stripped) = sort_field.strip_prefix('-') {
                (stripped, true)
            } else {
                (sort_field, false)
            };

            query = match field {
                "roll_number" => {
                    if desc {
                        query.order_by_desc(StudentColumn::RollNumber)
                    } else {
                        query.order_by_asc(StudentColumn::RollNumber)
                    }
                }
                "name" => {
                    if desc {
                        query.order_by_desc(StudentColumn::Name)
                    } else {
                        query.order_by_asc(StudentColumn::Name)
                    }
                }
                "created_at" => {
                    if desc {
                        query.order_by_desc(StudentColumn::CreatedAt)
                    } else {
                        query.order_by_asc(StudentColumn::CreatedAt)
                    }
                }
                _ => query,
            };
        }
    } else {
        query = query.order_by_asc(StudentColumn::RollNumber);
    }

    let paginator = query.paginate(db, per_page);
    let total = match paginator.num_items().await {
        Ok(n) => n,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<StudentsListResponse>::error(
                    "Error counting students",
                )),
            )
                .into_response();
        }
    };

    match paginator.fetch_page(page - 1).await {
        Ok(students) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                StudentsListResponse {
                    students: students.into_iter().map(StudentItem::from).collect(),
                    page,
                    per_page,
                    total,
                },
                "Students retrieved successfully",
            )),
        )
            .into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<StudentsListResponse>::error(
                "Failed to retrieve students",
            )),
        )
            .into_response(),
    }
}

#[derive(Serialize, Default)]
pub struct SectionStudentsResponse {
    pub students: Vec<StudentItem>,
}

/// GET /api/students/section/{section_id}
///
/// Students of one section. Requires admin privileges.
pub async fn get_students_by_section(
    State(app_state): State<AppState>,
    Path(section_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    match section::Entity::find_by_id(section_id).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<SectionStudentsResponse>::error(format!(
                    "Section {} not found.",
                    section_id
                ))),
            )
                .into_response();
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SectionStudentsResponse>::error(
                    "Database error while checking section",
                )),
            )
                .into_response();
        }
    }

    match StudentEntity::find()
        .filter(StudentColumn::SectionId.eq(section_id))
        .order_by_asc(StudentColumn::RollNumber)
        .all(db)
        .await
    {
        Ok(students) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                SectionStudentsResponse {
                    students: students.into_iter().map(StudentItem::from).collect(),
                },
                "Students retrieved successfully",
            )),
        )
            .into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<SectionStudentsResponse>::error(
                "Failed to retrieve students",
            )),
        )
            .into_response(),
    }
}

#[derive(Serialize, Default)]
pub struct EnrolledStudentsResponse {
    pub students: Vec<EnrolledStudentRow>,
}

/// GET /api/students/instructor-enrolled
///
/// Enrolled students for every course taught by the acting instructor,
/// one row per `(student, course)` pair. Requires instructor privileges.
pub async fn get_enrolled_for_instructor(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    match EnrollmentModel::enrolled_rows_for_instructor(app_state.db(), claims.sub).await {
        Ok(students) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                EnrolledStudentsResponse { students },
                "Enrolled students retrieved successfully",
            )),
        )
            .into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<EnrolledStudentsResponse>::error(
                "Failed to retrieve enrolled students",
            )),
        )
            .into_response(),
    }
}
