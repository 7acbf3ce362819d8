use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A request for an instructor to take on a course.
///
/// Requests start `Pending` with no instructor attached; accepting one
/// claims it for the acting instructor.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "course_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    /// Instructor that accepted (or was assigned) the request.
    pub instructor_id: Option<i64>,
    pub status: Status,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

/// Backed by a `course_request_status` enum in the database.
#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Deserialize,
    Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "course_request_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Status {
    #[sea_orm(string_value = "pending")]
    Pending,

    #[sea_orm(string_value = "accepted")]
    Accepted,

    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::InstructorId",
        to = "super::user::Column::Id"
    )]
    Instructor,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Opens a new `Pending` request for the given course.
    pub async fn create(db: &DatabaseConnection, course_id: i64) -> Result<Self, DbErr> {
        let now = Utc::now();
        let request = ActiveModel {
            course_id: Set(course_id),
            instructor_id: Set(None),
            status: Set(Status::Pending),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        request.insert(db).await
    }

    /// Marks the request accepted and claims it for `instructor_id`.
    pub async fn mark_accepted(
        self,
        db: &DatabaseConnection,
        instructor_id: i64,
    ) -> Result<Self, DbErr> {
        let mut active: ActiveModel = self.into();
        active.instructor_id = Set(Some(instructor_id));
        active.status = Set(Status::Accepted);
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    /// Marks the request rejected.
    pub async fn mark_rejected(self, db: &DatabaseConnection) -> Result<Self, DbErr> {
        let mut active: ActiveModel = self.into();
        active.status = Set(Status::Rejected);
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }
}
