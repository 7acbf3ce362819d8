use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set};
use serde::Serialize;

/// One scheduled class occurrence for a course, section and teacher.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "timetable_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub section_id: i64,
    pub teacher_id: i64,
    /// 0 = Monday through 6 = Sunday.
    pub day_of_week: i32,
    /// Times are stored as "HH:MM" strings.
    pub start_time: String,
    pub end_time: String,
    pub created_at: DateTimeUtc,
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
        belongs_to = "super::section::Entity",
        from = "Column::SectionId",
        to = "super::section::Column::Id"
    )]
    Section,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TeacherId",
        to = "super::user::Column::Id"
    )]
    Teacher,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        course_id: i64,
        section_id: i64,
        teacher_id: i64,
        day_of_week: i32,
        start_time: &str,
        end_time: &str,
    ) -> Result<Self, DbErr> {
        let entry = ActiveModel {
            course_id: Set(course_id),
            section_id: Set(section_id),
            teacher_id: Set(teacher_id),
            day_of_week: Set(day_of_week),
            start_time: Set(start_time.to_owned()),
            end_time: Set(end_time.to_owned()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        entry.insert(db).await
    }
}
