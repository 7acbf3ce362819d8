use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{course, course_request, section, student};

/// Links a student to a course. A student appears at most once per course.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub student_id: i64,

    #[sea_orm(primary_key, auto_increment = false)]
    pub course_id: i64,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,

    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Denormalized projection of one enrolled student in one course, as
/// rendered in instructor-facing tables. Uniquely identified by
/// `(id, course_code)` since a student may appear once per enrolled course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrolledStudentRow {
    pub id: i64,
    pub roll_number: String,
    pub name: String,
    pub course_code: String,
    pub course_name: String,
    pub section_name: String,
    pub email: String,
}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        student_id: i64,
        course_id: i64,
    ) -> Result<Self, DbErr> {
        let enrollment = ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            created_at: Set(Utc::now()),
        };
        enrollment.insert(db).await
    }

    /// Builds the enrolled-student rows for every course the given
    /// instructor teaches (i.e. has an accepted course request for),
    /// sorted by roll number then course code.
    pub async fn enrolled_rows_for_instructor(
        db: &DatabaseConnection,
        instructor_id: i64,
    ) -> Result<Vec<EnrolledStudentRow>, DbErr> {
        let accepted = course_request::Entity::find()
            .filter(course_request::Column::InstructorId.eq(instructor_id))
            .filter(course_request::Column::Status.eq(course_request::Status::Accepted))
            .all(db)
            .await?;

        let course_ids: Vec<i64> = accepted.iter().map(|r| r.course_id).collect();
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let enrollments = Entity::find()
            .filter(Column::CourseId.is_in(course_ids.clone()))
            .all(db)
            .await?;
        if enrollments.is_empty() {
            return Ok(Vec::new());
        }

        let student_ids: Vec<i64> = enrollments.iter().map(|e| e.student_id).collect();

        let courses: HashMap<i64, course::Model> = course::Entity::find()
            .filter(course::Column::Id.is_in(course_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let students: HashMap<i64, student::Model> = student::Entity::find()
            .filter(student::Column::Id.is_in(student_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let sections: HashMap<i64, section::Model> = section::Entity::find()
            .all(db)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let mut rows = Vec::with_capacity(enrollments.len());
        for enrollment in &enrollments {
            let Some(student) = students.get(&enrollment.student_id) else {
                continue;
            };
            let Some(course) = courses.get(&enrollment.course_id) else {
                continue;
            };
            let section_name = sections
                .get(&student.section_id)
                .map(|s| s.name.clone())
                .unwrap_or_default();

            rows.push(EnrolledStudentRow {
                id: student.id,
                roll_number: student.roll_number.clone(),
                name: student.name.clone(),
                course_code: course.code.clone(),
                course_name: course.title.clone(),
                section_name,
                email: student.email.clone(),
            });
        }

        rows.sort_by(|a, b| {
            (a.roll_number.as_str(), a.course_code.as_str())
                .cmp(&(b.roll_number.as_str(), b.course_code.as_str()))
        });

        Ok(rows)
    }
}
