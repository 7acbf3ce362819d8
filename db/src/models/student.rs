use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A registered student in the `students` table.
///
/// Students are created in `Pending` status by the public registration
/// endpoint; an admin later approves or rejects them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique roll number in the form `u` followed by 8 digits.
    pub roll_number: String,
    pub name: String,
    pub email: String,
    pub program_id: i64,
    pub major_id: i64,
    pub section_id: i64,
    pub status: Status,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

/// Registration status. Backed by a `student_status` enum in the database.
#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Deserialize,
    Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "student_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Status {
    #[sea_orm(string_value = "pending")]
    Pending,

    #[sea_orm(string_value = "approved")]
    Approved,

    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::program::Entity",
        from = "Column::ProgramId",
        to = "super::program::Column::Id"
    )]
    Program,

    #[sea_orm(
        belongs_to = "super::major::Entity",
        from = "Column::MajorId",
        to = "super::major::Column::Id"
    )]
    Major,

    #[sea_orm(
        belongs_to = "super::section::Entity",
        from = "Column::SectionId",
        to = "super::section::Column::Id"
    )]
    Section,
}

impl Related<super::section::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Section.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Registers a new student in `Pending` status.
    pub async fn create(
        db: &DatabaseConnection,
        roll_number: &str,
        name: &str,
        email: &str,
        program_id: i64,
        major_id: i64,
        section_id: i64,
    ) -> Result<Self, DbErr> {
        let now = Utc::now();
        let student = ActiveModel {
            roll_number: Set(roll_number.to_owned()),
            name: Set(name.to_owned()),
            email: Set(email.to_owned()),
            program_id: Set(program_id),
            major_id: Set(major_id),
            section_id: Set(section_id),
            status: Set(Status::Pending),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        student.insert(db).await
    }

    pub async fn get_by_roll_number(
        db: &DatabaseConnection,
        roll_number: &str,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::RollNumber.eq(roll_number))
            .one(db)
            .await
    }

    pub async fn get_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Self>, DbErr> {
        Entity::find().filter(Column::Email.eq(email)).one(db).await
    }

    /// Sets the registration status, bumping `updated_at`.
    ///
    /// Returns `Ok(None)` if no student with the given id exists.
    pub async fn set_status(
        db: &DatabaseConnection,
        id: i64,
        status: Status,
    ) -> Result<Option<Self>, DbErr> {
        let Some(existing) = Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        active.status = Set(status);
        active.updated_at = Set(Utc::now());
        active.update(db).await.map(Some)
    }
}
