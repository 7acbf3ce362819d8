use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set};
use serde::Serialize;

/// A major offered within a program.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "majors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Program this major belongs to (foreign key to `programs`).
    pub program_id: i64,
    pub name: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::program::Entity",
        from = "Column::ProgramId",
        to = "super::program::Column::Id"
    )]
    Program,
}

impl Related<super::program::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Program.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(db: &DatabaseConnection, program_id: i64, name: &str) -> Result<Self, DbErr> {
        let major = ActiveModel {
            program_id: Set(program_id),
            name: Set(name.to_owned()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        major.insert(db).await
    }
}
