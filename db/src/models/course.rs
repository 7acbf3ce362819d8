use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set};
use serde::Serialize;

/// A course offered by the institution (e.g. "CS201 Data Structures").
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub code: String,
    pub title: String,
    pub credits: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("No RelationDef implemented")
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        code: &str,
        title: &str,
        credits: i32,
    ) -> Result<Self, DbErr> {
        let course = ActiveModel {
            code: Set(code.to_owned()),
            title: Set(title.to_owned()),
            credits: Set(credits),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        course.insert(db).await
    }
}
