use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202506010001_create_users::Migration),
            Box::new(migrations::m202506010002_create_programs::Migration),
            Box::new(migrations::m202506010003_create_majors::Migration),
            Box::new(migrations::m202506010004_create_sections::Migration),
            Box::new(migrations::m202506010005_create_students::Migration),
            Box::new(migrations::m202506010006_create_courses::Migration),
            Box::new(migrations::m202506010007_create_course_requests::Migration),
            Box::new(migrations::m202506010008_create_timetable_entries::Migration),
            Box::new(migrations::m202506010009_create_enrollments::Migration),
        ]
    }
}
