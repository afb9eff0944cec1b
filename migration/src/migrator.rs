use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202601050001_create_users::Migration),
            Box::new(migrations::m202601050002_create_auth_tokens::Migration),
            Box::new(migrations::m202601050003_create_categories::Migration),
            Box::new(migrations::m202601050004_create_seminars::Migration),
            Box::new(migrations::m202601050005_create_planned_seminars::Migration),
            Box::new(migrations::m202601050006_create_attendance::Migration),
            Box::new(migrations::m202601050007_create_evaluations::Migration),
            Box::new(migrations::m202601050008_create_certificates::Migration),
        ]
    }
}
