pub use sea_orm_migration::prelude::*;

mod m20260901_000001_roster_user;
mod m20260901_000002_department;
mod m20260901_000003_character;
mod m20260901_000004_application;
mod m20260901_000005_notification;
mod m20260901_000006_report;
mod m20260901_000007_report_template;
mod m20260901_000008_exam;
mod m20260901_000009_forum;
mod m20260901_000010_cad;
mod m20260901_000011_scheduler_run;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260901_000001_roster_user::Migration),
            Box::new(m20260901_000002_department::Migration),
            Box::new(m20260901_000003_character::Migration),
            Box::new(m20260901_000004_application::Migration),
            Box::new(m20260901_000005_notification::Migration),
            Box::new(m20260901_000006_report::Migration),
            Box::new(m20260901_000007_report_template::Migration),
            Box::new(m20260901_000008_exam::Migration),
            Box::new(m20260901_000009_forum::Migration),
            Box::new(m20260901_000010_cad::Migration),
            Box::new(m20260901_000011_scheduler_run::Migration),
        ]
    }
}
