use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SchedulerRun::Table)
                    .if_not_exists()
                    .col(pk_auto(SchedulerRun::Id))
                    .col(string_uniq(SchedulerRun::Job))
                    .col(timestamp(SchedulerRun::LastRunAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SchedulerRun::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum SchedulerRun {
    Table,
    Id,
    Job,
    LastRunAt,
}
