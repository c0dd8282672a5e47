use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RosterUser::Table)
                    .if_not_exists()
                    .col(pk_auto(RosterUser::Id))
                    .col(string_uniq(RosterUser::AuthId))
                    .col(string(RosterUser::Username))
                    .col(string(RosterUser::Email))
                    .col(string_len(RosterUser::Role, 16))
                    .col(string_len(RosterUser::Status, 16))
                    .col(integer_null(RosterUser::PrimaryDepartmentId))
                    .col(integer_null(RosterUser::SecondaryDepartmentId))
                    .col(string_null(RosterUser::Division))
                    .col(string_null(RosterUser::Rank))
                    .col(integer(RosterUser::Warnings).default(0))
                    .col(integer(RosterUser::MonthlyWarnings).default(0))
                    .col(timestamp(RosterUser::CreatedAt))
                    .col(timestamp(RosterUser::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RosterUser::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum RosterUser {
    Table,
    Id,
    AuthId,
    Username,
    Email,
    Role,
    Status,
    PrimaryDepartmentId,
    SecondaryDepartmentId,
    Division,
    Rank,
    Warnings,
    MonthlyWarnings,
    CreatedAt,
    UpdatedAt,
}
