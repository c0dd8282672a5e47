use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CadUnit::Table)
                    .if_not_exists()
                    .col(pk_auto(CadUnit::Id))
                    .col(string_uniq(CadUnit::Callsign))
                    .col(integer_null(CadUnit::UserId))
                    .col(integer_null(CadUnit::DepartmentId))
                    .col(string_len(CadUnit::Status, 16))
                    .col(timestamp(CadUnit::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CadCall::Table)
                    .if_not_exists()
                    .col(pk_auto(CadCall::Id))
                    .col(string(CadCall::Title))
                    .col(text_null(CadCall::Description))
                    .col(string(CadCall::Location))
                    .col(integer(CadCall::Priority))
                    .col(string_len(CadCall::Status, 16))
                    .col(integer_null(CadCall::AssignedUnitId))
                    .col(integer(CadCall::CreatedBy))
                    .col(timestamp(CadCall::CreatedAt))
                    .col(timestamp(CadCall::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CadCall::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CadUnit::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum CadUnit {
    Table,
    Id,
    Callsign,
    UserId,
    DepartmentId,
    Status,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CadCall {
    Table,
    Id,
    Title,
    Description,
    Location,
    Priority,
    Status,
    AssignedUnitId,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
