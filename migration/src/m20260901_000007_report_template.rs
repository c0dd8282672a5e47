use sea_orm_migration::{prelude::*, schema::*};

static FK_FILLED_REPORT_TEMPLATE_ID: &str = "fk-filled_report-template_id";
static IDX_FILLED_REPORT_AUTHOR_ID: &str = "idx-filled_report-author_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReportTemplate::Table)
                    .if_not_exists()
                    .col(pk_auto(ReportTemplate::Id))
                    .col(integer_null(ReportTemplate::DepartmentId))
                    .col(string(ReportTemplate::Name))
                    .col(text_null(ReportTemplate::Description))
                    .col(json(ReportTemplate::Fields))
                    .col(boolean(ReportTemplate::Active).default(true))
                    .col(integer(ReportTemplate::CreatedBy))
                    .col(timestamp(ReportTemplate::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FilledReport::Table)
                    .if_not_exists()
                    .col(pk_auto(FilledReport::Id))
                    .col(integer(FilledReport::TemplateId))
                    .col(integer(FilledReport::AuthorId))
                    .col(json(FilledReport::Values))
                    .col(timestamp(FilledReport::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_FILLED_REPORT_TEMPLATE_ID)
                            .from(FilledReport::Table, FilledReport::TemplateId)
                            .to(ReportTemplate::Table, ReportTemplate::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_FILLED_REPORT_AUTHOR_ID)
                    .table(FilledReport::Table)
                    .col(FilledReport::AuthorId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_FILLED_REPORT_AUTHOR_ID)
                    .table(FilledReport::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(FilledReport::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ReportTemplate::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum ReportTemplate {
    Table,
    Id,
    DepartmentId,
    Name,
    Description,
    Fields,
    Active,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum FilledReport {
    Table,
    Id,
    TemplateId,
    AuthorId,
    Values,
    CreatedAt,
}
