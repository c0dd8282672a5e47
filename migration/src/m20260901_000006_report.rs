use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Report::Table)
                    .if_not_exists()
                    .col(pk_auto(Report::Id))
                    .col(integer(Report::AuthorId))
                    .col(integer_null(Report::DepartmentId))
                    .col(string(Report::Title))
                    .col(text(Report::Content))
                    .col(string_len(Report::Status, 16))
                    .col(timestamp(Report::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SupportTicket::Table)
                    .if_not_exists()
                    .col(pk_auto(SupportTicket::Id))
                    .col(integer(SupportTicket::AuthorId))
                    .col(string(SupportTicket::Subject))
                    .col(text(SupportTicket::Message))
                    .col(string_len(SupportTicket::Status, 16))
                    .col(text_null(SupportTicket::Response))
                    .col(timestamp(SupportTicket::CreatedAt))
                    .col(timestamp(SupportTicket::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Complaint::Table)
                    .if_not_exists()
                    .col(pk_auto(Complaint::Id))
                    .col(integer(Complaint::AuthorId))
                    .col(integer_null(Complaint::TargetUserId))
                    .col(string(Complaint::Subject))
                    .col(text(Complaint::Message))
                    .col(string_len(Complaint::Status, 16))
                    .col(text_null(Complaint::Resolution))
                    .col(timestamp(Complaint::CreatedAt))
                    .col(timestamp(Complaint::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Complaint::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SupportTicket::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Report::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Report {
    Table,
    Id,
    AuthorId,
    DepartmentId,
    Title,
    Content,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SupportTicket {
    Table,
    Id,
    AuthorId,
    Subject,
    Message,
    Status,
    Response,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Complaint {
    Table,
    Id,
    AuthorId,
    TargetUserId,
    Subject,
    Message,
    Status,
    Resolution,
    CreatedAt,
    UpdatedAt,
}
