use sea_orm_migration::{prelude::*, schema::*};

static FK_EXAM_SESSION_EXAM_ID: &str = "fk-exam_session-exam_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Exam::Table)
                    .if_not_exists()
                    .col(pk_auto(Exam::Id))
                    .col(string(Exam::Title))
                    .col(integer_null(Exam::DepartmentId))
                    .col(json(Exam::Questions))
                    .col(integer(Exam::PassScore))
                    .col(integer(Exam::TimeLimitMinutes))
                    .col(timestamp(Exam::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ExamSession::Table)
                    .if_not_exists()
                    .col(pk_auto(ExamSession::Id))
                    .col(integer(ExamSession::ExamId))
                    .col(integer(ExamSession::UserId))
                    .col(integer_null(ExamSession::ApplicationId))
                    .col(timestamp(ExamSession::StartedAt))
                    .col(timestamp(ExamSession::ExpiresAt))
                    .col(timestamp_null(ExamSession::SubmittedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_EXAM_SESSION_EXAM_ID)
                            .from(ExamSession::Table, ExamSession::ExamId)
                            .to(Exam::Table, Exam::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ExamResult::Table)
                    .if_not_exists()
                    .col(pk_auto(ExamResult::Id))
                    .col(integer_uniq(ExamResult::SessionId))
                    .col(integer(ExamResult::ExamId))
                    .col(integer(ExamResult::UserId))
                    .col(integer(ExamResult::Score))
                    .col(boolean(ExamResult::Passed))
                    .col(timestamp(ExamResult::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ExamResult::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ExamSession::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Exam::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Exam {
    Table,
    Id,
    Title,
    DepartmentId,
    Questions,
    PassScore,
    TimeLimitMinutes,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ExamSession {
    Table,
    Id,
    ExamId,
    UserId,
    ApplicationId,
    StartedAt,
    ExpiresAt,
    SubmittedAt,
}

#[derive(DeriveIden)]
enum ExamResult {
    Table,
    Id,
    SessionId,
    ExamId,
    UserId,
    Score,
    Passed,
    CreatedAt,
}
