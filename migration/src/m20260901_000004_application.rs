use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260901_000001_roster_user::RosterUser;

static IDX_APPLICATION_AUTHOR_ID: &str = "idx-application-author_id";
static IDX_APPLICATION_STATUS: &str = "idx-application-status";
static FK_APPLICATION_AUTHOR_ID: &str = "fk-application-author_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Application::Table)
                    .if_not_exists()
                    .col(pk_auto(Application::Id))
                    .col(integer(Application::AuthorId))
                    .col(string_len(Application::Kind, 24))
                    .col(string_len(Application::Status, 24))
                    .col(json(Application::Data))
                    .col(json(Application::StatusHistory))
                    .col(integer_null(Application::ReviewerId))
                    .col(timestamp(Application::CreatedAt))
                    .col(timestamp(Application::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_APPLICATION_AUTHOR_ID)
                    .table(Application::Table)
                    .col(Application::AuthorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_APPLICATION_STATUS)
                    .table(Application::Table)
                    .col(Application::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_APPLICATION_AUTHOR_ID)
                    .from_tbl(Application::Table)
                    .from_col(Application::AuthorId)
                    .to_tbl(RosterUser::Table)
                    .to_col(RosterUser::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_APPLICATION_AUTHOR_ID)
                    .table(Application::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_APPLICATION_STATUS)
                    .table(Application::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_APPLICATION_AUTHOR_ID)
                    .table(Application::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Application::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Application {
    Table,
    Id,
    AuthorId,
    Kind,
    Status,
    Data,
    StatusHistory,
    ReviewerId,
    CreatedAt,
    UpdatedAt,
}
