use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260901_000001_roster_user::RosterUser;

static IDX_NOTIFICATION_USER_ID: &str = "idx-notification-user_id";
static FK_NOTIFICATION_USER_ID: &str = "fk-notification-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notification::Table)
                    .if_not_exists()
                    .col(pk_auto(Notification::Id))
                    .col(integer(Notification::UserId))
                    .col(string(Notification::Title))
                    .col(text(Notification::Message))
                    .col(string_len(Notification::Kind, 32))
                    .col(boolean(Notification::Read).default(false))
                    .col(timestamp(Notification::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_NOTIFICATION_USER_ID)
                            .from(Notification::Table, Notification::UserId)
                            .to(RosterUser::Table, RosterUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_NOTIFICATION_USER_ID)
                    .table(Notification::Table)
                    .col(Notification::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_NOTIFICATION_USER_ID)
                    .table(Notification::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Notification::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Notification {
    Table,
    Id,
    UserId,
    Title,
    Message,
    Kind,
    Read,
    CreatedAt,
}
