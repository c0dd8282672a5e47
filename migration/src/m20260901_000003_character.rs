use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260901_000001_roster_user::RosterUser;

static FK_CHARACTER_OWNER_ID: &str = "fk-character-owner_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Character::Table)
                    .if_not_exists()
                    .col(pk_auto(Character::Id))
                    .col(integer(Character::OwnerId))
                    .col(integer_null(Character::DepartmentId))
                    .col(string(Character::Name))
                    .col(string_null(Character::Callsign))
                    .col(text_null(Character::Biography))
                    .col(timestamp(Character::CreatedAt))
                    .col(timestamp(Character::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_CHARACTER_OWNER_ID)
                            .from(Character::Table, Character::OwnerId)
                            .to(RosterUser::Table, RosterUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Character::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Character {
    Table,
    Id,
    OwnerId,
    DepartmentId,
    Name,
    Callsign,
    Biography,
    CreatedAt,
    UpdatedAt,
}
