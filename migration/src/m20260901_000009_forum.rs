use sea_orm_migration::{prelude::*, schema::*};

static FK_FORUM_TOPIC_CATEGORY_ID: &str = "fk-forum_topic-category_id";
static FK_FORUM_POST_TOPIC_ID: &str = "fk-forum_post-topic_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ForumCategory::Table)
                    .if_not_exists()
                    .col(pk_auto(ForumCategory::Id))
                    .col(string(ForumCategory::Name))
                    .col(text_null(ForumCategory::Description))
                    .col(timestamp(ForumCategory::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ForumTopic::Table)
                    .if_not_exists()
                    .col(pk_auto(ForumTopic::Id))
                    .col(integer(ForumTopic::CategoryId))
                    .col(integer(ForumTopic::AuthorId))
                    .col(string(ForumTopic::Title))
                    .col(boolean(ForumTopic::Locked).default(false))
                    .col(timestamp(ForumTopic::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_FORUM_TOPIC_CATEGORY_ID)
                            .from(ForumTopic::Table, ForumTopic::CategoryId)
                            .to(ForumCategory::Table, ForumCategory::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ForumPost::Table)
                    .if_not_exists()
                    .col(pk_auto(ForumPost::Id))
                    .col(integer(ForumPost::TopicId))
                    .col(integer(ForumPost::AuthorId))
                    .col(text(ForumPost::Content))
                    .col(timestamp(ForumPost::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_FORUM_POST_TOPIC_ID)
                            .from(ForumPost::Table, ForumPost::TopicId)
                            .to(ForumTopic::Table, ForumTopic::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ForumPost::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ForumTopic::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ForumCategory::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum ForumCategory {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ForumTopic {
    Table,
    Id,
    CategoryId,
    AuthorId,
    Title,
    Locked,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ForumPost {
    Table,
    Id,
    TopicId,
    AuthorId,
    Content,
    CreatedAt,
}
