use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

pub struct ForumRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ForumRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create_category(
        &self,
        name: String,
        description: Option<String>,
    ) -> Result<entity::forum_category::Model, DbErr> {
        let category = entity::forum_category::ActiveModel {
            name: ActiveValue::Set(name),
            description: ActiveValue::Set(description),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        category.insert(self.db).await
    }

    pub async fn list_categories(&self) -> Result<Vec<entity::forum_category::Model>, DbErr> {
        entity::prelude::ForumCategory::find()
            .order_by_asc(entity::forum_category::Column::Name)
            .all(self.db)
            .await
    }

    pub async fn find_category(
        &self,
        category_id: i32,
    ) -> Result<Option<entity::forum_category::Model>, DbErr> {
        entity::prelude::ForumCategory::find_by_id(category_id)
            .one(self.db)
            .await
    }

    pub async fn create_topic(
        &self,
        category_id: i32,
        author_id: i32,
        title: String,
    ) -> Result<entity::forum_topic::Model, DbErr> {
        let topic = entity::forum_topic::ActiveModel {
            category_id: ActiveValue::Set(category_id),
            author_id: ActiveValue::Set(author_id),
            title: ActiveValue::Set(title),
            locked: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        topic.insert(self.db).await
    }

    /// Topics of a category, newest first
    pub async fn list_topics(
        &self,
        category_id: i32,
    ) -> Result<Vec<entity::forum_topic::Model>, DbErr> {
        entity::prelude::ForumTopic::find()
            .filter(entity::forum_topic::Column::CategoryId.eq(category_id))
            .order_by_desc(entity::forum_topic::Column::CreatedAt)
            .order_by_desc(entity::forum_topic::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn find_topic(
        &self,
        topic_id: i32,
    ) -> Result<Option<entity::forum_topic::Model>, DbErr> {
        entity::prelude::ForumTopic::find_by_id(topic_id)
            .one(self.db)
            .await
    }

    pub async fn set_topic_locked(
        &self,
        topic: entity::forum_topic::Model,
        locked: bool,
    ) -> Result<entity::forum_topic::Model, DbErr> {
        let mut topic = topic.into_active_model();
        topic.locked = ActiveValue::Set(locked);

        topic.update(self.db).await
    }

    pub async fn create_post(
        &self,
        topic_id: i32,
        author_id: i32,
        content: String,
    ) -> Result<entity::forum_post::Model, DbErr> {
        let post = entity::forum_post::ActiveModel {
            topic_id: ActiveValue::Set(topic_id),
            author_id: ActiveValue::Set(author_id),
            content: ActiveValue::Set(content),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        post.insert(self.db).await
    }

    /// Posts of a topic in reading order
    pub async fn list_posts(
        &self,
        topic_id: i32,
    ) -> Result<Vec<entity::forum_post::Model>, DbErr> {
        entity::prelude::ForumPost::find()
            .filter(entity::forum_post::Column::TopicId.eq(topic_id))
            .order_by_asc(entity::forum_post::Column::CreatedAt)
            .order_by_asc(entity::forum_post::Column::Id)
            .all(self.db)
            .await
    }
}
