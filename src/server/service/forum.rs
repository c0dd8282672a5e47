//! Forum categories, topics and posts.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::forum::{CreateCategoryDto, CreateTopicDto},
    server::{data::forum::ForumRepository, error::Error, service::retry::RetryContext},
};

pub struct ForumService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ForumService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_categories(&self) -> Result<Vec<entity::forum_category::Model>, Error> {
        let db = self.db;

        RetryContext::new()
            .execute_with_retry("forum category list", move || async move {
                Ok(ForumRepository::new(db).list_categories().await?)
            })
            .await
    }

    /// Creates a forum category.
    ///
    /// # Returns
    /// - `Ok(Model)`: The stored category
    /// - `Err(Error::Validation)`: Empty name
    pub async fn create_category(
        &self,
        input: CreateCategoryDto,
    ) -> Result<entity::forum_category::Model, Error> {
        if input.name.trim().is_empty() {
            return Err(Error::validation("Category name must not be empty"));
        }

        Ok(ForumRepository::new(self.db)
            .create_category(input.name, input.description)
            .await?)
    }

    /// Topics of a category, `Error::NotFound` if the category doesn't exist
    pub async fn list_topics(
        &self,
        category_id: i32,
    ) -> Result<Vec<entity::forum_topic::Model>, Error> {
        let forum_repo = ForumRepository::new(self.db);

        if forum_repo.find_category(category_id).await?.is_none() {
            return Err(Error::not_found(format!("Forum category {}", category_id)));
        }

        Ok(forum_repo.list_topics(category_id).await?)
    }

    /// Opens a topic together with its first post.
    ///
    /// The topic and its opening post are written in one transaction.
    ///
    /// # Arguments
    /// - `author_id`: User opening the topic
    /// - `category_id`: Category the topic is filed under
    /// - `input`: Title and the content of the first post
    ///
    /// # Returns
    /// - `Ok(Model)`: The new topic
    /// - `Err(Error::Validation)`: Empty title or content
    /// - `Err(Error::NotFound)`: No such category
    pub async fn create_topic(
        &self,
        author_id: i32,
        category_id: i32,
        input: CreateTopicDto,
    ) -> Result<entity::forum_topic::Model, Error> {
        if input.title.trim().is_empty() || input.content.trim().is_empty() {
            return Err(Error::validation("Topic title and content must not be empty"));
        }

        let txn = self.db.begin().await?;
        let forum_repo = ForumRepository::new(&txn);

        if forum_repo.find_category(category_id).await?.is_none() {
            return Err(Error::not_found(format!("Forum category {}", category_id)));
        }

        let topic = forum_repo
            .create_topic(category_id, author_id, input.title)
            .await?;
        forum_repo
            .create_post(topic.id, author_id, input.content)
            .await?;

        txn.commit().await?;

        tracing::debug!(topic_id = topic.id, category_id, author_id, "Forum topic opened");

        Ok(topic)
    }

    pub async fn list_posts(&self, topic_id: i32) -> Result<Vec<entity::forum_post::Model>, Error> {
        let forum_repo = ForumRepository::new(self.db);

        if forum_repo.find_topic(topic_id).await?.is_none() {
            return Err(Error::not_found(format!("Forum topic {}", topic_id)));
        }

        Ok(forum_repo.list_posts(topic_id).await?)
    }

    /// Replies to a topic.
    ///
    /// # Returns
    /// - `Ok(Model)`: The stored post
    /// - `Err(Error::Validation)`: Empty content
    /// - `Err(Error::NotFound)`: No such topic
    /// - `Err(Error::Conflict)`: The topic is locked
    pub async fn create_post(
        &self,
        author_id: i32,
        topic_id: i32,
        content: String,
    ) -> Result<entity::forum_post::Model, Error> {
        if content.trim().is_empty() {
            return Err(Error::validation("Post content must not be empty"));
        }

        let forum_repo = ForumRepository::new(self.db);

        let Some(topic) = forum_repo.find_topic(topic_id).await? else {
            return Err(Error::not_found(format!("Forum topic {}", topic_id)));
        };
        if topic.locked {
            return Err(Error::conflict(format!("Forum topic {} is locked", topic_id)));
        }

        Ok(forum_repo.create_post(topic_id, author_id, content).await?)
    }

    /// Locks or unlocks a topic; locking is idempotent
    pub async fn set_locked(
        &self,
        topic_id: i32,
        locked: bool,
    ) -> Result<entity::forum_topic::Model, Error> {
        let forum_repo = ForumRepository::new(self.db);

        let Some(topic) = forum_repo.find_topic(topic_id).await? else {
            return Err(Error::not_found(format!("Forum topic {}", topic_id)));
        };

        Ok(forum_repo.set_topic_locked(topic, locked).await?)
    }
}
