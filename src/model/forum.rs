use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<entity::forum_category::Model> for CategoryDto {
    fn from(category: entity::forum_category::Model) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            created_at: category.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCategoryDto {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TopicDto {
    pub id: i32,
    pub category_id: i32,
    pub author_id: i32,
    pub title: String,
    pub locked: bool,
    pub created_at: NaiveDateTime,
}

impl From<entity::forum_topic::Model> for TopicDto {
    fn from(topic: entity::forum_topic::Model) -> Self {
        Self {
            id: topic.id,
            category_id: topic.category_id,
            author_id: topic.author_id,
            title: topic.title,
            locked: topic.locked,
            created_at: topic.created_at,
        }
    }
}

/// Opens a topic together with its first post
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTopicDto {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LockTopicDto {
    pub locked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostDto {
    pub id: i32,
    pub topic_id: i32,
    pub author_id: i32,
    pub content: String,
    pub created_at: NaiveDateTime,
}

impl From<entity::forum_post::Model> for PostDto {
    fn from(post: entity::forum_post::Model) -> Self {
        Self {
            id: post.id,
            topic_id: post.topic_id,
            author_id: post.author_id,
            content: post.content,
            created_at: post.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePostDto {
    pub content: String,
}
