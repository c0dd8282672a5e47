use axum::{extract::State, http::StatusCode, response::IntoResponse};
use entity::roster_user::Role;

use crate::{
    model::{
        api::ErrorDto,
        forum::{
            CategoryDto, CreateCategoryDto, CreatePostDto, CreateTopicDto, LockTopicDto, PostDto,
            TopicDto,
        },
    },
    server::{
        controller::util::{
            auth::AuthUser,
            extract::{Json, Path},
        },
        error::Error,
        model::app::AppState,
        service::forum::ForumService,
    },
};

pub static FORUM_TAG: &str = "forum";

#[utoipa::path(
    get,
    path = "/api/forum/categories",
    tag = FORUM_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Forum categories", body = Vec<CategoryDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_categories(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    let categories = ForumService::new(&state.db).list_categories().await?;
    let categories: Vec<CategoryDto> = categories.into_iter().map(CategoryDto::from).collect();

    Ok((StatusCode::OK, Json(categories)))
}

#[utoipa::path(
    post,
    path = "/api/forum/categories",
    tag = FORUM_TAG,
    request_body = CreateCategoryDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Category created", body = CategoryDto),
        (status = 400, description = "Invalid category", body = ErrorDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateCategoryDto>,
) -> Result<impl IntoResponse, Error> {
    user.require(Role::Admin)?;

    let category = ForumService::new(&state.db).create_category(input).await?;

    Ok((StatusCode::CREATED, Json(CategoryDto::from(category))))
}

#[utoipa::path(
    get,
    path = "/api/forum/categories/{category_id}/topics",
    tag = FORUM_TAG,
    params(("category_id" = i32, Path, description = "Category ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Topics in the category", body = Vec<TopicDto>),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_topics(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(category_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let topics = ForumService::new(&state.db).list_topics(category_id).await?;
    let topics: Vec<TopicDto> = topics.into_iter().map(TopicDto::from).collect();

    Ok((StatusCode::OK, Json(topics)))
}

/// Open a topic together with its first post
#[utoipa::path(
    post,
    path = "/api/forum/categories/{category_id}/topics",
    tag = FORUM_TAG,
    params(("category_id" = i32, Path, description = "Category ID")),
    request_body = CreateTopicDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Topic created", body = TopicDto),
        (status = 400, description = "Empty title or content", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_topic(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(category_id): Path<i32>,
    Json(input): Json<CreateTopicDto>,
) -> Result<impl IntoResponse, Error> {
    let topic = ForumService::new(&state.db)
        .create_topic(user.id, category_id, input)
        .await?;

    Ok((StatusCode::CREATED, Json(TopicDto::from(topic))))
}

#[utoipa::path(
    get,
    path = "/api/forum/topics/{topic_id}/posts",
    tag = FORUM_TAG,
    params(("topic_id" = i32, Path, description = "Topic ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Posts in the topic, oldest first", body = Vec<PostDto>),
        (status = 404, description = "Topic not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_posts(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(topic_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let posts = ForumService::new(&state.db).list_posts(topic_id).await?;
    let posts: Vec<PostDto> = posts.into_iter().map(PostDto::from).collect();

    Ok((StatusCode::OK, Json(posts)))
}

#[utoipa::path(
    post,
    path = "/api/forum/topics/{topic_id}/posts",
    tag = FORUM_TAG,
    params(("topic_id" = i32, Path, description = "Topic ID")),
    request_body = CreatePostDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Empty content", body = ErrorDto),
        (status = 404, description = "Topic not found", body = ErrorDto),
        (status = 409, description = "Topic is locked", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(topic_id): Path<i32>,
    Json(input): Json<CreatePostDto>,
) -> Result<impl IntoResponse, Error> {
    let post = ForumService::new(&state.db)
        .create_post(user.id, topic_id, input.content)
        .await?;

    Ok((StatusCode::CREATED, Json(PostDto::from(post))))
}

/// Lock or unlock a topic
#[utoipa::path(
    put,
    path = "/api/forum/topics/{topic_id}/lock",
    tag = FORUM_TAG,
    params(("topic_id" = i32, Path, description = "Topic ID")),
    request_body = LockTopicDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Topic updated", body = TopicDto),
        (status = 403, description = "Supervisor role required", body = ErrorDto),
        (status = 404, description = "Topic not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn lock_topic(
    State(state): State<AppState>,
    user: AuthUser,
    Path(topic_id): Path<i32>,
    Json(input): Json<LockTopicDto>,
) -> Result<impl IntoResponse, Error> {
    user.require(Role::Supervisor)?;

    let topic = ForumService::new(&state.db)
        .set_locked(topic_id, input.locked)
        .await?;

    Ok((StatusCode::OK, Json(TopicDto::from(topic))))
}
