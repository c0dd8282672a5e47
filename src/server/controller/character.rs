use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    model::{
        api::ErrorDto,
        character::{CharacterDto, CharacterInputDto},
    },
    server::{
        controller::util::{
            auth::AuthUser,
            extract::{Json, Path},
        },
        error::Error,
        model::app::AppState,
        service::character::CharacterService,
    },
};

pub static CHARACTER_TAG: &str = "character";

/// List the current user's characters
#[utoipa::path(
    get,
    path = "/api/characters",
    tag = CHARACTER_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Owned characters", body = Vec<CharacterDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_characters(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, Error> {
    let characters = CharacterService::new(&state.db).list_own(user.id).await?;
    let characters: Vec<CharacterDto> = characters.into_iter().map(CharacterDto::from).collect();

    Ok((StatusCode::OK, Json(characters)))
}

/// Create a character
#[utoipa::path(
    post,
    path = "/api/characters",
    tag = CHARACTER_TAG,
    request_body = CharacterInputDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Character created", body = CharacterDto),
        (status = 400, description = "Invalid character", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_character(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(input): Json<CharacterInputDto>,
) -> Result<impl IntoResponse, Error> {
    let character = CharacterService::new(&state.db)
        .create(user.id, input)
        .await?;

    Ok((StatusCode::CREATED, Json(CharacterDto::from(character))))
}

/// Update one of the current user's characters
#[utoipa::path(
    put,
    path = "/api/characters/{character_id}",
    tag = CHARACTER_TAG,
    params(("character_id" = i32, Path, description = "Character ID")),
    request_body = CharacterInputDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Character updated", body = CharacterDto),
        (status = 400, description = "Invalid character", body = ErrorDto),
        (status = 404, description = "Character not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_character(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(character_id): Path<i32>,
    Json(input): Json<CharacterInputDto>,
) -> Result<impl IntoResponse, Error> {
    let character = CharacterService::new(&state.db)
        .update(user.id, character_id, input)
        .await?;

    Ok((StatusCode::OK, Json(CharacterDto::from(character))))
}

/// Delete one of the current user's characters
#[utoipa::path(
    delete,
    path = "/api/characters/{character_id}",
    tag = CHARACTER_TAG,
    params(("character_id" = i32, Path, description = "Character ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Character deleted"),
        (status = 404, description = "Character not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_character(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(character_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    CharacterService::new(&state.db)
        .delete(user.id, character_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
