use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CharacterDto {
    pub id: i32,
    pub owner_id: i32,
    pub department_id: Option<i32>,
    pub name: String,
    pub callsign: Option<String>,
    pub biography: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<entity::character::Model> for CharacterDto {
    fn from(character: entity::character::Model) -> Self {
        Self {
            id: character.id,
            owner_id: character.owner_id,
            department_id: character.department_id,
            name: character.name,
            callsign: character.callsign,
            biography: character.biography,
            created_at: character.created_at,
            updated_at: character.updated_at,
        }
    }
}

/// Body for creating or replacing a character
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CharacterInputDto {
    pub name: String,
    pub department_id: Option<i32>,
    pub callsign: Option<String>,
    pub biography: Option<String>,
}
