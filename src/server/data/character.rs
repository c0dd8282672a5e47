use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::model::character::CharacterInputDto;

pub struct CharacterRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CharacterRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        owner_id: i32,
        input: CharacterInputDto,
    ) -> Result<entity::character::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let character = entity::character::ActiveModel {
            owner_id: ActiveValue::Set(owner_id),
            department_id: ActiveValue::Set(input.department_id),
            name: ActiveValue::Set(input.name),
            callsign: ActiveValue::Set(input.callsign),
            biography: ActiveValue::Set(input.biography),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        character.insert(self.db).await
    }

    pub async fn find_by_id(
        &self,
        character_id: i32,
    ) -> Result<Option<entity::character::Model>, DbErr> {
        entity::prelude::Character::find_by_id(character_id)
            .one(self.db)
            .await
    }

    pub async fn list_by_owner(
        &self,
        owner_id: i32,
    ) -> Result<Vec<entity::character::Model>, DbErr> {
        entity::prelude::Character::find()
            .filter(entity::character::Column::OwnerId.eq(owner_id))
            .order_by_asc(entity::character::Column::Id)
            .all(self.db)
            .await
    }

    /// Replaces the editable fields of a character
    pub async fn update(
        &self,
        character: entity::character::Model,
        input: CharacterInputDto,
    ) -> Result<entity::character::Model, DbErr> {
        let mut character = character.into_active_model();
        character.name = ActiveValue::Set(input.name);
        character.department_id = ActiveValue::Set(input.department_id);
        character.callsign = ActiveValue::Set(input.callsign);
        character.biography = ActiveValue::Set(input.biography);
        character.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        character.update(self.db).await
    }

    /// Deletes a character
    ///
    /// Returns OK regardless of the character existing, check
    /// [`DeleteResult::rows_affected`] to confirm.
    pub async fn delete(&self, character_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Character::delete_by_id(character_id)
            .exec(self.db)
            .await
    }
}
