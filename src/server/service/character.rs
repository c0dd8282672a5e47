//! Role-play characters owned by users.

use sea_orm::DatabaseConnection;

use crate::{
    model::character::CharacterInputDto,
    server::{
        data::{character::CharacterRepository, department::DepartmentRepository},
        error::Error,
        service::retry::RetryContext,
    },
};

pub struct CharacterService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CharacterService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_own(&self, owner_id: i32) -> Result<Vec<entity::character::Model>, Error> {
        let db = self.db;

        RetryContext::new()
            .execute_with_retry("character list", move || async move {
                Ok(CharacterRepository::new(db).list_by_owner(owner_id).await?)
            })
            .await
    }

    pub async fn create(
        &self,
        owner_id: i32,
        input: CharacterInputDto,
    ) -> Result<entity::character::Model, Error> {
        let input = self.validate(input).await?;

        let character = CharacterRepository::new(self.db)
            .create(owner_id, input)
            .await?;

        tracing::debug!(character_id = character.id, owner_id, "Created character");

        Ok(character)
    }

    /// Updates a character of `owner_id`; other users' characters are reported as missing
    pub async fn update(
        &self,
        owner_id: i32,
        character_id: i32,
        input: CharacterInputDto,
    ) -> Result<entity::character::Model, Error> {
        let input = self.validate(input).await?;
        let character_repo = CharacterRepository::new(self.db);

        let character = self.find_owned(&character_repo, owner_id, character_id).await?;

        Ok(character_repo.update(character, input).await?)
    }

    pub async fn delete(&self, owner_id: i32, character_id: i32) -> Result<(), Error> {
        let character_repo = CharacterRepository::new(self.db);

        let character = self.find_owned(&character_repo, owner_id, character_id).await?;
        character_repo.delete(character.id).await?;

        tracing::debug!(character_id, owner_id, "Deleted character");

        Ok(())
    }

    async fn find_owned(
        &self,
        character_repo: &CharacterRepository<'_, DatabaseConnection>,
        owner_id: i32,
        character_id: i32,
    ) -> Result<entity::character::Model, Error> {
        character_repo
            .find_by_id(character_id)
            .await?
            .filter(|character| character.owner_id == owner_id)
            .ok_or_else(|| Error::not_found(format!("Character {}", character_id)))
    }

    async fn validate(&self, mut input: CharacterInputDto) -> Result<CharacterInputDto, Error> {
        input.name = input.name.trim().to_string();
        if input.name.is_empty() {
            return Err(Error::validation("Character name must not be empty"));
        }

        if let Some(department_id) = input.department_id {
            if DepartmentRepository::new(self.db)
                .find_by_id(department_id)
                .await?
                .is_none()
            {
                return Err(Error::validation(format!(
                    "Department {} does not exist",
                    department_id
                )));
            }
        }

        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use roster_test_utils::prelude::*;

    use super::*;

    fn input(name: &str, department_id: Option<i32>) -> CharacterInputDto {
        CharacterInputDto {
            name: name.to_string(),
            department_id,
            callsign: Some("1-ADAM-12".to_string()),
            biography: None,
        }
    }

    /// Expect a character owned by the caller
    #[tokio::test]
    async fn creates_character() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_user_tables()
            .with_department("Police Department")
            .build()
            .await?;
        let member = test.user().insert_member("auth|1", Some(1)).await?;

        let character_service = CharacterService::new(&test.db);
        let result = character_service
            .create(member.id, input(" Jane Doe ", Some(1)))
            .await;

        assert!(result.is_ok(), "Error: {:?}", result);
        let character = result.unwrap();
        assert_eq!(character.owner_id, member.id);
        assert_eq!(character.name, "Jane Doe");

        Ok(())
    }

    /// Expect Validation when the department does not exist
    #[tokio::test]
    async fn rejects_unknown_department() -> Result<(), TestError> {
        let test = TestBuilder::new().with_user_tables().build().await?;
        let member = test.user().insert_member("auth|1", None).await?;

        let character_service = CharacterService::new(&test.db);
        let result = character_service
            .create(member.id, input("Jane Doe", Some(3)))
            .await;

        assert!(matches!(result, Err(Error::Validation(_))));

        Ok(())
    }

    /// Expect NotFound when editing or deleting someone else's character
    #[tokio::test]
    async fn hides_foreign_characters() -> Result<(), TestError> {
        let test = TestBuilder::new().with_user_tables().build().await?;
        let owner = test.user().insert_member("auth|1", None).await?;
        let other = test.user().insert_member("auth|2", None).await?;

        let character_service = CharacterService::new(&test.db);
        let character = character_service
            .create(owner.id, input("Jane Doe", None))
            .await
            .unwrap();

        let update = character_service
            .update(other.id, character.id, input("John Doe", None))
            .await;
        let delete = character_service.delete(other.id, character.id).await;

        assert!(matches!(update, Err(Error::NotFound(_))));
        assert!(matches!(delete, Err(Error::NotFound(_))));
        assert_eq!(character_service.list_own(owner.id).await.unwrap().len(), 1);

        Ok(())
    }
}
