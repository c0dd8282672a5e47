use super::*;

/// Expect only the provided fields to change
#[tokio::test]
async fn applies_partial_update() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::CadCall)
        .build()
        .await?;

    let cad_repo = CadRepository::new(&test.db);
    let created = cad_repo
        .create_call(1, call("Shots fired", "Grove Street", 2))
        .await?;

    let result = cad_repo
        .update_call(
            created.clone(),
            UpdateCallDto {
                status: Some(CallStatus::Active),
                ..Default::default()
            },
        )
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let updated = result.unwrap();
    assert_eq!(updated.status, CallStatus::Active);
    assert_eq!(updated.priority, 2);
    assert_eq!(updated.location, created.location);
    assert_eq!(updated.assigned_unit_id, None);

    Ok(())
}
