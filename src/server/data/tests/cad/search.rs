use super::*;

/// Expect calls matched by title or location and units by callsign
#[tokio::test]
async fn matches_calls_and_units() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::CadUnit)
        .with_table(entity::prelude::CadCall)
        .build()
        .await?;

    let cad_repo = CadRepository::new(&test.db);
    cad_repo
        .create_call(1, call("Shots fired", "Grove Street", 1))
        .await?;
    cad_repo
        .create_call(1, call("Traffic stop", "Vinewood Blvd", 3))
        .await?;
    cad_repo
        .create_call(1, call("Noise complaint", "Grove Street", 5))
        .await?;
    cad_repo.create_unit("1-ADAM-12".to_string(), None, None).await?;
    cad_repo.create_unit("2-LINCOLN-5".to_string(), None, None).await?;

    let calls = cad_repo.search_calls("Grove").await?;
    let traffic = cad_repo.search_calls("Traffic").await?;
    let units = cad_repo.search_units("ADAM").await?;

    assert_eq!(calls.len(), 2);
    assert_eq!(traffic.len(), 1);
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].callsign, "1-ADAM-12");

    Ok(())
}

/// Expect calls listed with the most urgent priority first
#[tokio::test]
async fn lists_calls_by_priority() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::CadCall)
        .build()
        .await?;

    let cad_repo = CadRepository::new(&test.db);
    cad_repo.create_call(1, call("Low", "A", 4)).await?;
    cad_repo.create_call(1, call("High", "B", 1)).await?;

    let calls = cad_repo.list_calls().await?;

    assert_eq!(calls[0].title, "High");
    assert_eq!(calls[0].status, CallStatus::Pending);

    Ok(())
}
