use sea_orm::ConnectionTrait;

use crate::server::{data::user::UserRepository, error::Error};

/// Zeroes every user's monthly warning counter, returning how many users had warnings
pub async fn run<C: ConnectionTrait>(db: &C) -> Result<u64, Error> {
    let reset = UserRepository::new(db).reset_monthly_warnings().await?;

    tracing::info!(users = reset, "Monthly warning counters reset");

    Ok(reset)
}
