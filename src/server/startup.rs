use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::server::{config::Config, error::Error};

/// Install the global tracing subscriber, filtered by `RUST_LOG` (default `info`)
pub fn init_logging() -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| Error::InternalError(format!("Failed to initialize logging: {}", e)))
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    tracing::info!("Database connected and migrations applied");

    Ok(db)
}

pub async fn bind_listener(config: &Config) -> Result<TcpListener, Error> {
    let listener = TcpListener::bind(&config.bind_address)
        .await
        .map_err(|e| {
            Error::InternalError(format!(
                "Failed to bind to {}: {}",
                config.bind_address, e
            ))
        })?;

    tracing::info!("Listening on {}", config.bind_address);

    Ok(listener)
}
