use roster::server::{
    config::Config, model::app::AppState, router, scheduler::Scheduler, startup,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(e) = startup::init_logging() {
        eprintln!("Logging error: {}", e);
        std::process::exit(1);
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        tracing::error!("Server exited with error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), roster::server::error::Error> {
    let db = startup::connect_to_database(&config).await?;
    let state = AppState::from_config(db.clone(), &config);

    Scheduler::new(db, state.schedule.clone())
        .await?
        .start()
        .await?;

    let listener = startup::bind_listener(&config).await?;

    axum::serve(listener, router::routes().with_state(state))
        .await
        .map_err(|e| roster::server::error::Error::InternalError(e.to_string()))?;

    Ok(())
}
