use sea_orm::DatabaseConnection;

use crate::server::{
    cad::broadcaster::CadBroadcaster, config::Config, model::auth::AuthKeys,
    scheduler::config::ScheduleConfig,
};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub auth: AuthKeys,
    /// Fan-out of dispatch events to connected WebSocket clients
    pub cad: CadBroadcaster,
    /// Cron expressions the scheduler was started with
    pub schedule: ScheduleConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, auth: AuthKeys, schedule: ScheduleConfig) -> Self {
        Self {
            db,
            auth,
            cad: CadBroadcaster::new(),
            schedule,
        }
    }

    pub fn from_config(db: DatabaseConnection, config: &Config) -> Self {
        Self::new(
            db,
            AuthKeys::new(
                &config.auth_jwt_secret,
                config.auth_jwt_audience.as_deref(),
            ),
            ScheduleConfig {
                monthly_reset_cron: config.monthly_reset_cron.clone(),
                leave_sweep_cron: config.leave_sweep_cron.clone(),
            },
        )
    }
}
