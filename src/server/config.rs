use crate::server::{error::config::ConfigError, scheduler::config as schedule_config};

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

pub struct Config {
    pub database_url: String,
    pub auth_jwt_secret: String,
    /// Expected `aud` claim, audience is not validated when unset
    pub auth_jwt_audience: Option<String>,
    pub bind_address: String,
    pub monthly_reset_cron: String,
    pub leave_sweep_cron: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from any variable source.
    ///
    /// # Returns
    /// - `Err(ConfigError::MissingEnvVar)`: `DATABASE_URL` or `AUTH_JWT_SECRET` is unset
    /// - `Err(ConfigError::InvalidEnvValue)`: `AUTH_JWT_SECRET` is blank
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required =
            |var: &str| lookup(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()));
        // Unset and empty variables are both treated as absent.
        let optional = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let auth_jwt_secret = required("AUTH_JWT_SECRET")?;
        if auth_jwt_secret.trim().is_empty() {
            return Err(ConfigError::invalid("AUTH_JWT_SECRET", "must not be empty"));
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            auth_jwt_secret,
            auth_jwt_audience: optional("AUTH_JWT_AUDIENCE"),
            bind_address: optional("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            monthly_reset_cron: optional("MONTHLY_RESET_CRON")
                .unwrap_or_else(|| schedule_config::monthly_reset::CRON_EXPRESSION.to_string()),
            leave_sweep_cron: optional("LEAVE_SWEEP_CRON")
                .unwrap_or_else(|| schedule_config::leave_sweep::CRON_EXPRESSION.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        Config::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn blank_secret_is_invalid() {
        let result = load(&[("DATABASE_URL", "postgres://roster"), ("AUTH_JWT_SECRET", "  ")]);

        let err = result.err().unwrap();
        assert!(matches!(
            &err,
            ConfigError::InvalidEnvValue { var, .. } if var == "AUTH_JWT_SECRET"
        ));
        assert_eq!(
            err.to_string(),
            "Invalid value for environment variable AUTH_JWT_SECRET: must not be empty"
        );
    }

    #[test]
    fn missing_database_url() {
        let result = load(&[("AUTH_JWT_SECRET", "secret")]);

        assert!(matches!(
            result,
            Err(ConfigError::MissingEnvVar(var)) if var == "DATABASE_URL"
        ));
    }

    #[test]
    fn empty_optionals_fall_back_to_defaults() {
        let config = load(&[
            ("DATABASE_URL", "postgres://roster"),
            ("AUTH_JWT_SECRET", "secret"),
            ("BIND_ADDRESS", ""),
            ("AUTH_JWT_AUDIENCE", " "),
        ])
        .unwrap();

        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.auth_jwt_audience, None);
        assert_eq!(
            config.monthly_reset_cron,
            schedule_config::monthly_reset::CRON_EXPRESSION
        );
    }
}
