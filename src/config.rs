use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. `DATABASE_URL` wins over
    /// the individual `DB_*` parts when both are present.
    pub fn from_lookup<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let port = or("PORT", "5000")
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let url = match get("DATABASE_URL") {
            Some(url) => url,
            None => {
                let db_port = or("DB_PORT", "5432")
                    .parse::<u16>()
                    .context("DB_PORT must be a valid port number")?;
                format!(
                    "postgres://{}:{}@{}:{}/{}",
                    or("DB_USER", "postgres"),
                    or("DB_PASSWORD", ""),
                    or("DB_HOST", "localhost"),
                    db_port,
                    or("DB_NAME", "login_signup"),
                )
            }
        };

        let max_connections = or("DB_MAX_CONNECTIONS", "10")
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a positive integer")?;

        Ok(Self {
            host: or("APP_HOST", "0.0.0.0"),
            port,
            database: DatabaseConfig {
                url,
                max_connections,
            },
        })
    }
}
