use crate::auth::repo::{PgUserRepository, UserRepository};
use crate::config::AppConfig;
use crate::db;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let pool = db::connect(&config.database).await?;
        db::migrate(&pool).await;

        let users = Arc::new(PgUserRepository::new(pool)) as Arc<dyn UserRepository>;

        Ok(Self::from_parts(users, config))
    }

    pub fn from_parts(users: Arc<dyn UserRepository>, config: Arc<AppConfig>) -> Self {
        Self { users, config }
    }
}
