use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;

use crate::auth::password::{Argon2Hasher, PasswordHasher};
use crate::auth::service::AuthService;
use crate::auth::store::{PgUserStore, UserStore};
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub auth: Arc<AuthService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = sqlx::postgres::PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        Ok(Self::from_parts(db, config))
    }

    pub fn from_parts(db: PgPool, config: Arc<AppConfig>) -> Self {
        let store = Arc::new(PgUserStore::new(db.clone())) as Arc<dyn UserStore>;
        let hasher = Arc::new(Argon2Hasher) as Arc<dyn PasswordHasher>;
        let auth = Arc::new(AuthService::new(store, hasher));

        Self { db, auth, config }
    }
}
