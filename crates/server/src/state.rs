use crate::di::DependenciesInject;
use anyhow::{Context, Result};
use notifier::RealtimeHub;
use shared::{
    abstract_trait::DynJwtService,
    config::{Config, ConnectionManager, JwtConfig},
};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub jwt_config: DynJwtService,
    pub di_container: DependenciesInject,
    pub realtime_hub: RealtimeHub,
    pub config: Config,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self> {
        info!("Connecting to database");
        let pool = ConnectionManager::new_pool(&config.database_url)
            .await
            .context("Failed to create database connection pool")?;

        let jwt_config = Arc::new(JwtConfig::new(&config.jwt_secret)) as DynJwtService;

        let realtime_hub = RealtimeHub::default();

        let di_container =
            DependenciesInject::new(pool, jwt_config.clone(), realtime_hub.clone(), &config)
                .context("Failed to initialize dependency injection container")?;

        Ok(Self {
            jwt_config,
            di_container,
            realtime_hub,
            config,
        })
    }
}
