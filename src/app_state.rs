use std::sync::Arc;

use crate::{
    config::Config,
    infrastructure::{connect_directory, CampusDirectory},
    services::ProfileResolver,
};

/// Shared state of the academic backend. Cloned per request; the directory
/// client inside is built once per process.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub directory: Arc<dyn CampusDirectory>,
    pub profiles: ProfileResolver,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let directory = connect_directory(&config.database).await?;
        Ok(Self::with_directory(config, directory))
    }

    pub fn with_directory(config: Config, directory: Arc<dyn CampusDirectory>) -> Self {
        Self {
            profiles: ProfileResolver::new(directory.clone()),
            directory,
            config,
        }
    }
}
