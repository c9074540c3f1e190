use crate::config::ServiceConfig;
use crate::models::ChallengeConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn challenge(&self) -> ChallengeConfig {
        self.config.challenge
    }
}
