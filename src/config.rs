use crate::errors::ProgressError;
use crate::models::ChallengeConfig;
use std::env;
use std::net::SocketAddr;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub challenge: ChallengeConfig,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ProgressError> {
        Self::from_values(env::var("PORT").ok(), env::var("CHALLENGE_LENGTH").ok())
    }

    fn from_values(
        port: Option<String>,
        challenge_length: Option<String>,
    ) -> Result<Self, ProgressError> {
        let port = port
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let challenge = match challenge_length {
            Some(value) => {
                let length = value
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| ProgressError::InvalidConfig(value.clone()))?;
                ChallengeConfig::new(length)?
            }
            None => ChallengeConfig::default(),
        };

        Ok(Self { port, challenge })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
