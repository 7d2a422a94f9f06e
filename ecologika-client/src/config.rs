//! Client configuration

use crate::error::{ClientError, ClientResult};

/// Configuration for connecting to the backend platform
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Platform base URL (e.g., "https://project.example.co")
    pub base_url: String,

    /// Public (anonymous) API key supplied at boot time
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new configuration
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: 30,
        }
    }

    /// Load configuration from the environment
    ///
    /// Reads `ECOLOGIKA_API_URL` and `ECOLOGIKA_API_KEY`, honoring a
    /// `.env` file when present.
    pub fn from_env() -> ClientResult<Self> {
        dotenv::dotenv().ok();

        let base_url = std::env::var("ECOLOGIKA_API_URL")
            .map_err(|_| ClientError::Config("ECOLOGIKA_API_URL is not set".into()))?;
        let api_key = std::env::var("ECOLOGIKA_API_KEY")
            .map_err(|_| ClientError::Config("ECOLOGIKA_API_KEY is not set".into()))?;

        Ok(Self::new(base_url, api_key))
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("https://api.example.co", "anon-key");
        assert_eq!(config.timeout, 30);
        assert_eq!(config.with_timeout(5).timeout, 5);
    }
}
