//! Ecologika backend client SDK
//!
//! Thin typed wrapper over the backend-as-a-service platform consumed by
//! the marketplace: auth provider, relational store and object store.
//! No domain logic lives here; workflows belong to `ecologika-app`.

mod auth_api;
mod config;
mod error;
mod http;
mod storage;
mod store;

pub use auth_api::AuthApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use storage::StorageApi;
pub use store::{StoreApi, TableQuery};

/// Umbrella client bundling the three backend capabilities
///
/// Cloning is cheap; all clones share the same bearer token slot, so a
/// sign-in through one handle authenticates the others.
#[derive(Debug, Clone)]
pub struct EcologikaClient {
    http: HttpClient,
}

impl EcologikaClient {
    /// Create a client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: HttpClient::new(config),
        }
    }

    /// Create a client from `ECOLOGIKA_API_URL` / `ECOLOGIKA_API_KEY`
    pub fn from_env() -> ClientResult<Self> {
        Ok(Self::new(&ClientConfig::from_env()?))
    }

    /// Auth provider endpoints
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.http.clone())
    }

    /// Relational store endpoints
    pub fn store(&self) -> StoreApi {
        StoreApi::new(self.http.clone())
    }

    /// Object store endpoints
    pub fn storage(&self) -> StorageApi {
        StorageApi::new(self.http.clone())
    }
}
