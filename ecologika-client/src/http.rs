//! HTTP transport for the backend platform
//!
//! Every request carries the public API key; requests made after sign-in
//! additionally carry the session's bearer token. The token slot is
//! shared across clones so one sign-in authenticates every API handle.

use crate::{ClientConfig, ClientError, ClientResult};
use parking_lot::RwLock;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// HTTP client for making requests to the backend platform
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    api_key: String,
    token: Arc<RwLock<Option<String>>>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Store the session bearer token used on subsequent requests
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    /// Drop the session bearer token (sign-out)
    pub fn clear_token(&self) {
        *self.token.write() = None;
    }

    /// Current bearer token, if any
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Platform base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request with auth headers applied
    ///
    /// Unauthenticated requests fall back to the public API key as the
    /// bearer, which is what the platform expects.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let bearer = self.token().unwrap_or_else(|| self.api_key.clone());

        self.client
            .request(method, &url)
            .header("apikey", &self.api_key)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {}", bearer))
    }

    /// Send a request and decode a JSON response
    pub(crate) async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Send a request, discarding any response body
    pub(crate) async fn send_no_content(&self, request: RequestBuilder) -> ClientResult<()> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Self::status_error(status, text));
        }
        Ok(())
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    /// Make a POST request with JSON body, ignoring the response body
    pub async fn post_no_content<B: serde::Serialize>(&self, path: &str, body: &B) -> ClientResult<()> {
        self.send_no_content(self.request(Method::POST, path).json(body))
            .await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Self::status_error(status, text));
        }

        response.json().await.map_err(Into::into)
    }

    /// Map an error status to a typed client error
    fn status_error(status: StatusCode, text: String) -> ClientError {
        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(text),
            StatusCode::NOT_FOUND => ClientError::NotFound(text),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(text)
            }
            _ => ClientError::Backend(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shared_across_clones() {
        let config = ClientConfig::new("https://api.example.co", "anon");
        let a = HttpClient::new(&config);
        let b = a.clone();

        a.set_token("session-token");
        assert_eq!(b.token().as_deref(), Some("session-token"));

        b.clear_token();
        assert!(a.token().is_none());
    }

    #[test]
    fn test_status_error_mapping() {
        assert!(matches!(
            HttpClient::status_error(StatusCode::UNAUTHORIZED, String::new()),
            ClientError::Unauthorized
        ));
        assert!(matches!(
            HttpClient::status_error(StatusCode::BAD_REQUEST, String::new()),
            ClientError::Validation(_)
        ));
        assert!(matches!(
            HttpClient::status_error(StatusCode::INTERNAL_SERVER_ERROR, String::new()),
            ClientError::Backend(_)
        ));
    }
}
