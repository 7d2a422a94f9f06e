//! Object store endpoints
//!
//! Binary file storage for listing images. Uploads return the durable
//! public URL that replaces any transient client-local reference.

use crate::{ClientResult, HttpClient};
use reqwest::Method;
use serde::Deserialize;

/// Object store API handle
#[derive(Debug, Clone)]
pub struct StorageApi {
    http: HttpClient,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(rename = "Key", alias = "key")]
    #[allow(dead_code)]
    key: String,
}

impl StorageApi {
    pub(crate) fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Upload a file and return its durable public URL
    pub async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> ClientResult<String> {
        let request = self
            .http
            .request(Method::POST, &format!("storage/v1/object/{}/{}", bucket, path))
            .header(reqwest::header::CONTENT_TYPE, content_type.to_string())
            .body(bytes);

        let _: UploadResponse = self.http.send(request).await?;
        tracing::debug!(bucket, path, "uploaded object");
        Ok(self.public_url(bucket, path))
    }

    /// Delete a stored object
    pub async fn remove(&self, bucket: &str, path: &str) -> ClientResult<()> {
        let request = self
            .http
            .request(Method::DELETE, &format!("storage/v1/object/{}/{}", bucket, path));
        self.http.send_no_content(request).await
    }

    /// Resolve the public URL of a stored object
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.http.base_url(),
            bucket,
            path
        )
    }

    /// Generate a collision-free object path for a product image
    pub fn image_path(product_id: &str, extension: &str) -> String {
        format!("{}/{}.{}", product_id, uuid::Uuid::new_v4(), extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientConfig;

    #[test]
    fn test_public_url() {
        let http = HttpClient::new(&ClientConfig::new("https://api.example.co/", "anon"));
        let storage = StorageApi::new(http);
        assert_eq!(
            storage.public_url("product-images", "p1/a.jpg"),
            "https://api.example.co/storage/v1/object/public/product-images/p1/a.jpg"
        );
    }

    #[test]
    fn test_image_path_unique() {
        let a = StorageApi::image_path("p1", "jpg");
        let b = StorageApi::image_path("p1", "jpg");
        assert_ne!(a, b);
        assert!(a.starts_with("p1/"));
        assert!(a.ends_with(".jpg"));
    }
}
