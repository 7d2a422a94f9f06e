//! Product Image Model

use serde::{Deserialize, Serialize};

/// Gallery image belonging to exactly one product
///
/// `image_order` is 1-based and kept contiguous per product; reorder and
/// removal operations renumber the surviving siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: String,
    pub product_id: String,
    /// Durable object-store URL
    pub image_url: String,
    pub image_order: i32,
}

impl ProductImage {
    /// Whether the URL is a client-local reference that was never persisted
    pub fn is_transient(&self) -> bool {
        is_transient_url(&self.image_url)
    }
}

/// Create image payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImageCreate {
    pub product_id: String,
    pub image_url: String,
    pub image_order: i32,
}

/// Detect client-local object references (`blob:`/`data:` URLs)
///
/// Transient references must never be persisted or displayed once a
/// durable URL exists.
pub fn is_transient_url(url: &str) -> bool {
    url.is_empty() || url.starts_with("blob:") || url.starts_with("data:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_detection() {
        assert!(is_transient_url("blob:http://localhost/9f2c"));
        assert!(is_transient_url("data:image/png;base64,iVBOR"));
        assert!(is_transient_url(""));
        assert!(!is_transient_url("https://cdn.example.com/images/a.jpg"));
    }
}
