//! Image-set aggregation
//!
//! Resolves the ordered display images of a product, either from a
//! candidate set the caller already holds (catalog enrichment attaches
//! one) or through a single fetch. Transient client-local references are
//! excluded everywhere; a fetch failure degrades to an empty set.

use crate::backend::MarketBackend;
use shared::models::{is_transient_url, Product, ProductImage};

/// Resolve the ordered image sequence for a product
///
/// When `prefetched` is present it is used as-is (no redundant fetch);
/// otherwise exactly one fetch is performed. Failures never reach the
/// caller: the product degrades to its placeholder state.
pub async fn resolve_images(
    product_id: &str,
    prefetched: Option<Vec<ProductImage>>,
    backend: &dyn MarketBackend,
) -> Vec<ProductImage> {
    let images = match prefetched {
        Some(images) => images,
        None => match backend.product_images(product_id).await {
            Ok(images) => images,
            Err(error) => {
                tracing::warn!(product_id, %error, "image fetch failed, degrading to placeholder");
                Vec::new()
            }
        },
    };

    normalize_images(images)
}

/// Drop transient references and order the sequence for display
pub fn normalize_images(mut images: Vec<ProductImage>) -> Vec<ProductImage> {
    images.retain(|image| !image.is_transient());
    // Stable sort: equal orders keep insertion order
    images.sort_by_key(|image| image.image_order);
    images
}

/// Derive the cover image for a listing
///
/// First resolved image, else the legacy single-image field when it is
/// durable, else `None` (placeholder).
pub fn display_image(product: &Product, images: &[ProductImage]) -> Option<String> {
    if let Some(first) = images.first() {
        return Some(first.image_url.clone());
    }

    product
        .image_url
        .as_deref()
        .filter(|url| !is_transient_url(url))
        .map(str::to_string)
}

/// Cyclic gallery navigation over a resolved image sequence
#[derive(Debug, Clone)]
pub struct Gallery {
    images: Vec<ProductImage>,
    index: usize,
}

impl Gallery {
    pub fn new(images: Vec<ProductImage>) -> Self {
        Self { images, index: 0 }
    }

    pub fn current(&self) -> Option<&ProductImage> {
        self.images.get(self.index)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Navigation controls only render for multi-image galleries
    pub fn has_navigation(&self) -> bool {
        self.images.len() > 1
    }

    /// Advance cyclically
    pub fn next(&mut self) {
        if !self.images.is_empty() {
            self.index = (self.index + 1) % self.images.len();
        }
    }

    /// Step back cyclically
    pub fn prev(&mut self) {
        if !self.images.is_empty() {
            self.index = (self.index + self.images.len() - 1) % self.images.len();
        }
    }

    /// Counter shown next to the navigation arrows
    pub fn position_label(&self) -> String {
        if self.images.is_empty() {
            "0 / 0".to_string()
        } else {
            format!("{} / {}", self.index + 1, self.images.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use shared::models::{ApprovalStatus, Unit};

    fn image(id: &str, order: i32, url: &str) -> ProductImage {
        ProductImage {
            id: id.into(),
            product_id: "p1".into(),
            image_url: url.into(),
            image_order: order,
        }
    }

    fn product(legacy: Option<&str>) -> Product {
        Product {
            id: "p1".into(),
            name: "Cardboard bales".into(),
            description: String::new(),
            material: "Paper".into(),
            category: None,
            price: Decimal::new(500, 2),
            quantity: 3,
            unit: Unit::Kg,
            country: "Portugal".into(),
            city: None,
            address: None,
            location: "Braga, Portugal".into(),
            seller_id: "s1".into(),
            seller_name: None,
            seller_company: None,
            image_url: legacy.map(str::to_string),
            is_active: true,
            approval_status: ApprovalStatus::Approved,
            rejection_reason: None,
            approved_by: None,
            approved_at: None,
            co2_savings: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_sorted_by_order_ties_keep_insertion() {
        let resolved = normalize_images(vec![
            image("b", 2, "https://cdn/b.jpg"),
            image("a", 1, "https://cdn/a.jpg"),
            image("c", 2, "https://cdn/c.jpg"),
        ]);
        let ids: Vec<&str> = resolved.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_transient_references_excluded() {
        let resolved = normalize_images(vec![
            image("a", 1, "blob:http://localhost/x"),
            image("b", 2, "https://cdn/b.jpg"),
        ]);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, "b");
    }

    #[test]
    fn test_display_image_prefers_resolved_set() {
        let images = vec![image("a", 1, "https://cdn/a.jpg")];
        assert_eq!(
            display_image(&product(Some("https://cdn/legacy.jpg")), &images),
            Some("https://cdn/a.jpg".into())
        );
    }

    #[test]
    fn test_display_image_falls_back_to_legacy() {
        assert_eq!(
            display_image(&product(Some("https://cdn/legacy.jpg")), &[]),
            Some("https://cdn/legacy.jpg".into())
        );
    }

    #[test]
    fn test_transient_legacy_yields_placeholder() {
        assert_eq!(display_image(&product(Some("blob:http://x/y")), &[]), None);
        assert_eq!(display_image(&product(None), &[]), None);
    }

    #[test]
    fn test_gallery_cycles_both_directions() {
        let mut gallery = Gallery::new(vec![
            image("a", 1, "https://cdn/a.jpg"),
            image("b", 2, "https://cdn/b.jpg"),
            image("c", 3, "https://cdn/c.jpg"),
        ]);
        assert_eq!(gallery.position_label(), "1 / 3");

        gallery.prev();
        assert_eq!(gallery.current().unwrap().id, "c");

        gallery.next();
        gallery.next();
        assert_eq!(gallery.current().unwrap().id, "b");
        assert_eq!(gallery.position_label(), "2 / 3");
    }

    #[test]
    fn test_empty_gallery_is_inert() {
        let mut gallery = Gallery::new(Vec::new());
        gallery.next();
        gallery.prev();
        assert!(gallery.current().is_none());
        assert!(!gallery.has_navigation());
        assert_eq!(gallery.position_label(), "0 / 0");
    }

    #[test]
    fn test_single_image_has_no_navigation() {
        let gallery = Gallery::new(vec![image("a", 1, "https://cdn/a.jpg")]);
        assert!(!gallery.has_navigation());
    }
}
