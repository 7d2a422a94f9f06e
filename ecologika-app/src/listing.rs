//! Seller listing editor
//!
//! Creation and maintenance of a seller's own listings: product fields,
//! activation (the deletion substitute), and the image gallery. Gallery
//! mutations keep `image_order` contiguous 1..N; the renumbering plans
//! are pure functions applied through the backend.

use crate::backend::MarketBackend;
use crate::session::SessionStore;
use crate::{AppError, AppResult};
use rust_decimal::Decimal;
use shared::models::{
    ApprovalStatus, InterestCategory, Product, ProductCreate, ProductImage, ProductImageCreate,
    ProductUpdate, Profile, Unit,
};
use shared::{MarketError, MarketResult};
use std::sync::Arc;
use validator::Validate;

/// New-listing form
#[derive(Debug, Clone, Validate)]
pub struct ListingDraft {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub description: String,
    #[validate(length(min = 1, message = "material is required"))]
    pub material: String,
    pub category: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub unit: Unit,
    #[validate(length(min = 1, message = "country is required"))]
    pub country: String,
    pub city: Option<String>,
    pub address: Option<String>,
    pub co2_savings: Option<Decimal>,
}

impl ListingDraft {
    /// Composite display location ("city, country")
    fn composed_location(&self) -> String {
        match self.city.as_deref().filter(|c| !c.is_empty()) {
            Some(city) => format!("{}, {}", city, self.country),
            None => self.country.clone(),
        }
    }

    fn check(&self) -> MarketResult<()> {
        if self.validate().is_err() {
            return Err(MarketError::validation("listing form incomplete"));
        }
        if self.price < Decimal::ZERO {
            return Err(MarketError::validation("price must be >= 0").with_detail("field", "price"));
        }
        if self.quantity < 0 {
            return Err(
                MarketError::validation("quantity must be >= 0").with_detail("field", "quantity")
            );
        }
        Ok(())
    }
}

/// Editor gated to the owning seller
pub struct ListingEditor {
    backend: Arc<dyn MarketBackend>,
    session: Arc<SessionStore>,
}

impl ListingEditor {
    pub fn new(backend: Arc<dyn MarketBackend>, session: Arc<SessionStore>) -> Self {
        Self { backend, session }
    }

    /// Categories offered in the listing form
    pub async fn category_options(&self) -> AppResult<Vec<InterestCategory>> {
        self.backend.interest_categories().await
    }

    /// Create a listing; it enters the catalog once an admin approves it
    pub async fn create_listing(&self, draft: ListingDraft) -> AppResult<Product> {
        let seller = self.require_seller()?;
        draft.check()?;

        let create = ProductCreate {
            name: draft.name.clone(),
            description: draft.description.clone(),
            material: draft.material.clone(),
            category: draft.category.clone(),
            price: draft.price,
            quantity: draft.quantity,
            unit: draft.unit,
            country: draft.country.clone(),
            city: draft.city.clone(),
            address: draft.address.clone(),
            location: draft.composed_location(),
            seller_id: seller.id.clone(),
            seller_name: Some(seller.name.clone()),
            seller_company: seller.company.clone(),
            image_url: None,
            co2_savings: draft.co2_savings,
            is_active: true,
            approval_status: ApprovalStatus::Pending,
        };

        let product = self.backend.insert_product(create).await?;
        tracing::debug!(product_id = %product.id, "listing created, pending approval");
        Ok(product)
    }

    /// Update descriptive/commercial fields of an owned listing
    pub async fn update_listing(
        &self,
        product_id: &str,
        update: ProductUpdate,
    ) -> AppResult<Product> {
        self.require_owned(product_id).await?;
        self.backend.update_product(product_id, update).await
    }

    /// Toggle visibility; listings are deactivated, never hard-deleted
    pub async fn set_active(&self, product_id: &str, active: bool) -> AppResult<Product> {
        self.require_owned(product_id).await?;
        let update = ProductUpdate {
            is_active: Some(active),
            ..ProductUpdate::default()
        };
        self.backend.update_product(product_id, update).await
    }

    /// Upload an image and append it to the gallery
    pub async fn add_image(
        &self,
        product_id: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> AppResult<ProductImage> {
        self.require_owned(product_id).await?;

        let url = self
            .backend
            .upload_product_image(product_id, bytes, content_type)
            .await?;
        let existing = self.backend.product_images(product_id).await?;

        let create = ProductImageCreate {
            product_id: product_id.to_string(),
            image_url: url,
            image_order: existing.len() as i32 + 1,
        };
        self.backend.insert_product_image(create).await
    }

    /// Rewrite the gallery order to the user-intended sequence
    pub async fn reorder_images(
        &self,
        product_id: &str,
        ordered_ids: &[String],
    ) -> AppResult<Vec<ProductImage>> {
        self.require_owned(product_id).await?;

        let images = self.backend.product_images(product_id).await?;
        let plan = plan_reorder(&images, ordered_ids)?;

        for (image_id, image_order) in &plan {
            self.backend.set_image_order(image_id, *image_order).await?;
        }
        self.backend.product_images(product_id).await
    }

    /// Remove one image and renumber the survivors contiguously
    pub async fn remove_image(
        &self,
        product_id: &str,
        image_id: &str,
    ) -> AppResult<Vec<ProductImage>> {
        self.require_owned(product_id).await?;

        let images = self.backend.product_images(product_id).await?;
        let plan = plan_removal(&images, image_id)?;
        let removed_url = images
            .iter()
            .find(|image| image.id == image_id)
            .map(|image| image.image_url.clone());

        self.backend.delete_product_image(image_id).await?;
        for (survivor_id, image_order) in &plan {
            self.backend.set_image_order(survivor_id, *image_order).await?;
        }

        // Object cleanup is best effort; the row is already gone
        if let Some(url) = removed_url {
            if let Err(error) = self.backend.delete_image_object(&url).await {
                tracing::warn!(image_id, %error, "stored object cleanup failed");
            }
        }

        self.backend.product_images(product_id).await
    }

    // ==================== Gates ====================

    fn require_seller(&self) -> AppResult<Profile> {
        let profile = self
            .session
            .profile()
            .ok_or(AppError::NotAuthenticated)?;
        if profile.user_type != shared::models::UserRole::Seller {
            return Err(AppError::Forbidden("seller account required".into()));
        }
        Ok(profile)
    }

    async fn require_owned(&self, product_id: &str) -> AppResult<Product> {
        let seller = self.require_seller()?;
        let product = self
            .backend
            .product_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("product {}", product_id)))?;

        if product.seller_id != seller.id {
            return Err(AppError::Forbidden("listing belongs to another seller".into()));
        }
        Ok(product)
    }
}

/// Plan a full reorder: `ordered_ids` must be a permutation of the
/// current gallery; the result assigns orders 1..N in that sequence.
pub fn plan_reorder(
    images: &[ProductImage],
    ordered_ids: &[String],
) -> MarketResult<Vec<(String, i32)>> {
    if ordered_ids.len() != images.len() {
        return Err(MarketError::invalid("reorder must cover every image"));
    }
    for id in ordered_ids {
        if !images.iter().any(|image| &image.id == id) {
            return Err(MarketError::invalid(format!("unknown image {}", id)));
        }
    }
    if ordered_ids.len()
        != ordered_ids
            .iter()
            .collect::<std::collections::HashSet<_>>()
            .len()
    {
        return Err(MarketError::invalid("duplicate image in reorder"));
    }

    Ok(ordered_ids
        .iter()
        .enumerate()
        .map(|(index, id)| (id.clone(), index as i32 + 1))
        .collect())
}

/// Plan the renumbering after removing one image: survivors keep their
/// relative order and are assigned 1..N contiguously.
pub fn plan_removal(images: &[ProductImage], removed_id: &str) -> MarketResult<Vec<(String, i32)>> {
    if !images.iter().any(|image| image.id == removed_id) {
        return Err(MarketError::not_found(format!("image {}", removed_id)));
    }

    let mut survivors: Vec<&ProductImage> =
        images.iter().filter(|image| image.id != removed_id).collect();
    survivors.sort_by_key(|image| image.image_order);

    Ok(survivors
        .iter()
        .enumerate()
        .map(|(index, image)| (image.id.clone(), index as i32 + 1))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(id: &str, order: i32) -> ProductImage {
        ProductImage {
            id: id.into(),
            product_id: "p1".into(),
            image_url: format!("https://cdn/{}.jpg", id),
            image_order: order,
        }
    }

    #[test]
    fn test_reorder_assigns_contiguous_orders() {
        let images = vec![image("a", 1), image("b", 2), image("c", 3)];
        let plan = plan_reorder(&images, &["c".into(), "a".into(), "b".into()]).unwrap();
        assert_eq!(
            plan,
            vec![("c".into(), 1), ("a".into(), 2), ("b".into(), 3)]
        );
    }

    #[test]
    fn test_reorder_rejects_partial_or_unknown_sets() {
        let images = vec![image("a", 1), image("b", 2)];
        assert!(plan_reorder(&images, &["a".into()]).is_err());
        assert!(plan_reorder(&images, &["a".into(), "x".into()]).is_err());
        assert!(plan_reorder(&images, &["a".into(), "a".into()]).is_err());
    }

    #[test]
    fn test_removal_renumbers_survivors() {
        let images = vec![image("a", 1), image("b", 2), image("c", 3)];
        let plan = plan_removal(&images, "b").unwrap();
        assert_eq!(plan, vec![("a".into(), 1), ("c".into(), 2)]);
    }

    #[test]
    fn test_removal_orders_stay_one_to_n() {
        let images = vec![image("a", 2), image("b", 5), image("c", 9)];
        let plan = plan_removal(&images, "a").unwrap();
        let orders: Vec<i32> = plan.iter().map(|(_, order)| *order).collect();
        assert_eq!(orders, vec![1, 2]);
    }

    #[test]
    fn test_removal_of_unknown_image_fails() {
        let images = vec![image("a", 1)];
        assert!(plan_removal(&images, "zz").is_err());
    }

    #[test]
    fn test_draft_location_composition() {
        let draft = ListingDraft {
            name: "Bales".into(),
            description: String::new(),
            material: "Paper".into(),
            category: None,
            price: Decimal::new(500, 2),
            quantity: 2,
            unit: Unit::Kg,
            country: "Portugal".into(),
            city: Some("Braga".into()),
            address: None,
            co2_savings: None,
        };
        assert_eq!(draft.composed_location(), "Braga, Portugal");
        assert!(draft.check().is_ok());

        let mut without_city = draft;
        without_city.city = None;
        assert_eq!(without_city.composed_location(), "Portugal");
    }

    #[test]
    fn test_draft_rejects_negative_commercials() {
        let mut draft = ListingDraft {
            name: "Bales".into(),
            description: String::new(),
            material: "Paper".into(),
            category: None,
            price: Decimal::new(-1, 2),
            quantity: 2,
            unit: Unit::Kg,
            country: "Portugal".into(),
            city: None,
            address: None,
            co2_savings: None,
        };
        assert!(draft.check().is_err());

        draft.price = Decimal::ZERO;
        draft.quantity = -3;
        assert!(draft.check().is_err());
    }
}
