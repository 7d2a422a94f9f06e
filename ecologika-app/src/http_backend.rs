//! HTTP implementation of the backend seam
//!
//! Maps [`crate::MarketBackend`] operations onto the platform client
//! SDK: table queries against the relational store, auth provider calls
//! and object-store uploads.

use crate::backend::{MarketBackend, ProductColumn};
use crate::AppResult;
use async_trait::async_trait;
use ecologika_client::{EcologikaClient, StorageApi, TableQuery};
use shared::auth::Session;
use shared::models::{
    ApprovalStatus, ApprovalUpdate, InterestCategory, Product, ProductCreate, ProductImage,
    ProductImageCreate, ProductUpdate, Profile, ProfileSeed, ProfileUpdate, Purchase,
    PurchaseCreate,
};
use std::collections::{BTreeSet, HashMap};

const PRODUCTS: &str = "products";
const PRODUCT_IMAGES: &str = "product_images";
const PROFILES: &str = "profiles";
const PURCHASES: &str = "purchases";
const INTERESTS: &str = "interesse";
const IMAGE_BUCKET: &str = "product-images";

/// Production backend over the platform client SDK
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: EcologikaClient,
}

impl HttpBackend {
    pub fn new(client: EcologikaClient) -> Self {
        Self { client }
    }

    fn image_extension(content_type: &str) -> &'static str {
        match content_type {
            "image/png" => "png",
            "image/webp" => "webp",
            _ => "jpg",
        }
    }
}

#[async_trait]
impl MarketBackend for HttpBackend {
    // ==================== Auth ====================

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session> {
        Ok(self.client.auth().sign_in(email, password).await?)
    }

    async fn sign_up(&self, email: &str, password: &str, seed: ProfileSeed) -> AppResult<Session> {
        Ok(self.client.auth().sign_up(email, password, seed).await?)
    }

    async fn sign_out(&self) -> AppResult<()> {
        Ok(self.client.auth().sign_out().await?)
    }

    async fn update_password(&self, new_password: &str) -> AppResult<()> {
        Ok(self.client.auth().update_password(new_password).await?)
    }

    async fn request_password_reset(&self, email: &str) -> AppResult<()> {
        Ok(self.client.auth().request_password_reset(email).await?)
    }

    // ==================== Profiles ====================

    async fn profile(&self, user_id: &str) -> AppResult<Option<Profile>> {
        Ok(self
            .client
            .store()
            .select_one(TableQuery::new(PROFILES).eq("id", user_id))
            .await?)
    }

    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> AppResult<Profile> {
        Ok(self
            .client
            .store()
            .update_by_id(PROFILES, user_id, &update)
            .await?)
    }

    async fn set_saved_products(&self, user_id: &str, saved: Vec<String>) -> AppResult<Profile> {
        let changes = serde_json::json!({ "saved_products": saved });
        Ok(self
            .client
            .store()
            .update_by_id(PROFILES, user_id, &changes)
            .await?)
    }

    // ==================== Catalog ====================

    async fn active_products(&self) -> AppResult<Vec<Product>> {
        let query = TableQuery::new(PRODUCTS)
            .eq("is_active", true)
            .eq("approval_status", ApprovalStatus::Approved.as_str())
            .order_desc("created_at");
        Ok(self.client.store().select(query).await?)
    }

    async fn product_by_id(&self, id: &str) -> AppResult<Option<Product>> {
        Ok(self
            .client
            .store()
            .select_one(TableQuery::new(PRODUCTS).eq("id", id))
            .await?)
    }

    async fn products_by_ids(&self, ids: &[String]) -> AppResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = TableQuery::new(PRODUCTS)
            .in_list("id", ids)
            .order_desc("created_at");
        Ok(self.client.store().select(query).await?)
    }

    async fn product_images(&self, product_id: &str) -> AppResult<Vec<ProductImage>> {
        let query = TableQuery::new(PRODUCT_IMAGES)
            .eq("product_id", product_id)
            .order_asc("image_order");
        Ok(self.client.store().select(query).await?)
    }

    async fn distinct_product_values(&self, column: ProductColumn) -> AppResult<Vec<String>> {
        // The store has no distinct operator on this path; scan the full
        // column over active listings and reduce client-side.
        let query = TableQuery::new(PRODUCTS)
            .select(column.as_str())
            .eq("is_active", true)
            .eq("approval_status", ApprovalStatus::Approved.as_str());
        let rows: Vec<HashMap<String, Option<String>>> = self.client.store().select(query).await?;

        let distinct: BTreeSet<String> = rows
            .into_iter()
            .filter_map(|mut row| row.remove(column.as_str()).flatten())
            .filter(|value| !value.is_empty())
            .collect();
        Ok(distinct.into_iter().collect())
    }

    async fn interest_categories(&self) -> AppResult<Vec<InterestCategory>> {
        Ok(self
            .client
            .store()
            .select(TableQuery::new(INTERESTS).order_asc("name"))
            .await?)
    }

    // ==================== Seller ====================

    async fn insert_product(&self, create: ProductCreate) -> AppResult<Product> {
        Ok(self.client.store().insert(PRODUCTS, &create).await?)
    }

    async fn update_product(&self, id: &str, update: ProductUpdate) -> AppResult<Product> {
        Ok(self.client.store().update_by_id(PRODUCTS, id, &update).await?)
    }

    async fn upload_product_image(
        &self,
        product_id: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> AppResult<String> {
        let path = StorageApi::image_path(product_id, Self::image_extension(content_type));
        Ok(self
            .client
            .storage()
            .upload(IMAGE_BUCKET, &path, bytes, content_type)
            .await?)
    }

    async fn insert_product_image(&self, create: ProductImageCreate) -> AppResult<ProductImage> {
        Ok(self.client.store().insert(PRODUCT_IMAGES, &create).await?)
    }

    async fn set_image_order(&self, image_id: &str, image_order: i32) -> AppResult<()> {
        let changes = serde_json::json!({ "image_order": image_order });
        let _: ProductImage = self
            .client
            .store()
            .update_by_id(PRODUCT_IMAGES, image_id, &changes)
            .await?;
        Ok(())
    }

    async fn delete_product_image(&self, image_id: &str) -> AppResult<()> {
        Ok(self
            .client
            .store()
            .delete_by_id(PRODUCT_IMAGES, image_id)
            .await?)
    }

    async fn delete_image_object(&self, image_url: &str) -> AppResult<()> {
        let storage = self.client.storage();
        let prefix = storage.public_url(IMAGE_BUCKET, "");
        match image_url.strip_prefix(&prefix) {
            Some(path) if !path.is_empty() => Ok(storage.remove(IMAGE_BUCKET, path).await?),
            // Legacy or external URL: nothing of ours to delete
            _ => Ok(()),
        }
    }

    // ==================== Purchases ====================

    async fn insert_purchase(&self, create: PurchaseCreate) -> AppResult<Purchase> {
        Ok(self.client.store().insert(PURCHASES, &create).await?)
    }

    async fn purchases_for_buyer(&self, buyer_id: &str) -> AppResult<Vec<Purchase>> {
        let query = TableQuery::new(PURCHASES)
            .eq("buyer_id", buyer_id)
            .order_desc("purchase_date");
        Ok(self.client.store().select(query).await?)
    }

    // ==================== Approval ====================

    async fn pending_profiles(&self) -> AppResult<Vec<Profile>> {
        let query = TableQuery::new(PROFILES)
            .eq("approval_status", ApprovalStatus::Pending.as_str())
            .order_asc("created_at");
        Ok(self.client.store().select(query).await?)
    }

    async fn pending_products(&self) -> AppResult<Vec<Product>> {
        let query = TableQuery::new(PRODUCTS)
            .eq("approval_status", ApprovalStatus::Pending.as_str())
            .order_asc("created_at");
        Ok(self.client.store().select(query).await?)
    }

    async fn set_profile_approval(
        &self,
        profile_id: &str,
        update: ApprovalUpdate,
    ) -> AppResult<Profile> {
        // `approval_status` is authoritative; the boolean projection is
        // rewritten on every transition.
        let changes = serde_json::json!({
            "approval_status": update.approval_status,
            "is_approved": update.derived_is_approved(),
            "rejection_reason": update.rejection_reason,
            "approved_by": update.approved_by,
            "approved_at": update.approved_at,
        });
        Ok(self
            .client
            .store()
            .update_by_id(PROFILES, profile_id, &changes)
            .await?)
    }

    async fn set_product_approval(
        &self,
        product_id: &str,
        update: ApprovalUpdate,
    ) -> AppResult<Product> {
        Ok(self
            .client
            .store()
            .update_by_id(PRODUCTS, product_id, &update)
            .await?)
    }
}
