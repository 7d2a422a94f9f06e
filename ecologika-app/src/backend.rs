//! Backend seam
//!
//! The application core talks to the external platform exclusively
//! through [`MarketBackend`]. The production implementation is
//! [`crate::HttpBackend`]; tests run the same workflows against an
//! in-memory implementation.

use crate::AppResult;
use async_trait::async_trait;
use shared::auth::Session;
use shared::models::{
    ApprovalUpdate, InterestCategory, Product, ProductCreate, ProductImage, ProductImageCreate,
    ProductUpdate, Profile, ProfileSeed, ProfileUpdate, Purchase, PurchaseCreate,
};

/// Product columns exposed to distinct-value scans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductColumn {
    Material,
    Country,
    Location,
}

impl ProductColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductColumn::Material => "material",
            ProductColumn::Country => "country",
            ProductColumn::Location => "location",
        }
    }
}

/// Backend capabilities consumed by the application core
///
/// All methods are request/response; no method blocks the caller beyond
/// its own await point. Implementations must not panic on backend
/// failures; they surface [`crate::AppError`] instead.
#[async_trait]
pub trait MarketBackend: Send + Sync {
    // ==================== Auth ====================

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session>;
    async fn sign_up(&self, email: &str, password: &str, seed: ProfileSeed) -> AppResult<Session>;
    async fn sign_out(&self) -> AppResult<()>;
    async fn update_password(&self, new_password: &str) -> AppResult<()>;
    async fn request_password_reset(&self, email: &str) -> AppResult<()>;

    // ==================== Profiles ====================

    async fn profile(&self, user_id: &str) -> AppResult<Option<Profile>>;
    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> AppResult<Profile>;
    /// Persist the full saved-products set and return the stored profile
    async fn set_saved_products(&self, user_id: &str, saved: Vec<String>) -> AppResult<Profile>;

    // ==================== Catalog ====================

    /// Active, approved listings, newest first
    async fn active_products(&self) -> AppResult<Vec<Product>>;
    async fn product_by_id(&self, id: &str) -> AppResult<Option<Product>>;
    /// In-list fetch, used for the saved-products view
    async fn products_by_ids(&self, ids: &[String]) -> AppResult<Vec<Product>>;
    /// Gallery rows for one product, ascending by image order
    async fn product_images(&self, product_id: &str) -> AppResult<Vec<ProductImage>>;
    /// Sorted distinct values over the active listings (full column scan)
    async fn distinct_product_values(&self, column: ProductColumn) -> AppResult<Vec<String>>;
    async fn interest_categories(&self) -> AppResult<Vec<InterestCategory>>;

    // ==================== Seller ====================

    async fn insert_product(&self, create: ProductCreate) -> AppResult<Product>;
    async fn update_product(&self, id: &str, update: ProductUpdate) -> AppResult<Product>;
    /// Upload image bytes and return the durable URL
    async fn upload_product_image(
        &self,
        product_id: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> AppResult<String>;
    async fn insert_product_image(&self, create: ProductImageCreate) -> AppResult<ProductImage>;
    async fn set_image_order(&self, image_id: &str, image_order: i32) -> AppResult<()>;
    async fn delete_product_image(&self, image_id: &str) -> AppResult<()>;
    /// Remove the stored object behind a durable image URL
    async fn delete_image_object(&self, image_url: &str) -> AppResult<()>;

    // ==================== Purchases ====================

    async fn insert_purchase(&self, create: PurchaseCreate) -> AppResult<Purchase>;
    async fn purchases_for_buyer(&self, buyer_id: &str) -> AppResult<Vec<Purchase>>;

    // ==================== Approval ====================

    async fn pending_profiles(&self) -> AppResult<Vec<Profile>>;
    async fn pending_products(&self) -> AppResult<Vec<Product>>;
    async fn set_profile_approval(
        &self,
        profile_id: &str,
        update: ApprovalUpdate,
    ) -> AppResult<Profile>;
    async fn set_product_approval(
        &self,
        product_id: &str,
        update: ApprovalUpdate,
    ) -> AppResult<Product>;
}
