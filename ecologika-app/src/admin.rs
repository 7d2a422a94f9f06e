//! Admin approval workflow
//!
//! Lists pending profiles and products and applies terminal
//! approve/reject transitions. The pending lists are never optimistically
//! mutated: a failed action leaves the entity pending and visible on the
//! next refresh.

use crate::backend::MarketBackend;
use crate::session::SessionStore;
use crate::{AppError, AppResult};
use chrono::Utc;
use shared::models::{ApprovalStatus, ApprovalUpdate, Product, Profile};
use shared::{ErrorCode, MarketError};
use std::sync::Arc;

/// Approval dashboard, admin-gated
pub struct AdminPanel {
    backend: Arc<dyn MarketBackend>,
    session: Arc<SessionStore>,
}

impl AdminPanel {
    pub fn new(backend: Arc<dyn MarketBackend>, session: Arc<SessionStore>) -> Self {
        Self { backend, session }
    }

    /// Profiles awaiting a decision
    pub async fn pending_profiles(&self) -> AppResult<Vec<Profile>> {
        self.require_admin()?;
        self.backend.pending_profiles().await
    }

    /// Products awaiting a decision
    pub async fn pending_products(&self) -> AppResult<Vec<Product>> {
        self.require_admin()?;
        self.backend.pending_products().await
    }

    /// Approve a pending profile
    pub async fn approve_profile(&self, profile_id: &str) -> AppResult<Profile> {
        let admin_id = self.require_admin()?;
        self.require_pending_profile(profile_id).await?;

        let update = ApprovalUpdate::approve(admin_id, Utc::now());
        let profile = self.backend.set_profile_approval(profile_id, update).await?;
        tracing::info!(profile_id, "profile approved");
        Ok(profile)
    }

    /// Reject a pending profile with a reason
    pub async fn reject_profile(&self, profile_id: &str, reason: &str) -> AppResult<Profile> {
        self.require_admin()?;
        self.require_pending_profile(profile_id).await?;

        let update = ApprovalUpdate::reject(reason);
        let profile = self.backend.set_profile_approval(profile_id, update).await?;
        tracing::info!(profile_id, reason, "profile rejected");
        Ok(profile)
    }

    /// Approve a pending product
    pub async fn approve_product(&self, product_id: &str) -> AppResult<Product> {
        let admin_id = self.require_admin()?;
        self.require_pending_product(product_id).await?;

        let update = ApprovalUpdate::approve(admin_id, Utc::now());
        let product = self.backend.set_product_approval(product_id, update).await?;
        tracing::info!(product_id, "product approved");
        Ok(product)
    }

    /// Reject a pending product with a reason
    pub async fn reject_product(&self, product_id: &str, reason: &str) -> AppResult<Product> {
        self.require_admin()?;
        self.require_pending_product(product_id).await?;

        let update = ApprovalUpdate::reject(reason);
        let product = self.backend.set_product_approval(product_id, update).await?;
        tracing::info!(product_id, reason, "product rejected");
        Ok(product)
    }

    // ==================== Gates ====================

    fn require_admin(&self) -> AppResult<String> {
        let snapshot = self.session.snapshot();
        if !snapshot.is_admin() {
            return Err(AppError::Forbidden("admin account required".into()));
        }
        snapshot
            .user_id()
            .map(str::to_string)
            .ok_or(AppError::NotAuthenticated)
    }

    /// Approve/reject are terminal; only pending entities transition.
    async fn require_pending_profile(&self, profile_id: &str) -> AppResult<()> {
        let profile = self
            .backend
            .profile(profile_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("profile {}", profile_id)))?;

        if profile.approval_status != ApprovalStatus::Pending {
            return Err(MarketError::new(ErrorCode::NotPending).into());
        }
        Ok(())
    }

    async fn require_pending_product(&self, product_id: &str) -> AppResult<()> {
        let product = self
            .backend
            .product_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("product {}", product_id)))?;

        if product.approval_status != ApprovalStatus::Pending {
            return Err(MarketError::new(ErrorCode::NotPending).into());
        }
        Ok(())
    }
}
