//! Session store
//!
//! The authenticated identity's session and profile are the one piece of
//! cross-view shared mutable state. This store is the sole writer:
//! consumers read snapshots or subscribe to the watch channel, and every
//! mutation goes through a named method here. State is only replaced
//! after the backend confirms a write, so there is no rollback path.

use crate::backend::MarketBackend;
use crate::{AppError, AppResult};
use parking_lot::{Mutex, RwLock};
use shared::auth::Session;
use shared::models::{Profile, ProfileSeed, ProfileUpdate, Purchase, UserRole};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::watch;

/// Read-only view of the session state
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub session: Option<Session>,
    pub profile: Option<Profile>,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.user_id())
    }

    pub fn is_seller(&self) -> bool {
        self.has_role(UserRole::Seller)
    }

    pub fn is_buyer(&self) -> bool {
        self.has_role(UserRole::Buyer)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(UserRole::Admin)
    }

    /// Approval is read from the authoritative status field
    pub fn is_approved(&self) -> bool {
        self.profile
            .as_ref()
            .map(|p| p.approval_status == shared::models::ApprovalStatus::Approved)
            .unwrap_or(false)
    }

    fn has_role(&self, role: UserRole) -> bool {
        self.profile
            .as_ref()
            .map(|p| p.user_type == role)
            .unwrap_or(false)
    }
}

/// Identity/session provider
pub struct SessionStore {
    backend: Arc<dyn MarketBackend>,
    state: RwLock<SessionSnapshot>,
    watch_tx: watch::Sender<SessionSnapshot>,
    /// Favorite toggles currently awaiting backend confirmation;
    /// a duplicate submission for the same product is a no-op.
    pending_saves: Mutex<HashSet<String>>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn MarketBackend>) -> Self {
        let (watch_tx, _) = watch::channel(SessionSnapshot::default());
        Self {
            backend,
            state: RwLock::new(SessionSnapshot::default()),
            watch_tx,
            pending_saves: Mutex::new(HashSet::new()),
        }
    }

    // ==================== Reads ====================

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated()
    }

    pub fn profile(&self) -> Option<Profile> {
        self.state.read().profile.clone()
    }

    /// Membership test against the current profile's saved set
    pub fn is_saved(&self, product_id: &str) -> bool {
        self.state
            .read()
            .profile
            .as_ref()
            .map(|p| p.has_saved(product_id))
            .unwrap_or(false)
    }

    /// Observe session changes
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.watch_tx.subscribe()
    }

    // ==================== Auth transitions ====================

    /// Sign in and load the identity's profile
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<SessionSnapshot> {
        let session = self.backend.sign_in(email, password).await?;
        let profile = self.backend.profile(session.user_id()).await?;

        let snapshot = SessionSnapshot {
            session: Some(session),
            profile,
        };
        *self.state.write() = snapshot.clone();
        self.publish();
        Ok(snapshot)
    }

    /// Sign up; the profile row may not exist until the backend
    /// materializes the seed, so a missing profile is not an error here.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        seed: ProfileSeed,
    ) -> AppResult<SessionSnapshot> {
        let session = self.backend.sign_up(email, password, seed).await?;
        let profile = self.backend.profile(session.user_id()).await?;

        let snapshot = SessionSnapshot {
            session: Some(session),
            profile,
        };
        *self.state.write() = snapshot.clone();
        self.publish();
        Ok(snapshot)
    }

    /// Sign out and clear local state
    ///
    /// Local state is cleared even when the remote call fails; a dead
    /// session must not keep gating views open.
    pub async fn sign_out(&self) -> AppResult<()> {
        let result = self.backend.sign_out().await;
        *self.state.write() = SessionSnapshot::default();
        self.publish();
        result
    }

    pub async fn update_password(&self, new_password: &str) -> AppResult<()> {
        self.require_user_id()?;
        self.backend.update_password(new_password).await
    }

    pub async fn request_password_reset(&self, email: &str) -> AppResult<()> {
        self.backend.request_password_reset(email).await
    }

    // ==================== Profile mutations ====================

    /// Re-fetch the profile and replace the local representation
    pub async fn refresh_profile(&self) -> AppResult<()> {
        let user_id = self.require_user_id()?;
        let profile = self.backend.profile(&user_id).await?;

        self.state.write().profile = profile;
        self.publish();
        Ok(())
    }

    pub async fn update_profile(&self, update: ProfileUpdate) -> AppResult<Profile> {
        let user_id = self.require_user_id()?;
        let profile = self.backend.update_profile(&user_id, update).await?;

        self.state.write().profile = Some(profile.clone());
        self.publish();
        Ok(profile)
    }

    /// Purchases made by the signed-in identity
    pub async fn my_purchases(&self) -> AppResult<Vec<Purchase>> {
        let user_id = self.require_user_id()?;
        self.backend.purchases_for_buyer(&user_id).await
    }

    // ==================== Favorites ====================

    /// Unsaved→Saved transition; idempotent
    pub async fn save_product(&self, product_id: &str) -> AppResult<()> {
        self.toggle_saved(product_id, true).await
    }

    /// Saved→Unsaved transition; idempotent
    pub async fn unsave_product(&self, product_id: &str) -> AppResult<()> {
        self.toggle_saved(product_id, false).await
    }

    async fn toggle_saved(&self, product_id: &str, saved: bool) -> AppResult<()> {
        let user_id = self.require_user_id()?;
        let current = self
            .profile()
            .ok_or_else(|| AppError::NotFound("profile".into()))?
            .saved_products;

        let already = current.iter().any(|id| id == product_id);
        if already == saved {
            return Ok(());
        }

        // Fire-and-wait: a second toggle for the same product while one
        // is in flight is a no-op.
        if !self.pending_saves.lock().insert(product_id.to_string()) {
            return Ok(());
        }

        let next: Vec<String> = if saved {
            let mut next = current;
            next.push(product_id.to_string());
            next
        } else {
            current.into_iter().filter(|id| id != product_id).collect()
        };

        let result = self.backend.set_saved_products(&user_id, next).await;
        self.pending_saves.lock().remove(product_id);

        match result {
            Ok(profile) => {
                tracing::debug!(product_id, saved, "saved products updated");
                self.state.write().profile = Some(profile);
                self.publish();
                Ok(())
            }
            Err(error) => {
                tracing::warn!(product_id, %error, "saved products update failed");
                Err(error)
            }
        }
    }

    // ==================== Internal ====================

    fn require_user_id(&self) -> AppResult<String> {
        self.state
            .read()
            .user_id()
            .map(str::to_string)
            .ok_or(AppError::NotAuthenticated)
    }

    fn publish(&self) {
        self.watch_tx.send_replace(self.snapshot());
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("SessionStore")
            .field("authenticated", &state.is_authenticated())
            .field("profile", &state.profile.as_ref().map(|p| p.id.as_str()))
            .finish()
    }
}
