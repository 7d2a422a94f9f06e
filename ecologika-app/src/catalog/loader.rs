//! Catalog loader
//!
//! Fetches the active listings (newest first), enriches each with its
//! resolved image set, and holds the working collection consumed by the
//! filter engine. Only authenticated callers may load; enrichment
//! failures degrade per listing and never drop siblings.

use super::images::resolve_images;
use super::{FilterState, Listing};
use crate::backend::MarketBackend;
use crate::lifetime::ViewScope;
use crate::notify::NoticeSender;
use crate::session::SessionStore;
use crate::{AppError, AppResult};
use futures::future::join_all;
use parking_lot::RwLock;
use shared::tr;
use std::sync::Arc;

/// Loader holding the enriched working collection
#[derive(Clone)]
pub struct CatalogLoader {
    backend: Arc<dyn MarketBackend>,
    session: Arc<SessionStore>,
    notices: NoticeSender,
    listings: Arc<RwLock<Vec<Listing>>>,
}

impl CatalogLoader {
    pub fn new(
        backend: Arc<dyn MarketBackend>,
        session: Arc<SessionStore>,
        notices: NoticeSender,
    ) -> Self {
        Self {
            backend,
            session,
            notices,
            listings: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Current working collection
    pub fn listings(&self) -> Vec<Listing> {
        self.listings.read().clone()
    }

    /// Filtered view over the working collection
    pub fn filtered(&self, filter: &FilterState) -> Vec<Listing> {
        filter.apply(&self.listings.read())
    }

    /// The signed-in identity's saved listings, enriched like the
    /// catalog. Saved ids whose products are no longer listed are
    /// silently skipped rather than surfaced as errors.
    pub async fn saved_listings(&self) -> AppResult<Vec<Listing>> {
        let profile = self
            .session
            .profile()
            .ok_or(AppError::NotAuthenticated)?;

        let products = self
            .backend
            .products_by_ids(&profile.saved_products)
            .await?;

        let enriched = join_all(
            products
                .into_iter()
                .filter(|product| product.is_listed())
                .map(|product| {
                    let backend = Arc::clone(&self.backend);
                    async move {
                        let images = resolve_images(&product.id, None, backend.as_ref()).await;
                        Listing::new(product, images)
                    }
                }),
        )
        .await;
        Ok(enriched)
    }

    /// Reload the working collection
    ///
    /// Gated on authentication: a non-authenticated viewer gets the
    /// access-restricted state and no fetch is attempted. A base fetch
    /// failure surfaces a notice and leaves the collection empty until
    /// the next explicit reload. Results are discarded when the owning
    /// view went away while the fetch was in flight.
    pub async fn reload(&self, scope: &ViewScope) -> AppResult<()> {
        if !self.session.is_authenticated() {
            return Err(AppError::NotAuthenticated);
        }

        let ticket = scope.begin();

        let products = match self.backend.active_products().await {
            Ok(products) => products,
            Err(error) => {
                tracing::error!(%error, "catalog fetch failed");
                if ticket.is_live() {
                    self.notices.error(tr("catalog_load_failed"));
                    self.listings.write().clear();
                }
                return Ok(());
            }
        };

        // Enrich every listing independently; completion order is
        // irrelevant and one failure only degrades its own listing.
        let enriched = join_all(products.into_iter().map(|product| {
            let backend = Arc::clone(&self.backend);
            async move {
                let images = resolve_images(&product.id, None, backend.as_ref()).await;
                Listing::new(product, images)
            }
        }))
        .await;

        if !ticket.is_live() {
            tracing::debug!("catalog reload result discarded, view torn down");
            return Ok(());
        }

        tracing::debug!(count = enriched.len(), "working collection replaced");
        *self.listings.write() = enriched;
        Ok(())
    }
}

impl std::fmt::Debug for CatalogLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogLoader")
            .field("listings_count", &self.listings.read().len())
            .finish()
    }
}
