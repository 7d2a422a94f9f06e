//! Catalog: listing load, image aggregation and filtering

mod filter;
mod images;
mod loader;

pub use filter::{FilterOptions, FilterState, PriceRange};
pub use images::{display_image, normalize_images, resolve_images, Gallery};
pub use loader::CatalogLoader;

use shared::models::{Product, ProductImage};

/// A product as presented in the catalog: the row enriched with its
/// resolved image set and derived display image.
#[derive(Debug, Clone)]
pub struct Listing {
    pub product: Product,
    /// Resolved gallery, ascending by image order, transient refs excluded
    pub images: Vec<ProductImage>,
    /// Cover image URL; `None` renders the placeholder state
    pub display_image: Option<String>,
}

impl Listing {
    pub fn new(product: Product, images: Vec<ProductImage>) -> Self {
        let display_image = images::display_image(&product, &images);
        Self {
            product,
            images,
            display_image,
        }
    }

    pub fn id(&self) -> &str {
        &self.product.id
    }
}
