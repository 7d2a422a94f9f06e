//! Data models
//!
//! Shared between the client SDK and the app core. Row types mirror the
//! backing store's tables (`products`, `product_images`, `profiles`,
//! `purchases`, `interesse`); all IDs are `String` (store-assigned UUIDs).

pub mod approval;
pub mod interest;
pub mod product;
pub mod product_image;
pub mod profile;
pub mod purchase;

// Re-exports
pub use approval::*;
pub use interest::*;
pub use product::*;
pub use product_image::*;
pub use profile::*;
pub use purchase::*;
