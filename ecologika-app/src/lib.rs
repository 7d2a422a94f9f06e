//! Ecologika application core
//!
//! Presentation-independent logic of the marketplace client:
//!
//! - **Session** (`session`): authenticated identity, profile, favorites
//! - **Catalog** (`catalog`): listing load, image aggregation, filtering
//! - **Checkout** (`checkout`): quantity/shipping validation and purchase
//! - **Listing editor** (`listing`): seller-side product and image management
//! - **Admin** (`admin`): pending-entity approval workflow
//! - **Backend seam** (`backend`): async trait over the external platform
//!
//! The view layer observes these components; it never talks to the
//! backend platform directly.

pub mod admin;
pub mod backend;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod http_backend;
pub mod lifetime;
pub mod listing;
pub mod logger;
pub mod notify;
pub mod prefs;
pub mod session;

// Re-export public types
pub use backend::{MarketBackend, ProductColumn};
pub use catalog::{CatalogLoader, FilterOptions, FilterState, Gallery, Listing, PriceRange};
pub use checkout::{Checkout, Draft, ShippingForm, Validated, SHIPPING_FEE};
pub use error::{AppError, AppResult};
pub use http_backend::HttpBackend;
pub use lifetime::{with_minimum_duration, FetchTicket, ViewScope};
pub use notify::{notice_channel, Notice, NoticeLevel, NoticeSender};
pub use session::{SessionSnapshot, SessionStore};

pub use logger::init_logger;
