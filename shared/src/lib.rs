//! Shared types for the Ecologika marketplace
//!
//! Common types used across the client SDK and the application core:
//! domain models, error types, auth DTOs and the localization table.

pub mod auth;
pub mod error;
pub mod i18n;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ErrorCode, MarketError, MarketResult};
pub use i18n::{Language, current_language, set_language, tr};
