//! Purchase Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Purchase lifecycle status
///
/// Purchases are never deleted; later states supersede earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl PurchaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseStatus::Pending => "pending",
            PurchaseStatus::Completed => "completed",
            PurchaseStatus::Cancelled => "cancelled",
        }
    }
}

/// Purchase entity
///
/// `total_price` is computed at creation time and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    pub id: String,
    pub product_id: String,
    pub buyer_id: String,
    /// Seller denormalized from the product at time of purchase
    pub seller_id: String,
    pub quantity: i32,
    /// unit price × quantity + shipping, fixed at creation
    pub total_price: Decimal,
    /// quantity × product co2_savings, when the product reports one
    pub co2_saved: Option<Decimal>,
    pub status: PurchaseStatus,
    pub shipping_address: String,
    pub shipping_city: String,
    pub shipping_phone: String,
    pub purchase_date: DateTime<Utc>,
}

/// Create purchase payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseCreate {
    pub product_id: String,
    pub buyer_id: String,
    pub seller_id: String,
    pub quantity: i32,
    pub total_price: Decimal,
    pub co2_saved: Option<Decimal>,
    pub status: PurchaseStatus,
    pub shipping_address: String,
    pub shipping_city: String,
    pub shipping_phone: String,
}
