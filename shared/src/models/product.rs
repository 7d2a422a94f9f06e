//! Product Model

use super::approval::ApprovalStatus;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sale unit for a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    #[default]
    Kg,
    Ton,
    Unit,
    M3,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::Ton => "ton",
            Unit::Unit => "unit",
            Unit::M3 => "m3",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub material: String,
    /// Interest category reference (String ID)
    pub category: Option<String>,
    /// Price per unit in currency units (2 decimal places)
    pub price: Decimal,
    /// Available stock in `unit`
    pub quantity: i32,
    #[serde(default)]
    pub unit: Unit,
    pub country: String,
    pub city: Option<String>,
    pub address: Option<String>,
    /// Composite display location ("city, country")
    #[serde(default)]
    pub location: String,
    /// Owning seller identity
    pub seller_id: String,
    /// Denormalized seller fields for catalog display
    pub seller_name: Option<String>,
    pub seller_company: Option<String>,
    /// Legacy single cover image (superseded by `product_images` rows)
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub approval_status: ApprovalStatus,
    pub rejection_reason: Option<String>,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    /// CO2 saved per unit sold, when the seller reports it
    pub co2_savings: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Whether the listing may appear in the public catalog
    pub fn is_listed(&self) -> bool {
        self.is_active && self.approval_status == ApprovalStatus::Approved
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub material: String,
    pub category: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub unit: Unit,
    pub country: String,
    pub city: Option<String>,
    pub address: Option<String>,
    pub location: String,
    pub seller_id: String,
    pub seller_name: Option<String>,
    pub seller_company: Option<String>,
    pub image_url: Option<String>,
    pub co2_savings: Option<Decimal>,
    pub is_active: bool,
    pub approval_status: ApprovalStatus,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub co2_savings: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(active: bool, status: ApprovalStatus) -> Product {
        Product {
            id: "p1".into(),
            name: "Scrap metal".into(),
            description: String::new(),
            material: "Metal".into(),
            category: None,
            price: Decimal::new(10000, 2),
            quantity: 10,
            unit: Unit::Kg,
            country: "Portugal".into(),
            city: None,
            address: None,
            location: "Porto, Portugal".into(),
            seller_id: "s1".into(),
            seller_name: None,
            seller_company: None,
            image_url: None,
            is_active: active,
            approval_status: status,
            rejection_reason: None,
            approved_by: None,
            approved_at: None,
            co2_savings: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_listed_requires_active_and_approved() {
        assert!(product(true, ApprovalStatus::Approved).is_listed());
        assert!(!product(false, ApprovalStatus::Approved).is_listed());
        assert!(!product(true, ApprovalStatus::Pending).is_listed());
        assert!(!product(true, ApprovalStatus::Rejected).is_listed());
    }
}
