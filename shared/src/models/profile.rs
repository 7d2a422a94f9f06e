//! Profile Model

use super::approval::ApprovalStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Buyer,
    Seller,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Buyer => "buyer",
            UserRole::Seller => "seller",
            UserRole::Admin => "admin",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Profile entity, one-to-one with an authenticated identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Auth identity ID (primary key, shared with the auth provider)
    pub id: String,
    pub name: String,
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub user_type: UserRole,
    /// Derived projection of `approval_status == approved`; the status
    /// field is authoritative.
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub approval_status: ApprovalStatus,
    pub rejection_reason: Option<String>,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    /// Saved listing IDs; duplicate-free, order irrelevant
    #[serde(default)]
    pub saved_products: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Membership is the sole determinant of "favorited" state
    pub fn has_saved(&self, product_id: &str) -> bool {
        self.saved_products.iter().any(|id| id == product_id)
    }
}

/// Profile seed captured at sign-up (stored as auth user metadata and
/// materialized into a `profiles` row by the backend)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSeed {
    pub name: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub user_type: UserRole,
}

/// Update profile payload (descriptive fields only; approval transitions
/// go through [`super::ApprovalUpdate`], saved products through the
/// session store)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_saved() {
        let profile = Profile {
            id: "u1".into(),
            name: "Ana".into(),
            company: None,
            location: None,
            user_type: UserRole::Buyer,
            is_approved: true,
            approval_status: ApprovalStatus::Approved,
            rejection_reason: None,
            approved_by: None,
            approved_at: None,
            saved_products: vec!["p1".into(), "p2".into()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(profile.has_saved("p1"));
        assert!(!profile.has_saved("p3"));
    }
}
