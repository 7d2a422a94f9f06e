//! Approval workflow types
//!
//! The pending→approved|rejected state machine shared by profiles and
//! products. `approval_status` is authoritative everywhere; boolean
//! projections (`Profile::is_approved`) are derived from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Approval lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }

    /// Approve and reject are terminal; only pending entities transition.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ApprovalStatus::Pending)
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Approval transition payload applied to a pending entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalUpdate {
    pub approval_status: ApprovalStatus,
    pub rejection_reason: Option<String>,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
}

impl ApprovalUpdate {
    /// Build an approval stamped with the deciding admin and time
    pub fn approve(admin_id: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            approval_status: ApprovalStatus::Approved,
            rejection_reason: None,
            approved_by: Some(admin_id.into()),
            approved_at: Some(at),
        }
    }

    /// Build a rejection carrying the reason
    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            approval_status: ApprovalStatus::Rejected,
            rejection_reason: Some(reason.into()),
            approved_by: None,
            approved_at: None,
        }
    }

    /// The boolean projection written alongside the status on profiles
    pub fn derived_is_approved(&self) -> bool {
        self.approval_status == ApprovalStatus::Approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!ApprovalStatus::Pending.is_terminal());
        assert!(ApprovalStatus::Approved.is_terminal());
        assert!(ApprovalStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_reject_carries_reason() {
        let update = ApprovalUpdate::reject("inadequate");
        assert_eq!(update.approval_status, ApprovalStatus::Rejected);
        assert_eq!(update.rejection_reason.as_deref(), Some("inadequate"));
        assert!(update.approved_by.is_none());
    }
}
