//! Interest Category Model

use serde::{Deserialize, Serialize};

/// Interest category lookup row (table `interesse`)
///
/// Used to categorize listings and sign-up interests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestCategory {
    pub id: String,
    pub name: String,
}
