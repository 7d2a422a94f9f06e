//! Filter/search composition engine
//!
//! Free-text search and structured filters compose conjunctively over
//! the working collection. Filtering only restricts results once the
//! user has deviated from the defaults or entered a search term: the
//! default price ceiling is a UI convenience bound, not a constraint,
//! until the user engages it.

use super::Listing;
use crate::backend::{MarketBackend, ProductColumn};
use crate::AppResult;
use rust_decimal::Decimal;
use shared::models::Product;
use shared::{MarketError, MarketResult};

/// Inclusive price interval in the listing currency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    min: Decimal,
    max: Decimal,
}

impl PriceRange {
    pub const DEFAULT_MIN: Decimal = Decimal::ZERO;
    pub const DEFAULT_MAX: Decimal = Decimal::ONE_THOUSAND;

    /// Build a validated range
    pub fn new(min: Decimal, max: Decimal) -> MarketResult<Self> {
        if min < Decimal::ZERO {
            return Err(MarketError::validation("price range minimum must be >= 0"));
        }
        if max < min {
            return Err(MarketError::validation(
                "price range maximum must be >= minimum",
            ));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Decimal {
        self.min
    }

    pub fn max(&self) -> Decimal {
        self.max
    }

    /// Closed-interval membership
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && price <= self.max
    }

    pub fn is_default(&self) -> bool {
        self.min == Self::DEFAULT_MIN && self.max == Self::DEFAULT_MAX
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

/// Search term plus structured filter state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Free-text term matched against name, material and description
    pub search: String,
    /// Exact-match material
    pub material: Option<String>,
    /// Substring-match location
    pub location: Option<String>,
    /// Exact-match country
    pub country: Option<String>,
    pub price_range: PriceRange,
}

impl FilterState {
    /// Activation gate: has the user deviated from the defaults?
    pub fn is_engaged(&self) -> bool {
        !self.search.trim().is_empty()
            || engaged(&self.material).is_some()
            || engaged(&self.location).is_some()
            || engaged(&self.country).is_some()
            || !self.price_range.is_default()
    }

    /// Conjunction of all five predicate clauses
    pub fn matches(&self, product: &Product) -> bool {
        let term = self.search.trim();
        if !term.is_empty()
            && !(contains_ci(&product.name, term)
                || contains_ci(&product.material, term)
                || contains_ci(&product.description, term))
        {
            return false;
        }

        if let Some(material) = engaged(&self.material) {
            if product.material != material {
                return false;
            }
        }

        if let Some(location) = engaged(&self.location) {
            if !contains_ci(&product.location, location) {
                return false;
            }
        }

        if let Some(country) = engaged(&self.country) {
            if product.country != country {
                return false;
            }
        }

        self.price_range.contains(product.price)
    }

    /// Recompute the filtered sequence over an immutable snapshot
    ///
    /// Full recomputation on every call; catalog sizes are small to
    /// moderate and the function stays pure.
    pub fn apply(&self, listings: &[Listing]) -> Vec<Listing> {
        if !self.is_engaged() {
            return listings.to_vec();
        }
        listings
            .iter()
            .filter(|listing| self.matches(&listing.product))
            .cloned()
            .collect()
    }
}

fn engaged(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Selectable values for the structured filters
///
/// Derived by distinct-value extraction over all currently active
/// listings, queried independently of the loaded working collection.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub materials: Vec<String>,
    pub locations: Vec<String>,
    pub countries: Vec<String>,
}

impl FilterOptions {
    pub async fn collect(backend: &dyn MarketBackend) -> AppResult<Self> {
        Ok(Self {
            materials: backend
                .distinct_product_values(ProductColumn::Material)
                .await?,
            locations: backend
                .distinct_product_values(ProductColumn::Location)
                .await?,
            countries: backend
                .distinct_product_values(ProductColumn::Country)
                .await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::models::{ApprovalStatus, Unit};

    fn listing(name: &str, material: &str, description: &str, price: i64) -> Listing {
        listing_in(name, material, description, price, "Porto, Portugal", "Portugal")
    }

    fn listing_in(
        name: &str,
        material: &str,
        description: &str,
        price: i64,
        location: &str,
        country: &str,
    ) -> Listing {
        let product = Product {
            id: format!("p-{}", name),
            name: name.into(),
            description: description.into(),
            material: material.into(),
            category: None,
            price: Decimal::new(price, 2),
            quantity: 5,
            unit: Unit::Kg,
            country: country.into(),
            city: None,
            address: None,
            location: location.into(),
            seller_id: "s1".into(),
            seller_name: None,
            seller_company: None,
            image_url: None,
            is_active: true,
            approval_status: ApprovalStatus::Approved,
            rejection_reason: None,
            approved_by: None,
            approved_at: None,
            co2_savings: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        Listing::new(product, Vec::new())
    }

    #[test]
    fn test_default_state_shows_everything() {
        // Includes a listing priced above the default ceiling: the
        // activation gate keeps the default range from hiding it.
        let collection = vec![
            listing("Scrap metal", "Metal", "", 10_000),
            listing("Industrial lot", "Metal", "", 250_000),
        ];

        let state = FilterState::default();
        assert!(!state.is_engaged());
        assert_eq!(state.apply(&collection).len(), 2);
    }

    #[test]
    fn test_engaged_output_is_subset_satisfying_all_clauses() {
        let collection = vec![
            listing_in("Scrap metal", "Metal", "", 10_000, "Porto, Portugal", "Portugal"),
            listing_in("Copper wire", "Metal", "", 90_000, "Madrid, Spain", "Spain"),
            listing_in("Cardboard", "Paper", "", 500, "Porto, Portugal", "Portugal"),
        ];

        let state = FilterState {
            material: Some("Metal".into()),
            country: Some("Portugal".into()),
            ..FilterState::default()
        };
        assert!(state.is_engaged());

        let filtered = state.apply(&collection);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].product.name, "Scrap metal");
        assert!(filtered.iter().all(|l| state.matches(&l.product)));
    }

    #[test]
    fn test_search_matches_name_material_and_description() {
        let collection = vec![
            listing("Beams", "Metal", "", 1_000),
            listing("Container", "Plastic", "used metal container", 1_000),
            listing("Plastic Bottle", "Plastic", "clear bottles", 1_000),
        ];

        let state = FilterState {
            search: "metal".into(),
            ..FilterState::default()
        };

        let filtered = state.apply(&collection);
        let names: Vec<&str> = filtered.iter().map(|l| l.product.name.as_str()).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"Beams"));
        assert!(names.contains(&"Container"));
    }

    #[test]
    fn test_location_is_substring_match() {
        let collection = vec![
            listing_in("A", "Metal", "", 1_000, "Vila Nova de Gaia, Portugal", "Portugal"),
            listing_in("B", "Metal", "", 1_000, "Lisboa, Portugal", "Portugal"),
        ];

        let state = FilterState {
            location: Some("gaia".into()),
            ..FilterState::default()
        };
        let filtered = state.apply(&collection);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].product.name, "A");
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let range = PriceRange::new(Decimal::new(1_000, 2), Decimal::new(5_000, 2)).unwrap();
        assert!(range.contains(Decimal::new(1_000, 2)));
        assert!(range.contains(Decimal::new(5_000, 2)));
        assert!(!range.contains(Decimal::new(5_001, 2)));

        let state = FilterState {
            price_range: range,
            ..FilterState::default()
        };
        assert!(state.is_engaged());

        let collection = vec![listing("Edge", "Metal", "", 5_000)];
        assert_eq!(state.apply(&collection).len(), 1);
    }

    #[test]
    fn test_invalid_range_rejected() {
        assert!(PriceRange::new(Decimal::new(-1, 0), Decimal::ONE_THOUSAND).is_err());
        assert!(PriceRange::new(Decimal::ONE_THOUSAND, Decimal::ZERO).is_err());
    }

    #[test]
    fn test_whitespace_filters_do_not_engage() {
        let state = FilterState {
            search: "   ".into(),
            material: Some(String::new()),
            ..FilterState::default()
        };
        assert!(!state.is_engaged());
    }
}
