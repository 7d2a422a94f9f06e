//! Checkout workflow
//!
//! Draft → Validated → Committed, with no way back from Committed. The
//! stages are encoded as typestates so a purchase can only be committed
//! through validation. Totals shown in Draft are display values; commit
//! re-derives them rather than trusting the caller.

use crate::backend::MarketBackend;
use crate::AppError;
use rust_decimal::Decimal;
use shared::models::{Product, Profile, Purchase, PurchaseCreate, PurchaseStatus};
use std::marker::PhantomData;
use validator::Validate;

/// Flat shipping fee applied to every order
pub const SHIPPING_FEE: Decimal = Decimal::from_parts(1500, 0, 0, false, 2);

/// Draft stage marker
#[derive(Debug, Clone, Copy)]
pub struct Draft;

/// Validated stage marker
#[derive(Debug, Clone, Copy)]
pub struct Validated;

/// Shipping details collected in the draft stage
#[derive(Debug, Clone, Default, Validate)]
pub struct ShippingForm {
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
}

/// Field-level validation error surfaced inline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Price breakdown for display and for the committed total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuote {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

/// Checkout state machine
#[derive(Debug, Clone)]
pub struct Checkout<Stage> {
    product: Product,
    quantity: i32,
    shipping: ShippingForm,
    _stage: PhantomData<Stage>,
}

impl<Stage> Checkout<Stage> {
    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn shipping(&self) -> &ShippingForm {
        &self.shipping
    }

    /// Price breakdown at the current quantity
    pub fn quote(&self) -> PriceQuote {
        let subtotal = (self.product.price * Decimal::from(self.quantity)).round_dp(2);
        PriceQuote {
            subtotal,
            shipping: SHIPPING_FEE,
            total: subtotal + SHIPPING_FEE,
        }
    }
}

impl Checkout<Draft> {
    /// Start a draft for one listing
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
            shipping: ShippingForm::default(),
            _stage: PhantomData,
        }
    }

    pub fn set_quantity(&mut self, quantity: i32) {
        self.quantity = quantity;
    }

    pub fn set_shipping(&mut self, shipping: ShippingForm) {
        self.shipping = shipping;
    }

    /// Draft → Validated
    ///
    /// Violations block the transition and hand the draft back with
    /// field-level errors; nothing is partially committed.
    pub fn validate(self) -> Result<Checkout<Validated>, ValidationFailure> {
        let mut errors = Vec::new();

        if let Err(validation) = self.shipping.validate() {
            for (field, field_errors) in validation.field_errors() {
                for error in field_errors {
                    errors.push(FieldError {
                        field: field.to_string(),
                        message: error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| "invalid value".to_string()),
                    });
                }
            }
        }

        if self.quantity < 1 || self.quantity > self.product.quantity {
            errors.push(FieldError {
                field: "quantity".to_string(),
                message: format!("quantity must be between 1 and {}", self.product.quantity),
            });
        }

        if errors.is_empty() {
            Ok(Checkout {
                product: self.product,
                quantity: self.quantity,
                shipping: self.shipping,
                _stage: PhantomData,
            })
        } else {
            Err(ValidationFailure { draft: self, errors })
        }
    }
}

/// Blocked Draft→Validated transition; the draft survives for correction
#[derive(Debug)]
pub struct ValidationFailure {
    pub draft: Checkout<Draft>,
    pub errors: Vec<FieldError>,
}

impl Checkout<Validated> {
    /// Validated → Committed: create exactly one purchase row
    ///
    /// The total is re-derived here, the seller is copied from the
    /// product, and the purchase starts in its completed-equivalent
    /// state (payment is settled out-of-band). A failed insert hands the
    /// validated checkout back for resubmission; no side effects were
    /// applied.
    pub async fn commit(
        self,
        backend: &dyn MarketBackend,
        buyer: &Profile,
    ) -> Result<Purchase, CommitFailure> {
        let quote = self.quote();
        let co2_saved = self
            .product
            .co2_savings
            .map(|per_unit| (per_unit * Decimal::from(self.quantity)).round_dp(2));

        let create = PurchaseCreate {
            product_id: self.product.id.clone(),
            buyer_id: buyer.id.clone(),
            seller_id: self.product.seller_id.clone(),
            quantity: self.quantity,
            total_price: quote.total,
            co2_saved,
            status: PurchaseStatus::Completed,
            shipping_address: self.shipping.address.clone(),
            shipping_city: self.shipping.city.clone(),
            shipping_phone: self.shipping.phone.clone(),
        };

        match backend.insert_purchase(create).await {
            Ok(purchase) => {
                tracing::debug!(purchase_id = %purchase.id, "purchase committed");
                Ok(purchase)
            }
            Err(error) => {
                tracing::warn!(%error, "purchase commit failed");
                Err(CommitFailure {
                    checkout: self,
                    error,
                })
            }
        }
    }
}

/// Failed commit; the validated checkout survives for retry
#[derive(Debug)]
pub struct CommitFailure {
    pub checkout: Checkout<Validated>,
    pub error: AppError,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::models::{ApprovalStatus, Unit};

    fn product(price_cents: i64, stock: i32) -> Product {
        Product {
            id: "p1".into(),
            name: "Scrap metal".into(),
            description: String::new(),
            material: "Metal".into(),
            category: None,
            price: Decimal::new(price_cents, 2),
            quantity: stock,
            unit: Unit::Kg,
            country: "Portugal".into(),
            city: None,
            address: None,
            location: "Porto, Portugal".into(),
            seller_id: "s1".into(),
            seller_name: None,
            seller_company: None,
            image_url: None,
            is_active: true,
            approval_status: ApprovalStatus::Approved,
            rejection_reason: None,
            approved_by: None,
            approved_at: None,
            co2_savings: Some(Decimal::new(250, 2)),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn filled_form() -> ShippingForm {
        ShippingForm {
            address: "Rua Verde 1".into(),
            city: "Porto".into(),
            phone: "+351 900 000 000".into(),
        }
    }

    #[test]
    fn test_quote_arithmetic() {
        // 100.00 × 3 + 15.00 shipping = 315.00
        let mut draft = Checkout::new(product(10_000, 10));
        draft.set_quantity(3);

        let quote = draft.quote();
        assert_eq!(quote.subtotal, Decimal::new(30_000, 2));
        assert_eq!(quote.shipping, Decimal::new(1_500, 2));
        assert_eq!(quote.total, Decimal::new(31_500, 2));
    }

    #[test]
    fn test_total_law_for_valid_quantities() {
        let listing = product(1_234, 7);
        for quantity in 1..=7 {
            let mut draft = Checkout::new(listing.clone());
            draft.set_quantity(quantity);
            let quote = draft.quote();
            assert_eq!(
                quote.total,
                listing.price * Decimal::from(quantity) + SHIPPING_FEE
            );
        }
    }

    #[test]
    fn test_quantity_bounds_block_validation() {
        for quantity in [0, -1, 6] {
            let mut draft = Checkout::new(product(10_000, 5));
            draft.set_quantity(quantity);
            draft.set_shipping(filled_form());

            let failure = draft.validate().err().expect("validation must fail");
            assert!(failure.errors.iter().any(|e| e.field == "quantity"));
            // The draft survives for correction
            assert_eq!(failure.draft.quantity(), quantity);
        }
    }

    #[test]
    fn test_quantity_at_stock_passes() {
        let mut draft = Checkout::new(product(10_000, 5));
        draft.set_quantity(5);
        draft.set_shipping(filled_form());
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_missing_shipping_fields_reported_per_field() {
        let mut draft = Checkout::new(product(10_000, 5));
        draft.set_shipping(ShippingForm {
            address: String::new(),
            city: "Porto".into(),
            phone: String::new(),
        });

        let failure = draft.validate().err().expect("validation must fail");
        let fields: Vec<&str> = failure.errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"address"));
        assert!(fields.contains(&"phone"));
        assert!(!fields.contains(&"city"));
    }
}
