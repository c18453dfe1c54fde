//! Checkout

use jiff::Timestamp;
use rand::Rng;
use rust_decimal::Decimal;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{cart::Cart, email};

/// Buyer shown on a placeholder order reconstructed from a bare reference.
pub const PLACEHOLDER_BUYER_NAME: &str = "Valued customer";

/// Email shown on a placeholder order reconstructed from a bare reference.
pub const PLACEHOLDER_BUYER_EMAIL: &str = "you@example.com";

/// Reasons a checkout is refused. All are non-fatal notices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Checkout with nothing in the cart.
    #[error("Your cart is empty. Please add at least one course.")]
    EmptyCart,

    /// Buyer name or email not provided.
    #[error("Please provide name and email to place the order.")]
    MissingBuyerDetails,

    /// Buyer email does not look deliverable.
    #[error("Please enter a valid email address (e.g., user@example.com)")]
    InvalidEmail,

    /// A checkout is already in flight.
    #[error("Your order is already being processed.")]
    AlreadyProcessing,
}

/// Validated buyer details for an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyerDetails {
    name: String,
    email: String,
}

impl BuyerDetails {
    /// Validate raw form input into buyer details.
    ///
    /// Both fields are trimmed.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::MissingBuyerDetails`]: name or email is blank.
    /// - [`CheckoutError::InvalidEmail`]: email fails format validation.
    pub fn parse(name: &str, email: &str) -> Result<Self, CheckoutError> {
        let name = name.trim();
        let email = email.trim();

        if name.is_empty() || email.is_empty() {
            return Err(CheckoutError::MissingBuyerDetails);
        }

        if !email::is_valid(email) {
            return Err(CheckoutError::InvalidEmail);
        }

        Ok(BuyerDetails {
            name: name.to_owned(),
            email: email.to_owned(),
        })
    }

    /// Buyer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Buyer email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// One purchased course, snapshotted at checkout time.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    /// Course title
    pub title: String,

    /// Difficulty label
    pub level: String,

    /// Price at purchase time
    pub price: Decimal,
}

/// A confirmed order. Immutable once created, and never persisted: only
/// its reference survives into the navigation stack.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    /// Order reference, e.g. `SI-A1B2C3D`
    pub order_id: String,

    /// When the order was placed
    pub placed_at: Timestamp,

    /// Buyer name
    pub buyer_name: String,

    /// Buyer email
    pub buyer_email: String,

    /// Purchased courses, in cart order
    pub line_items: SmallVec<[LineItem; 8]>,

    /// Amount charged
    pub total: Decimal,
}

impl OrderRecord {
    /// Snapshot the cart into an order for the given buyer.
    #[must_use]
    pub fn from_cart(
        order_id: String,
        placed_at: Timestamp,
        buyer: &BuyerDetails,
        cart: &Cart,
    ) -> Self {
        let line_items = cart
            .iter()
            .map(|entry| LineItem {
                title: entry.title.clone(),
                level: entry.level.clone(),
                price: entry.price,
            })
            .collect();

        OrderRecord {
            order_id,
            placed_at,
            buyer_name: buyer.name().to_owned(),
            buyer_email: buyer.email().to_owned(),
            line_items,
            total: cart.total(),
        }
    }

    /// Degraded order reconstructed from a bare reference.
    ///
    /// Full order detail is not reconstructable from a bookmark: the
    /// placeholder carries no line items and a zero amount.
    #[must_use]
    pub fn placeholder(order_id: String, now: Timestamp) -> Self {
        OrderRecord {
            order_id,
            placed_at: now,
            buyer_name: PLACEHOLDER_BUYER_NAME.to_owned(),
            buyer_email: PLACEHOLDER_BUYER_EMAIL.to_owned(),
            line_items: SmallVec::new(),
            total: Decimal::ZERO,
        }
    }
}

/// Generate an order reference: `SI-` plus seven uppercase base-36 chars.
pub fn reference(rng: &mut impl Rng) -> String {
    let tail: String = (0..7)
        .map(|_| {
            char::from_digit(rng.gen_range(0..36), 36)
                .unwrap_or('0')
                .to_ascii_uppercase()
        })
        .collect();

    format!("SI-{tail}")
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use testresult::TestResult;

    use crate::courses::CourseEntry;

    use super::*;

    fn cart_with_two_courses() -> TestResult<Cart> {
        let mut cart = Cart::new();
        cart.add(CourseEntry::new(
            "c1",
            "Stock Market Fundamentals",
            Decimal::new(49900, 2),
            "Beginner",
        ))?;
        cart.add(CourseEntry::new(
            "c2",
            "Technical Analysis Masterclass",
            Decimal::new(99900, 2),
            "Intermediate",
        ))?;

        Ok(cart)
    }

    #[test]
    fn parse_trims_and_accepts_valid_details() -> TestResult {
        let buyer = BuyerDetails::parse("  Asha Rao  ", " asha@example.com ")?;

        assert_eq!(buyer.name(), "Asha Rao");
        assert_eq!(buyer.email(), "asha@example.com");

        Ok(())
    }

    #[test]
    fn parse_rejects_blank_fields() {
        assert_eq!(
            BuyerDetails::parse("   ", "asha@example.com"),
            Err(CheckoutError::MissingBuyerDetails)
        );
        assert_eq!(
            BuyerDetails::parse("Asha", ""),
            Err(CheckoutError::MissingBuyerDetails)
        );
    }

    #[test]
    fn parse_rejects_malformed_email() {
        assert_eq!(
            BuyerDetails::parse("Asha", "asha@nowhere"),
            Err(CheckoutError::InvalidEmail)
        );
    }

    #[test]
    fn from_cart_snapshots_items_and_total() -> TestResult {
        let cart = cart_with_two_courses()?;
        let buyer = BuyerDetails::parse("Asha", "asha@example.com")?;

        let order = OrderRecord::from_cart(
            "SI-A1B2C3D".to_owned(),
            Timestamp::UNIX_EPOCH,
            &buyer,
            &cart,
        );

        assert_eq!(order.line_items.len(), 2);
        assert_eq!(order.total, Decimal::new(149800, 2));
        assert_eq!(
            order.line_items.first().map(|item| item.title.as_str()),
            Some("Stock Market Fundamentals")
        );

        Ok(())
    }

    #[test]
    fn placeholder_has_no_detail() {
        let order = OrderRecord::placeholder("SI-A1B2C3D".to_owned(), Timestamp::UNIX_EPOCH);

        assert_eq!(order.order_id, "SI-A1B2C3D");
        assert_eq!(order.buyer_name, PLACEHOLDER_BUYER_NAME);
        assert!(order.line_items.is_empty());
        assert_eq!(order.total, Decimal::ZERO);
    }

    #[test]
    fn reference_has_prefix_and_seven_base36_chars() {
        let mut rng = StdRng::seed_from_u64(7);

        let reference = reference(&mut rng);
        let tail = reference.strip_prefix("SI-").unwrap_or_default();

        assert_eq!(tail.len(), 7);
        assert!(
            tail.chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()),
            "reference tail should be uppercase base-36"
        );
    }
}
