//! Presentation projection

use jiff::{
    Timestamp, Zoned,
    fmt::strtime,
    tz::{Offset, TimeZone},
};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso};

use crate::{cart::Cart, courses::CourseId};

/// Render model for one cart row. The id keys the row's removal trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
    /// Course id, the removal key
    pub id: CourseId,

    /// Course title
    pub title: String,

    /// Difficulty label
    pub level: String,

    /// Formatted price, e.g. `₹499.00`
    pub price_display: String,
}

/// Render model for the whole cart panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    /// One row per entry, in cart order
    pub rows: Vec<CartRow>,

    /// Entry count, shown on the cart badge
    pub count: usize,

    /// Formatted total, e.g. `₹1,498.00`
    pub total_display: String,
}

impl CartView {
    /// Project a cart snapshot into its render model.
    #[must_use]
    pub fn project(cart: &Cart) -> Self {
        let rows = cart
            .iter()
            .map(|entry| CartRow {
                id: entry.id.clone(),
                title: entry.title.clone(),
                level: entry.level.clone(),
                price_display: format_inr(entry.price),
            })
            .collect();

        CartView {
            rows,
            count: cart.len(),
            total_display: format_inr(cart.total()),
        }
    }

    /// Whether the empty-cart placeholder should show instead of rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Summary shown in the checkout dialog before the buyer confirms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutPrompt {
    /// Number of courses being purchased
    pub count: usize,

    /// Dialog summary line
    pub summary: String,
}

impl CheckoutPrompt {
    /// Project a cart snapshot into the checkout dialog summary.
    #[must_use]
    pub fn project(cart: &Cart) -> Self {
        CheckoutPrompt {
            count: cart.len(),
            summary: format!(
                "You're purchasing {} course(s) • {}",
                cart.len(),
                format_inr(cart.total())
            ),
        }
    }
}

/// Format an amount in the page's fixed locale (Indian Rupee).
#[must_use]
pub fn format_inr(amount: Decimal) -> String {
    let minor = (amount * Decimal::ONE_HUNDRED).round().to_i64().unwrap_or(0);

    Money::from_minor(minor, iso::INR).to_string()
}

/// Format a timestamp in the page's fixed locale (IST wall clock).
#[must_use]
pub fn format_ist(at: Timestamp) -> String {
    let zoned = ist_zoned(at);

    strtime::format("%A, %d %B %Y, %I:%M:%S %p IST", &zoned).unwrap_or_else(|_| zoned.to_string())
}

/// The timestamp on the IST wall clock (fixed +05:30, no DST).
pub(crate) fn ist_zoned(at: Timestamp) -> Zoned {
    let offset = Offset::from_seconds(5 * 3600 + 1800).unwrap_or(Offset::UTC);

    at.to_zoned(TimeZone::fixed(offset))
}
