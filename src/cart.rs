//! Cart

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    courses::{CourseEntry, CourseId},
    store::{CART_KEY, SessionStore},
};

/// Errors related to cart mutation.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// The course is already in the cart; the cart is unchanged.
    #[error("Course already in cart. You can proceed to Buy or add other courses.")]
    DuplicateEntry(CourseId),
}

/// The visitor's cart: insertion-ordered, at most one entry per course id.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Cart {
    entries: Vec<CourseEntry>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Cart::default()
    }

    /// Add a course to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::DuplicateEntry`] if a course with the same id
    /// is already present. The cart is left unchanged.
    pub fn add(&mut self, entry: CourseEntry) -> Result<(), CartError> {
        if self.contains(&entry.id) {
            return Err(CartError::DuplicateEntry(entry.id));
        }

        self.entries.push(entry);

        Ok(())
    }

    /// Remove the course with the given id, if present.
    ///
    /// Removing an absent id is a no-op, not an error.
    pub fn remove(&mut self, id: &CourseId) {
        self.entries.retain(|entry| &entry.id != id);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Sum of entry prices; zero for an empty cart.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|entry| entry.price).sum()
    }

    /// Whether a course with the given id is in the cart.
    #[must_use]
    pub fn contains(&self, id: &CourseId) -> bool {
        self.entries.iter().any(|entry| &entry.id == id)
    }

    /// Iterate over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CourseEntry> {
        self.entries.iter()
    }

    /// Get the number of entries in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the cart through to the session store.
    ///
    /// The store is convenience, not durable truth: failures to
    /// serialize or write are logged and swallowed.
    pub fn persist(&self, store: &mut impl SessionStore) {
        let payload = match serde_json::to_string(&self.entries) {
            Ok(payload) => payload,
            Err(error) => {
                tracing::debug!(%error, "cart serialization failed; skipping persist");
                return;
            }
        };

        if let Err(error) = store.set(CART_KEY, &payload) {
            tracing::debug!(%error, "cart persist failed; keeping in-memory state");
        }
    }

    /// Load the cart persisted in the session store.
    ///
    /// An absent, unreadable or unparsable payload yields an empty cart.
    /// Entries that would violate id uniqueness are dropped.
    pub fn restore(store: &impl SessionStore) -> Self {
        let raw = match store.get(CART_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(error) => {
                tracing::debug!(%error, "cart restore failed; starting empty");
                return Cart::new();
            }
        };

        let entries: Vec<CourseEntry> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(error) => {
                tracing::debug!(%error, "stored cart is corrupt; starting empty");
                return Cart::new();
            }
        };

        let mut cart = Cart::new();
        for entry in entries {
            _ = cart.add(entry);
        }

        cart
    }
}
