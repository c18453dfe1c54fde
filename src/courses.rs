//! Courses

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opaque course identifier, unique within a catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(String);

impl CourseId {
    /// Create a course id from its string form.
    pub fn new(id: impl Into<String>) -> Self {
        CourseId(id.into())
    }

    /// Generate a fallback id for markup that carries none.
    pub fn generated(rng: &mut impl Rng) -> Self {
        let id: String = (0..7)
            .map(|_| char::from_digit(rng.gen_range(0..36), 36).unwrap_or('0'))
            .collect();

        CourseId(id)
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for CourseId {
    fn from(id: &str) -> Self {
        CourseId(id.to_owned())
    }
}

impl From<String> for CourseId {
    fn from(id: String) -> Self {
        CourseId(id)
    }
}

/// One course as listed on the storefront page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseEntry {
    /// Course identifier
    pub id: CourseId,

    /// Course title
    pub title: String,

    /// Course price
    pub price: Decimal,

    /// Difficulty label, e.g. "Beginner"
    pub level: String,
}

impl CourseEntry {
    /// Create a new course entry.
    pub fn new(
        id: impl Into<CourseId>,
        title: impl Into<String>,
        price: Decimal,
        level: impl Into<String>,
    ) -> Self {
        CourseEntry {
            id: id.into(),
            title: title.into(),
            price,
            level: level.into(),
        }
    }
}

/// Parse a price attribute from page markup.
///
/// Markup is untrusted: anything unparsable, and any negative value,
/// falls back to zero.
#[must_use]
pub fn parse_price(raw: &str) -> Decimal {
    Decimal::from_str(raw.trim())
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO)
}
