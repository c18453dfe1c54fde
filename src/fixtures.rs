//! Fixtures

use rust_decimal::Decimal;

use crate::courses::CourseEntry;

/// The sample course catalogue used by demos and tests.
#[must_use]
pub fn catalogue() -> Vec<CourseEntry> {
    vec![
        CourseEntry::new(
            "c1",
            "Stock Market Fundamentals",
            Decimal::new(49900, 2),
            "Beginner",
        ),
        CourseEntry::new(
            "c2",
            "Technical Analysis Masterclass",
            Decimal::new(99900, 2),
            "Intermediate",
        ),
        CourseEntry::new(
            "c3",
            "Options Trading Essentials",
            Decimal::new(129900, 2),
            "Intermediate",
        ),
        CourseEntry::new(
            "c4",
            "Portfolio & Risk Management",
            Decimal::new(149900, 2),
            "Advanced",
        ),
        CourseEntry::new(
            "c5",
            "Futures & Derivatives Deep Dive",
            Decimal::new(199900, 2),
            "Advanced",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_ids_are_unique() {
        let catalogue = catalogue();

        let mut ids: Vec<&str> = catalogue.iter().map(|entry| entry.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), catalogue.len());
    }

    #[test]
    fn catalogue_prices_are_positive() {
        assert!(
            catalogue().iter().all(|entry| entry.price > Decimal::ZERO),
            "fixture prices should be positive"
        );
    }
}
