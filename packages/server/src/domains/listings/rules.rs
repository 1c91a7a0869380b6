//! Business rules checked on every listing write.
//!
//! Validation is collect-all: every applicable rule runs and a single failed
//! write reports all of its violations at once, not just the first.

use rust_decimal::Decimal;
use std::fmt;

use crate::common::{CityId, RegionId};
use crate::domains::listings::models::listing::ListingStatus;

/// A single violated rule, tagged with the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    /// The chosen city does not belong to the chosen region
    CityOutsideRegion { city_id: CityId, region_id: RegionId },

    /// Active and sold listings must carry a price
    PriceRequired { status: ListingStatus },

    /// Prices cannot be negative
    NegativePrice { amount: Decimal },
}

impl RuleViolation {
    /// Stable machine-readable code for clients
    pub fn code(&self) -> &'static str {
        match self {
            RuleViolation::CityOutsideRegion { .. } => "referential_mismatch",
            RuleViolation::PriceRequired { .. } => "price_required",
            RuleViolation::NegativePrice { .. } => "negative_price",
        }
    }

    /// The field the violation is about
    pub fn field(&self) -> &'static str {
        match self {
            RuleViolation::CityOutsideRegion { .. } => "city_id",
            RuleViolation::PriceRequired { .. } => "price_amount",
            RuleViolation::NegativePrice { .. } => "price_amount",
        }
    }
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleViolation::CityOutsideRegion { city_id, region_id } => {
                write!(f, "city {city_id} does not belong to region {region_id}")
            }
            RuleViolation::PriceRequired { status } => {
                write!(f, "a price is required for {status} listings")
            }
            RuleViolation::NegativePrice { amount } => {
                write!(f, "price cannot be negative (got {amount})")
            }
        }
    }
}

/// The full set of violations from one failed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleViolations(Vec<RuleViolation>);

impl RuleViolations {
    pub fn as_slice(&self) -> &[RuleViolation] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RuleViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for violation in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{violation}")?;
            first = false;
        }
        Ok(())
    }
}

/// Validate the merged state of a listing before it is persisted.
///
/// `city_region_id` is the parent region of the listing's city, freshly
/// resolved by the caller on every write.
pub fn validate_listing(
    status: ListingStatus,
    price_amount: Option<Decimal>,
    region_id: RegionId,
    city_id: CityId,
    city_region_id: RegionId,
) -> Result<(), RuleViolations> {
    let mut violations = Vec::new();

    if city_region_id != region_id {
        violations.push(RuleViolation::CityOutsideRegion { city_id, region_id });
    }

    if matches!(status, ListingStatus::Active | ListingStatus::Sold) && price_amount.is_none() {
        violations.push(RuleViolation::PriceRequired { status });
    }

    if let Some(amount) = price_amount {
        if amount < Decimal::ZERO {
            violations.push(RuleViolation::NegativePrice { amount });
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(RuleViolations(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (RegionId, CityId) {
        (RegionId::new(), CityId::new())
    }

    #[test]
    fn test_draft_without_price_is_valid() {
        let (region_id, city_id) = ids();
        let result = validate_listing(ListingStatus::Draft, None, region_id, city_id, region_id);
        assert!(result.is_ok());
    }

    #[test]
    fn test_active_without_price_rejected() {
        let (region_id, city_id) = ids();
        let violations =
            validate_listing(ListingStatus::Active, None, region_id, city_id, region_id)
                .unwrap_err();
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations.as_slice()[0],
            RuleViolation::PriceRequired {
                status: ListingStatus::Active
            }
        ));
    }

    #[test]
    fn test_sold_without_price_rejected() {
        let (region_id, city_id) = ids();
        let violations = validate_listing(ListingStatus::Sold, None, region_id, city_id, region_id)
            .unwrap_err();
        assert_eq!(violations.as_slice()[0].field(), "price_amount");
    }

    #[test]
    fn test_city_outside_region_rejected() {
        let (region_id, city_id) = ids();
        let other_region = RegionId::new();
        let violations = validate_listing(
            ListingStatus::Draft,
            None,
            region_id,
            city_id,
            other_region,
        )
        .unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.as_slice()[0].code(), "referential_mismatch");
    }

    #[test]
    fn test_negative_price_rejected() {
        let (region_id, city_id) = ids();
        let violations = validate_listing(
            ListingStatus::Draft,
            Some(Decimal::new(-100, 2)),
            region_id,
            city_id,
            region_id,
        )
        .unwrap_err();
        assert_eq!(violations.as_slice()[0].code(), "negative_price");
    }

    #[test]
    fn test_zero_price_is_valid() {
        let (region_id, city_id) = ids();
        let result = validate_listing(
            ListingStatus::Active,
            Some(Decimal::ZERO),
            region_id,
            city_id,
            region_id,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_all_violations_reported_together() {
        // Active listing, no price, in a city of another region, would be one
        // write surfacing both failures; a negative price makes it three-way
        // impossible, so check the two-violation case and the negative case.
        let (region_id, city_id) = ids();
        let other_region = RegionId::new();

        let violations =
            validate_listing(ListingStatus::Active, None, region_id, city_id, other_region)
                .unwrap_err();
        assert_eq!(violations.len(), 2);

        let violations = validate_listing(
            ListingStatus::Sold,
            Some(Decimal::new(-500, 2)),
            region_id,
            city_id,
            other_region,
        )
        .unwrap_err();
        assert_eq!(violations.len(), 2);
        let codes: Vec<_> = violations.as_slice().iter().map(|v| v.code()).collect();
        assert!(codes.contains(&"referential_mismatch"));
        assert!(codes.contains(&"negative_price"));
    }
}
