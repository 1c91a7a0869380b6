//! Listing lifecycle scenarios driven through the public decision core.
//!
//! These walk the same pure functions the actions run inside their
//! transactions: transition check, business rules, stamp assignment.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use server_core::common::{CityId, RegionId};
use server_core::domains::listings::error::ListingError;
use server_core::domains::listings::machines::{
    assign_lifecycle_stamps, check_transition, LifecycleStamps,
};
use server_core::domains::listings::models::listing::ListingStatus;
use server_core::domains::listings::rules::{validate_listing, RuleViolation};

#[test]
fn draft_listing_without_price_is_accepted() {
    // Scenario A: create in draft with no price
    let region_id = RegionId::new();
    let city_id = CityId::new();

    assert!(check_transition(None, ListingStatus::Draft).is_ok());
    assert!(validate_listing(ListingStatus::Draft, None, region_id, city_id, region_id).is_ok());

    let stamps = assign_lifecycle_stamps(
        None,
        ListingStatus::Draft,
        LifecycleStamps::default(),
        Utc::now(),
    );
    assert_eq!(stamps, LifecycleStamps::default());
}

#[test]
fn activating_without_price_is_rejected() {
    // Scenario B: draft -> active with a null price
    let region_id = RegionId::new();
    let city_id = CityId::new();

    assert!(check_transition(Some(ListingStatus::Draft), ListingStatus::Active).is_ok());

    let violations =
        validate_listing(ListingStatus::Active, None, region_id, city_id, region_id).unwrap_err();
    assert!(matches!(
        violations.as_slice(),
        [RuleViolation::PriceRequired { .. }]
    ));
}

#[test]
fn activating_with_price_publishes_once() {
    // Scenario C: draft -> active with price 150.00
    let region_id = RegionId::new();
    let city_id = CityId::new();
    let price = Decimal::new(15000, 2);

    assert!(check_transition(Some(ListingStatus::Draft), ListingStatus::Active).is_ok());
    assert!(
        validate_listing(ListingStatus::Active, Some(price), region_id, city_id, region_id).is_ok()
    );

    let published = Utc::now();
    let stamps = assign_lifecycle_stamps(
        Some(ListingStatus::Draft),
        ListingStatus::Active,
        LifecycleStamps::default(),
        published,
    );
    assert_eq!(stamps.published_at, Some(published));
    assert_eq!(stamps.sold_at, None);
    assert_eq!(stamps.archived_at, None);

    // A later self-transition back into active leaves the stamp alone.
    let stamps = assign_lifecycle_stamps(
        Some(ListingStatus::Active),
        ListingStatus::Active,
        stamps,
        published + Duration::hours(2),
    );
    assert_eq!(stamps.published_at, Some(published));
}

#[test]
fn archiving_is_terminal() {
    // Scenario D: active -> archived succeeds, archived -> active does not
    assert!(check_transition(Some(ListingStatus::Active), ListingStatus::Archived).is_ok());

    let archived = Utc::now();
    let stamps = assign_lifecycle_stamps(
        Some(ListingStatus::Active),
        ListingStatus::Archived,
        LifecycleStamps {
            published_at: Some(archived - Duration::days(1)),
            sold_at: None,
            archived_at: None,
        },
        archived,
    );
    assert_eq!(stamps.archived_at, Some(archived));

    let result = check_transition(Some(ListingStatus::Archived), ListingStatus::Active);
    assert!(matches!(
        result,
        Err(ListingError::InvalidTransition {
            from: ListingStatus::Archived,
            to: ListingStatus::Active,
        })
    ));
}

#[test]
fn city_from_another_region_is_rejected() {
    // Scenario E: the chosen city belongs to a different region
    let region_id = RegionId::new();
    let city_id = CityId::new();
    let city_region_id = RegionId::new();

    let violations = validate_listing(
        ListingStatus::Draft,
        None,
        region_id,
        city_id,
        city_region_id,
    )
    .unwrap_err();
    assert!(matches!(
        violations.as_slice(),
        [RuleViolation::CityOutsideRegion { .. }]
    ));
}

#[test]
fn selling_follows_activation_only() {
    assert!(check_transition(Some(ListingStatus::Active), ListingStatus::Sold).is_ok());
    assert!(check_transition(Some(ListingStatus::Draft), ListingStatus::Sold).is_err());
    assert!(check_transition(None, ListingStatus::Sold).is_err());
}

#[test]
fn full_lifecycle_keeps_every_stamp() {
    let t_published = Utc::now();
    let t_sold = t_published + Duration::days(2);
    let t_archived = t_published + Duration::days(5);

    let stamps = assign_lifecycle_stamps(
        None,
        ListingStatus::Active,
        LifecycleStamps::default(),
        t_published,
    );
    let stamps = assign_lifecycle_stamps(
        Some(ListingStatus::Active),
        ListingStatus::Sold,
        stamps,
        t_sold,
    );
    let stamps = assign_lifecycle_stamps(
        Some(ListingStatus::Sold),
        ListingStatus::Archived,
        stamps,
        t_archived,
    );

    assert_eq!(stamps.published_at, Some(t_published));
    assert_eq!(stamps.sold_at, Some(t_sold));
    assert_eq!(stamps.archived_at, Some(t_archived));
}

#[test]
fn collect_all_reports_every_violation() {
    let region_id = RegionId::new();
    let city_id = CityId::new();
    let other_region = RegionId::new();

    let violations = validate_listing(
        ListingStatus::Sold,
        Some(Decimal::new(-1, 0)),
        region_id,
        city_id,
        other_region,
    )
    .unwrap_err();

    let codes: Vec<_> = violations.as_slice().iter().map(|v| v.code()).collect();
    assert_eq!(codes.len(), 2);
    assert!(codes.contains(&"referential_mismatch"));
    assert!(codes.contains(&"negative_price"));
}
