//! Listing status machine
//!
//! Pure decision logic - NO IO, only state transitions and the lifecycle
//! timestamps they trigger. The previous status and the current stamp values
//! are explicit inputs so the core is testable without a database.

use chrono::{DateTime, Utc};

use crate::domains::listings::error::ListingError;
use crate::domains::listings::models::listing::ListingStatus;

/// Allowed successor statuses. `Archived` is terminal.
fn successors(status: ListingStatus) -> &'static [ListingStatus] {
    match status {
        ListingStatus::Draft => &[ListingStatus::Active, ListingStatus::Archived],
        ListingStatus::Active => &[ListingStatus::Sold, ListingStatus::Archived],
        ListingStatus::Sold => &[ListingStatus::Archived],
        ListingStatus::Archived => &[],
    }
}

/// Check that a listing may move to `requested`.
///
/// `previous` is `None` for a listing that has never been persisted; such a
/// listing is treated as draft, so it may be created in draft or any direct
/// successor of draft. Re-writing the current status is a no-op transition
/// and always allowed.
pub fn check_transition(
    previous: Option<ListingStatus>,
    requested: ListingStatus,
) -> Result<(), ListingError> {
    let from = previous.unwrap_or(ListingStatus::Draft);
    if requested == from || successors(from).contains(&requested) {
        Ok(())
    } else {
        Err(ListingError::InvalidTransition {
            from,
            to: requested,
        })
    }
}

/// Lifecycle timestamps owned by the status machine.
///
/// Each stamp is set at most once, on first entry into its status, and never
/// overwritten afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LifecycleStamps {
    pub published_at: Option<DateTime<Utc>>,
    pub sold_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

/// Compute the stamps after a transition.
///
/// Entering active/sold/archived from a different status sets the matching
/// stamp only if it is currently unset. A no-op transition leaves every
/// stamp untouched (`updated_at` is the persistence layer's concern).
pub fn assign_lifecycle_stamps(
    previous: Option<ListingStatus>,
    next: ListingStatus,
    current: LifecycleStamps,
    now: DateTime<Utc>,
) -> LifecycleStamps {
    let mut stamps = current;
    if next == ListingStatus::Active && previous != Some(ListingStatus::Active) {
        stamps.published_at = stamps.published_at.or(Some(now));
    }
    if next == ListingStatus::Sold && previous != Some(ListingStatus::Sold) {
        stamps.sold_at = stamps.sold_at.or(Some(now));
    }
    if next == ListingStatus::Archived && previous != Some(ListingStatus::Archived) {
        stamps.archived_at = stamps.archived_at.or(Some(now));
    }
    stamps
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const ALL: [ListingStatus; 4] = [
        ListingStatus::Draft,
        ListingStatus::Active,
        ListingStatus::Sold,
        ListingStatus::Archived,
    ];

    fn allowed(from: ListingStatus, to: ListingStatus) -> bool {
        matches!(
            (from, to),
            (ListingStatus::Draft, ListingStatus::Active)
                | (ListingStatus::Draft, ListingStatus::Archived)
                | (ListingStatus::Active, ListingStatus::Sold)
                | (ListingStatus::Active, ListingStatus::Archived)
                | (ListingStatus::Sold, ListingStatus::Archived)
        )
    }

    #[test]
    fn test_every_pair_matches_transition_table() {
        for from in ALL {
            for to in ALL {
                let result = check_transition(Some(from), to);
                if from == to || allowed(from, to) {
                    assert!(result.is_ok(), "{from} -> {to} should be allowed");
                } else {
                    assert!(
                        matches!(
                            result,
                            Err(ListingError::InvalidTransition { from: f, to: t })
                                if f == from && t == to
                        ),
                        "{from} -> {to} should be rejected"
                    );
                }
            }
        }
    }

    #[test]
    fn test_self_transition_always_allowed() {
        for status in ALL {
            assert!(check_transition(Some(status), status).is_ok());
        }
    }

    #[test]
    fn test_archived_is_terminal() {
        for to in [ListingStatus::Draft, ListingStatus::Active, ListingStatus::Sold] {
            assert!(check_transition(Some(ListingStatus::Archived), to).is_err());
        }
    }

    #[test]
    fn test_new_listing_statuses() {
        // A brand-new listing is implicitly draft: draft itself and direct
        // successors of draft are creatable, sold is not.
        assert!(check_transition(None, ListingStatus::Draft).is_ok());
        assert!(check_transition(None, ListingStatus::Active).is_ok());
        assert!(check_transition(None, ListingStatus::Archived).is_ok());
        assert!(matches!(
            check_transition(None, ListingStatus::Sold),
            Err(ListingError::InvalidTransition {
                from: ListingStatus::Draft,
                to: ListingStatus::Sold,
            })
        ));
    }

    #[test]
    fn test_first_activation_sets_published_at() {
        let now = Utc::now();
        let stamps = assign_lifecycle_stamps(
            Some(ListingStatus::Draft),
            ListingStatus::Active,
            LifecycleStamps::default(),
            now,
        );
        assert_eq!(stamps.published_at, Some(now));
        assert_eq!(stamps.sold_at, None);
        assert_eq!(stamps.archived_at, None);
    }

    #[test]
    fn test_published_at_is_sticky() {
        let first = Utc::now();
        let stamps = assign_lifecycle_stamps(
            Some(ListingStatus::Draft),
            ListingStatus::Active,
            LifecycleStamps::default(),
            first,
        );

        // A later no-op re-entry into active must not move the stamp.
        let later = first + Duration::hours(3);
        let stamps = assign_lifecycle_stamps(
            Some(ListingStatus::Active),
            ListingStatus::Active,
            stamps,
            later,
        );
        assert_eq!(stamps.published_at, Some(first));
    }

    #[test]
    fn test_self_transition_changes_no_stamps() {
        let now = Utc::now();
        for status in ALL {
            let current = LifecycleStamps {
                published_at: Some(now),
                sold_at: Some(now),
                archived_at: Some(now),
            };
            let stamps =
                assign_lifecycle_stamps(Some(status), status, current, now + Duration::days(1));
            assert_eq!(stamps, current);
        }
    }

    #[test]
    fn test_full_lifecycle_stamps() {
        let t0 = Utc::now();
        let t1 = t0 + Duration::hours(1);
        let t2 = t0 + Duration::hours(2);

        let stamps = assign_lifecycle_stamps(
            Some(ListingStatus::Draft),
            ListingStatus::Active,
            LifecycleStamps::default(),
            t0,
        );
        let stamps = assign_lifecycle_stamps(
            Some(ListingStatus::Active),
            ListingStatus::Sold,
            stamps,
            t1,
        );
        let stamps = assign_lifecycle_stamps(
            Some(ListingStatus::Sold),
            ListingStatus::Archived,
            stamps,
            t2,
        );

        assert_eq!(stamps.published_at, Some(t0));
        assert_eq!(stamps.sold_at, Some(t1));
        assert_eq!(stamps.archived_at, Some(t2));
    }

    #[test]
    fn test_creation_in_active_stamps_published_at() {
        let now = Utc::now();
        let stamps =
            assign_lifecycle_stamps(None, ListingStatus::Active, LifecycleStamps::default(), now);
        assert_eq!(stamps.published_at, Some(now));
    }
}
