use thiserror::Error;

use crate::common::AuthError;
use crate::domains::listings::models::listing::ListingStatus;
use crate::domains::listings::rules::RuleViolations;

/// Classified errors for listing operations.
///
/// Every validation failure is detected before anything is persisted; a
/// rejected write rolls its transaction back and returns one of these.
#[derive(Error, Debug)]
pub enum ListingError {
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: ListingStatus,
        to: ListingStatus,
    },

    /// Aggregated business-rule violations; all applicable rules are
    /// reported in one failure.
    #[error("{0}")]
    Validation(RuleViolations),

    #[error("a listing may only have one primary image")]
    PrimaryImageConflict,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Database(sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ListingError {
    /// Stable machine-readable code, surfaced to clients in error extensions
    pub fn code(&self) -> &'static str {
        match self {
            ListingError::InvalidTransition { .. } => "invalid_transition",
            ListingError::Validation(_) => "validation_failed",
            ListingError::PrimaryImageConflict => "primary_image_conflict",
            ListingError::NotFound(_) => "not_found",
            ListingError::Auth(AuthError::AuthenticationRequired) => "authentication_required",
            ListingError::Auth(_) => "permission_denied",
            ListingError::Database(_) | ListingError::Internal(_) => "internal_error",
        }
    }
}

impl From<sqlx::Error> for ListingError {
    fn from(err: sqlx::Error) -> Self {
        // The partial unique index is the backstop for racing primary-image
        // writers; surface it as the classified conflict, not a DB error.
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.constraint() == Some("unique_primary_listing_image") {
                return ListingError::PrimaryImageConflict;
            }
        }
        ListingError::Database(err)
    }
}
