use thiserror::Error;

/// Authorization errors for the marketplace platform
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Admin access required")]
    AdminRequired,

    #[error("Invalid or expired token")]
    InvalidToken,
}
