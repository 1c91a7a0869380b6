/// Authorization module for the marketplace
///
/// Provides a fluent API for authorization checks in action code:
///
/// ```rust,ignore
/// use crate::common::auth::{Actor, Capability};
///
/// // In an action:
/// Actor::new(actor_id, is_admin)
///     .can(Capability::ManageListing)
///     .of_owner(listing_owner_id)
///     .check()?;
/// ```
///
/// This pattern keeps authorization logic in the action layer where it belongs,
/// not in the GraphQL resolver layer.
mod builder;
mod capability;
mod errors;

pub use builder::{Actor, CapabilityBuilder};
pub use capability::Capability;
pub use errors::AuthError;
