use super::{AuthError, Capability};
use crate::common::entity_ids::MemberId;

/// Entry point for authorization checks
///
/// Usage:
/// ```rust,ignore
/// Actor::new(actor_id, is_admin)
///     .can(Capability::ManageListing)
///     .of_owner(listing.owner_id)
///     .check()?;
/// ```
pub struct Actor {
    actor_id: MemberId,
    is_admin: bool,
}

impl Actor {
    /// Create a new actor for authorization checks
    ///
    /// # Arguments
    /// * `actor_id` - The member ID of the actor
    /// * `is_admin` - Admin flag from the JWT (already validated during authentication)
    pub fn new(actor_id: MemberId, is_admin: bool) -> Self {
        Self { actor_id, is_admin }
    }

    /// Specify what capability the actor needs
    pub fn can(self, capability: Capability) -> CapabilityBuilder {
        CapabilityBuilder {
            actor_id: self.actor_id,
            is_admin: self.is_admin,
            capability,
            owner_id: None,
        }
    }
}

/// Builder after specifying capability
pub struct CapabilityBuilder {
    actor_id: MemberId,
    is_admin: bool,
    capability: Capability,
    owner_id: Option<MemberId>,
}

impl CapabilityBuilder {
    /// Scope the check to the owner of the target resource.
    ///
    /// Without an owner, only admins pass the check.
    pub fn of_owner(mut self, owner_id: MemberId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    /// Perform the authorization check
    ///
    /// The `is_admin` flag comes from the JWT token, which was validated during
    /// authentication by the surrounding accounts service. We trust this flag since:
    /// 1. JWT tokens are cryptographically signed and verified
    /// 2. Tokens expire after 24 hours, limiting the window for stale permissions
    pub fn check(self) -> Result<(), AuthError> {
        if self.is_admin {
            return Ok(());
        }

        if self.capability.allows_owner() {
            if let Some(owner_id) = self.owner_id {
                if owner_id == self.actor_id {
                    return Ok(());
                }
                return Err(AuthError::PermissionDenied(
                    "only the owner or an admin may modify this record".to_string(),
                ));
            }
        }

        Err(AuthError::AdminRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_passes_without_ownership() {
        let actor_id = MemberId::new();
        let result = Actor::new(actor_id, true)
            .can(Capability::ManageListing)
            .of_owner(MemberId::new())
            .check();

        assert!(result.is_ok());
    }

    #[test]
    fn test_owner_passes() {
        let actor_id = MemberId::new();
        let result = Actor::new(actor_id, false)
            .can(Capability::ManageListing)
            .of_owner(actor_id)
            .check();

        assert!(result.is_ok());
    }

    #[test]
    fn test_non_owner_rejected() {
        let actor_id = MemberId::new();
        let result = Actor::new(actor_id, false)
            .can(Capability::ManageListing)
            .of_owner(MemberId::new())
            .check();

        assert!(matches!(result, Err(AuthError::PermissionDenied(_))));
    }

    #[test]
    fn test_no_owner_requires_admin() {
        let actor_id = MemberId::new();
        let result = Actor::new(actor_id, false)
            .can(Capability::ManageListingImages)
            .check();

        assert!(matches!(result, Err(AuthError::AdminRequired)));
    }
}
