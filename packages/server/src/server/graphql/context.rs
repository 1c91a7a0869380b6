use juniper::{FieldError, FieldResult};
use sqlx::PgPool;

use crate::server::middleware::AuthUser;

/// GraphQL request context
///
/// Contains shared resources available to all resolvers plus the per-request
/// authenticated caller (if any).
#[derive(Clone)]
pub struct GraphQLContext {
    pub db_pool: PgPool,
    pub auth_user: Option<AuthUser>,
}

impl juniper::Context for GraphQLContext {}

impl GraphQLContext {
    pub fn new(db_pool: PgPool, auth_user: Option<AuthUser>) -> Self {
        Self { db_pool, auth_user }
    }

    /// The authenticated caller, or an authentication error
    pub fn require_auth(&self) -> FieldResult<&AuthUser> {
        self.auth_user
            .as_ref()
            .ok_or_else(|| FieldError::new("Authentication required", juniper::Value::null()))
    }

    /// The authenticated caller if they are an admin
    pub fn require_admin(&self) -> FieldResult<&AuthUser> {
        let user = self.require_auth()?;
        if !user.is_admin {
            return Err(FieldError::new(
                "Admin access required",
                juniper::Value::null(),
            ));
        }
        Ok(user)
    }
}
