//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::{Extension, Request},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domains::auth::JwtService;
use crate::server::graphql::{create_schema, GraphQLContext};
use crate::server::middleware::{jwt_auth_middleware, AuthUser};
use crate::server::routes::{
    graphql_batch_handler, graphql_handler, graphql_playground, health_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub db_pool: PgPool,
    pub jwt_service: Arc<JwtService>,
}

/// Middleware to create GraphQLContext per-request
async fn create_graphql_context(
    Extension(state): Extension<AxumAppState>,
    mut request: Request,
    next: Next,
) -> Response {
    // Extract auth user from request extensions (populated by jwt_auth_middleware)
    let auth_user = request.extensions().get::<AuthUser>().cloned();

    // Create GraphQL context with shared state + per-request auth
    let context = GraphQLContext::new(state.db_pool.clone(), auth_user);

    // Add context to request extensions
    request.extensions_mut().insert(context);

    next.run(request).await
}

/// Build the Axum application router
pub fn build_app(pool: PgPool, jwt_secret: &str, jwt_issuer: String) -> Router {
    // Create GraphQL schema (singleton)
    let schema = Arc::new(create_schema());

    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(jwt_secret, jwt_issuer));

    // Create shared app state
    let app_state = AxumAppState {
        db_pool: pool,
        jwt_service: jwt_service.clone(),
    };

    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    // Rate limiting configuration: 10 requests per second per IP with a
    // burst of 20, IPs taken from X-Forwarded-For
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .use_headers()
            .finish()
            .expect("Rate limiter configuration is valid and should never fail"),
    );

    let rate_limit_layer = GovernorLayer {
        config: rate_limit_config,
    };

    // Clone jwt_service for middleware closure
    let jwt_service_for_middleware = jwt_service.clone();

    // Build router
    let mut router = Router::new()
        // GraphQL endpoints with rate limiting
        .route("/graphql", post(graphql_handler))
        .route("/graphql/batch", post(graphql_batch_handler));

    // GraphQL playground only in debug builds (development)
    #[cfg(debug_assertions)]
    {
        router = router.route("/graphql", get(graphql_playground));
    }

    router
        // Health check (no rate limit)
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(create_graphql_context)) // Create GraphQL context
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service_for_middleware.clone(), req, next)
        })) // JWT authentication
        .layer(rate_limit_layer)
        .layer(Extension(app_state)) // Add shared state (must be after middlewares that need it)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State (schema for GraphQL handlers)
        .with_state(schema)
}
