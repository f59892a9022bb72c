pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod schemas;
pub mod services;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::TokenVerifier;

/// Shared application state: the connection pool and the token verifier
/// (which owns the JWKS cache).
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            verifier: Arc::new(TokenVerifier::new(&config::config().auth)),
        }
    }
}

/// Assemble the full application router. Everything except the health check
/// and the public email-list signup sits behind bearer authentication.
pub fn app(state: AppState) -> Router {
    let public = Router::new()
        .merge(handlers::health::router())
        .merge(handlers::email_list::public_router());

    let protected = Router::new()
        .merge(handlers::users::router())
        .merge(handlers::groups::router())
        .merge(handlers::workspaces::router())
        .merge(handlers::programs::router())
        .merge(handlers::events::router())
        .merge(handlers::tasks::router())
        .merge(handlers::troops::router())
        .merge(handlers::tags::router())
        .merge(handlers::comments::router())
        .merge(handlers::likes::router())
        .merge(handlers::email_list::router())
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    let server = &config::config().server;
    if !server.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = server
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
