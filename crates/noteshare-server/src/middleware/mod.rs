//! Middleware stack: request IDs, tracing, and CORS.

pub mod request_id;

use axum::Router;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{ConfigError, ServerConfig};

/// Wrap `router` with the full middleware stack.
///
/// Outermost first: request ID assignment, HTTP tracing, CORS, request ID
/// propagation.
pub fn apply(router: Router, config: &ServerConfig) -> Result<Router, ConfigError> {
    let cors = build_cors_layer(&config.cors_allowed_origins)?;

    Ok(router
        .layer(request_id::propagate_request_id_layer())
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(request_id::request_span))
        .layer(request_id::set_request_id_layer()))
}

/// Build CORS layer from configuration.
pub fn build_cors_layer(allowed_origins: &str) -> Result<CorsLayer, ConfigError> {
    let origin = if allowed_origins.trim() == "*" {
        AllowOrigin::from(Any)
    } else {
        // Parse comma-separated origins
        let origins = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<HeaderValue>()
                    .map_err(|e| ConfigError::InvalidValue {
                        name: "CORS_ALLOWED_ORIGINS".to_string(),
                        reason: format!("{s}: {e}"),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}
