//! Products API routes

use axum::{Router, middleware};
use axum_helpers::{JwtAuth, jwt_auth_middleware};
use domain_products::{ProductRepository, ProductService, handlers};
use std::sync::Arc;

/// Products router behind the bearer-token gate
pub fn router<R: ProductRepository + 'static>(
    service: ProductService<R>,
    jwt: Arc<JwtAuth>,
) -> Router {
    handlers::router(service).layer(middleware::from_fn_with_state(
        jwt,
        jwt_auth_middleware::<JwtAuth>,
    ))
}
