//! Users API routes

use axum::Router;
use domain_users::{UserRepository, UserService, handlers};

/// Registration and token routes, open to anonymous callers
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    handlers::router(service)
}
