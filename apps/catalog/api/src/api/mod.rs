//! API routes module

pub mod health;
pub mod products;
pub mod users;

use axum::Router;
use axum_helpers::JwtAuth;
use domain_products::{PgProductRepository, ProductRepository, ProductService};
use domain_users::{PgUserRepository, UserRepository, UserService};
use std::sync::Arc;

use crate::state::AppState;

/// Create all API routes, backed by PostgreSQL
pub fn routes(state: &AppState) -> Router {
    compose(
        ProductService::new(PgProductRepository::new(state.db.clone())),
        UserService::new(PgUserRepository::new(state.db.clone()), state.jwt.clone()),
        state.jwt.clone(),
    )
}

/// Mount the domain routers. Products require a bearer token, users do not.
pub fn compose<P, U>(
    products: ProductService<P>,
    users: UserService<U>,
    jwt: Arc<JwtAuth>,
) -> Router
where
    P: ProductRepository + 'static,
    U: UserRepository + 'static,
{
    Router::new()
        .nest("/products", products::router(products, jwt))
        .nest("/users", users::router(users))
}
