use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use strum::IntoStaticStr;
use thiserror::Error;
use uuid::Uuid;

/// Failures of the products domain.
///
/// The first five variants are record invariants and keep their wording
/// stable, clients match on them.
#[derive(Debug, Clone, PartialEq, Error, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ProductError {
    #[error("id is required")]
    IdRequired,

    #[error("invalid id")]
    InvalidId,

    #[error("name is required")]
    NameRequired,

    #[error("price is required")]
    PriceRequired,

    #[error("invalid price")]
    InvalidPrice,

    #[error("Product {0} not found")]
    NotFound(Uuid),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    /// Stable snake_case identifier, e.g. `price_required`.
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

impl From<sea_orm::DbErr> for ProductError {
    fn from(err: sea_orm::DbErr) -> Self {
        ProductError::Storage(err.to_string())
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound(err.to_string()),
            ProductError::Storage(msg) => AppError::InternalServerError(msg),
            validation => AppError::Validation {
                kind: validation.kind(),
                message: validation.to_string(),
            },
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
