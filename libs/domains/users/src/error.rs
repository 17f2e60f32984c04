use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, TokenError};
use strum::IntoStaticStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum UserError {
    #[error("name is required")]
    NameRequired,

    #[error("email is required")]
    EmailRequired,

    #[error("password is required")]
    PasswordRequired,

    /// Carries the id or email that was looked up.
    #[error("User {0} not found")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    /// Stable snake_case identifier, e.g. `email_required`.
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        UserError::Storage(err.to_string())
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NameRequired | UserError::EmailRequired | UserError::PasswordRequired => {
                AppError::Validation {
                    kind: err.kind(),
                    message: err.to_string(),
                }
            }
            UserError::NotFound(_) => AppError::NotFound(err.to_string()),
            UserError::InvalidCredentials => {
                AppError::Unauthorized("Invalid email or password".to_string())
            }
            UserError::PasswordHash(msg) | UserError::Storage(msg) => {
                AppError::InternalServerError(msg)
            }
            UserError::Token(e) => AppError::InternalServerError(e.to_string()),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
