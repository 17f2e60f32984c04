use axum_helpers::JwtAuth;
use std::sync::Arc;
use tokio::task::{JoinError, spawn_blocking};

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, User};
use crate::repository::UserRepository;

/// Service layer for registration and token issuance
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    jwt: Arc<JwtAuth>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, jwt: Arc<JwtAuth>) -> Self {
        Self {
            repository: Arc::new(repository),
            jwt,
        }
    }

    /// Register a new user. Hashing runs on the blocking pool.
    pub async fn register(&self, input: CreateUser) -> UserResult<User> {
        let CreateUser {
            name,
            email,
            password,
        } = input;
        let user = spawn_blocking(move || User::new(name, email, &password))
            .await
            .map_err(join_error)??;

        self.repository.create(user).await
    }

    /// Exchange credentials for an access token valid for the configured TTL.
    pub async fn generate_token(&self, email: &str, password: &str) -> UserResult<String> {
        let user = self.repository.find_by_email(email).await?;

        let candidate = user.clone();
        let password = password.to_owned();
        let matched = spawn_blocking(move || candidate.verify_password(&password))
            .await
            .map_err(join_error)?;

        if !matched {
            tracing::info!(user_id = %user.id, "Token request with wrong password");
            return Err(UserError::InvalidCredentials);
        }

        let token = self.jwt.issue(user.id, self.jwt.ttl_seconds())?;

        tracing::info!(user_id = %user.id, "Issued access token");
        Ok(token)
    }
}

fn join_error(err: JoinError) -> UserError {
    UserError::PasswordHash(err.to_string())
}
