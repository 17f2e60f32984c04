use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};

/// Registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Unique, used to authenticate
    pub email: String,
    /// Argon2 PHC string (never exposed in API responses)
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    /// Validate the inputs and hash the password.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: &str,
    ) -> UserResult<Self> {
        let name = name.into();
        let email = email.into();

        if name.is_empty() {
            return Err(UserError::NameRequired);
        }
        if email.is_empty() {
            return Err(UserError::EmailRequired);
        }
        if password.is_empty() {
            return Err(UserError::PasswordRequired);
        }

        Ok(Self {
            id: Uuid::now_v7(),
            name,
            email,
            password_hash: hash_password(password)?,
        })
    }

    /// Check a plaintext password against the stored hash.
    pub fn verify_password(&self, password: &str) -> bool {
        let parsed = match PasswordHash::new(&self.password_hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(user_id = %self.id, "Stored password hash is unreadable: {}", e);
                return false;
            }
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

/// Registration body. Missing fields decode as empty and fail validation
/// in [`User::new`].
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateUser {
    #[serde(default)]
    #[schema(example = "Ada")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// User response DTO (without password_hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Credentials exchanged for an access token
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct TokenRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
}
