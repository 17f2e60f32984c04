use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user
    async fn create(&self, user: User) -> UserResult<User>;

    /// Get a user by ID
    async fn find_by_id(&self, id: Uuid) -> UserResult<User>;

    /// Get a user by email
    async fn find_by_email(&self, email: &str) -> UserResult<User>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        // Mirrors the unique index on users.email
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::Storage(format!(
                "email {} is already registered",
                user.email
            )));
        }

        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<User> {
        let users = self.users.read().await;
        users
            .get(&id)
            .cloned()
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    async fn find_by_email(&self, email: &str) -> UserResult<User> {
        let users = self.users.read().await;
        users
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| UserError::NotFound(email.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User {
            id: Uuid::now_v7(),
            name: "Test".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(user("ada@example.com")).await.unwrap();

        assert_eq!(repo.find_by_id(created.id).await.unwrap(), created);
        assert_eq!(
            repo.find_by_email("ada@example.com").await.unwrap(),
            created
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_is_storage_error() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("ada@example.com")).await.unwrap();

        let err = repo.create(user("ada@example.com")).await.unwrap_err();
        assert!(matches!(err, UserError::Storage(_)));
    }

    #[tokio::test]
    async fn test_missing_user() {
        let repo = InMemoryUserRepository::new();
        let id = Uuid::now_v7();

        assert_eq!(
            repo.find_by_id(id).await,
            Err(UserError::NotFound(id.to_string()))
        );
        assert_eq!(
            repo.find_by_email("nobody@example.com").await,
            Err(UserError::NotFound("nobody@example.com".into()))
        );
    }
}
