use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    entity,
    error::{UserError, UserResult},
    models::User,
    repository::UserRepository,
};

/// PostgreSQL-backed UserRepository
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let active_model: entity::ActiveModel = user.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(user_id = %model.id, "Created user");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<User> {
        entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into)
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    async fn find_by_email(&self, email: &str) -> UserResult<User> {
        entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(Into::into)
            .ok_or_else(|| UserError::NotFound(email.to_string()))
    }
}
