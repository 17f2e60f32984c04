use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter,
    QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{PageRequest, Product, SortOrder},
    repository::ProductRepository,
};

/// PostgreSQL-backed ProductRepository. Every write is a single statement.
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, product: Product) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = product.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = %model.id, "Created product");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Product> {
        entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into)
            .ok_or(ProductError::NotFound(id))
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let updated = entity::Entity::update_many()
            .col_expr(entity::Column::Name, Expr::value(product.name))
            .col_expr(entity::Column::Price, Expr::value(product.price))
            .filter(entity::Column::Id.eq(product.id))
            .exec_with_returning(&self.db)
            .await?;

        let model = updated
            .into_iter()
            .next()
            .ok_or(ProductError::NotFound(product.id))?;

        tracing::info!(product_id = %model.id, "Updated product");
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> ProductResult<()> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Deleted product");
        Ok(())
    }

    async fn find_all(&self, page: PageRequest) -> ProductResult<Vec<Product>> {
        let order = match page.sort {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let models = entity::Entity::find()
            .order_by(entity::Column::Name, order.clone())
            .order_by(entity::Column::Id, order)
            .offset(page.offset())
            .limit(page.limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
