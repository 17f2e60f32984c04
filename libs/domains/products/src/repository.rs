use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{PageRequest, Product, SortOrder};

/// Repository trait for Product persistence
///
/// Implementations store records as given; invariants are checked by the
/// service before a record reaches here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product
    async fn create(&self, product: Product) -> ProductResult<Product>;

    /// Get a product by ID
    async fn find_by_id(&self, id: Uuid) -> ProductResult<Product>;

    /// Replace the stored name and price of an existing product
    async fn update(&self, product: Product) -> ProductResult<Product>;

    /// Delete a product by ID
    async fn delete(&self, id: Uuid) -> ProductResult<()>;

    /// One page of products ordered by `(name, id)`
    async fn find_all(&self, page: PageRequest) -> ProductResult<Vec<Product>>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        if products.contains_key(&product.id) {
            return Err(ProductError::Storage(format!(
                "product {} already exists",
                product.id
            )));
        }

        products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Product> {
        let products = self.products.read().await;
        products.get(&id).cloned().ok_or(ProductError::NotFound(id))
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let stored = products
            .get_mut(&product.id)
            .ok_or(ProductError::NotFound(product.id))?;
        stored.name = product.name;
        stored.price = product.price;

        tracing::info!(product_id = %stored.id, "Updated product");
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> ProductResult<()> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_none() {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Deleted product");
        Ok(())
    }

    async fn find_all(&self, page: PageRequest) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        // Byte-wise name comparison, same as the C collation on the name column.
        let mut result: Vec<Product> = products.values().cloned().collect();
        result.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        if page.sort == SortOrder::Desc {
            result.reverse();
        }

        Ok(result
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded(count: usize) -> InMemoryProductRepository {
        let repo = InMemoryProductRepository::new();
        for i in 1..=count {
            let product = Product::new(format!("Product {i}"), i as f64).unwrap();
            repo.create(product).await.unwrap();
        }
        repo
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryProductRepository::new();
        let product = Product::new("Desk", 120.0).unwrap();

        let created = repo.create(product.clone()).await.unwrap();
        assert_eq!(created, product);

        let found = repo.find_by_id(product.id).await.unwrap();
        assert_eq!(found, product);
    }

    #[tokio::test]
    async fn test_create_duplicate_id_fails() {
        let repo = InMemoryProductRepository::new();
        let product = Product::new("Desk", 120.0).unwrap();
        repo.create(product.clone()).await.unwrap();

        let err = repo.create(product).await.unwrap_err();
        assert!(matches!(err, ProductError::Storage(_)));
    }

    #[tokio::test]
    async fn test_find_missing_is_not_found() {
        let repo = InMemoryProductRepository::new();
        let id = Uuid::now_v7();

        assert_eq!(repo.find_by_id(id).await, Err(ProductError::NotFound(id)));
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let repo = InMemoryProductRepository::new();
        let product = Product::new("Desk", 120.0).unwrap();
        repo.create(product.clone()).await.unwrap();

        let mut changed = product.clone();
        changed.name = "Standing desk".into();
        changed.price = 300.0;
        changed.created_at = chrono::Utc::now() + chrono::Duration::days(1);

        let updated = repo.update(changed).await.unwrap();
        assert_eq!(updated.name, "Standing desk");
        assert_eq!(updated.price, 300.0);
        assert_eq!(updated.created_at, product.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = InMemoryProductRepository::new();
        let product = Product::new("Ghost", 1.0).unwrap();

        assert_eq!(
            repo.update(product.clone()).await,
            Err(ProductError::NotFound(product.id))
        );
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = InMemoryProductRepository::new();
        let product = Product::new("Chair", 40.0).unwrap();
        repo.create(product.clone()).await.unwrap();

        assert_eq!(repo.delete(product.id).await, Ok(()));
        assert_eq!(
            repo.delete(product.id).await,
            Err(ProductError::NotFound(product.id))
        );
    }

    #[tokio::test]
    async fn test_find_all_pages_by_name() {
        let repo = seeded(25).await;

        let page = |n| PageRequest::new(n, 10, SortOrder::Asc);

        let first = repo.find_all(page(1)).await.unwrap();
        assert_eq!(
            names(&first),
            [
                "Product 1",
                "Product 10",
                "Product 11",
                "Product 12",
                "Product 13",
                "Product 14",
                "Product 15",
                "Product 16",
                "Product 17",
                "Product 18",
            ]
        );

        let second = repo.find_all(page(2)).await.unwrap();
        assert_eq!(
            names(&second),
            [
                "Product 19",
                "Product 2",
                "Product 20",
                "Product 21",
                "Product 22",
                "Product 23",
                "Product 24",
                "Product 25",
                "Product 3",
                "Product 4",
            ]
        );

        let third = repo.find_all(page(3)).await.unwrap();
        assert_eq!(
            names(&third),
            ["Product 5", "Product 6", "Product 7", "Product 8", "Product 9"]
        );

        assert!(repo.find_all(page(4)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_all_desc_is_reverse() {
        let repo = seeded(25).await;

        let asc = repo
            .find_all(PageRequest::new(1, 100, SortOrder::Asc))
            .await
            .unwrap();
        let mut desc = repo
            .find_all(PageRequest::new(1, 100, SortOrder::Desc))
            .await
            .unwrap();
        desc.reverse();

        assert_eq!(asc, desc);
    }

    #[tokio::test]
    async fn test_find_all_ties_broken_by_id() {
        let repo = InMemoryProductRepository::new();
        for _ in 0..3 {
            repo.create(Product::new("Same", 1.0).unwrap()).await.unwrap();
        }

        let all = repo
            .find_all(PageRequest::new(1, 10, SortOrder::Asc))
            .await
            .unwrap();
        let ids: Vec<Uuid> = all.iter().map(|p| p.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[tokio::test]
    async fn test_page_zero_reads_first_page() {
        let repo = seeded(3).await;

        let zero = repo
            .find_all(PageRequest::new(0, 2, SortOrder::Asc))
            .await
            .unwrap();
        let one = repo
            .find_all(PageRequest::new(1, 2, SortOrder::Asc))
            .await
            .unwrap();
        assert_eq!(zero, one);
    }
}
