use std::sync::Arc;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{CreateProduct, PageRequest, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Service layer for Product business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a product. Id and creation time are assigned here.
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input.name, input.price)?;
        self.repository.create(product).await
    }

    /// Get a product by ID
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository.find_by_id(id).await
    }

    /// List one page of products
    pub async fn list_products(&self, page: PageRequest) -> ProductResult<Vec<Product>> {
        self.repository.find_all(page).await
    }

    /// Replace name and price. A missing product wins over invalid input.
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let existing = self.repository.find_by_id(id).await?;

        let product = existing.replaced_with(input);
        product.validate()?;

        self.repository.update(product).await
    }

    /// Delete a product
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        self.repository.delete(id).await
    }
}
