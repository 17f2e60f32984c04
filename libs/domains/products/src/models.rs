use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::{Uuid, Variant};
use validator::Validate;

use crate::error::{ProductError, ProductResult};

/// Product record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Time-ordered identifier, assigned on creation
    pub id: Uuid,
    pub name: String,
    /// Strictly positive price
    #[schema(example = 9.99)]
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Build a new product with a fresh id and creation time.
    pub fn new(name: impl Into<String>, price: f64) -> ProductResult<Self> {
        let product = Self {
            id: Uuid::now_v7(),
            name: name.into(),
            price,
            created_at: Utc::now(),
        };
        product.validate()?;
        Ok(product)
    }

    /// Check record invariants. The first violated rule wins.
    pub fn validate(&self) -> ProductResult<()> {
        if self.id.is_nil() {
            return Err(ProductError::IdRequired);
        }
        if self.id.get_variant() != Variant::RFC4122 || self.id.get_version().is_none() {
            return Err(ProductError::InvalidId);
        }
        if self.name.is_empty() {
            return Err(ProductError::NameRequired);
        }
        if self.price == 0.0 {
            return Err(ProductError::PriceRequired);
        }
        if self.price < 0.0 || !self.price.is_finite() {
            return Err(ProductError::InvalidPrice);
        }
        Ok(())
    }

    /// Full replacement of the mutable fields. Identity and creation time stay.
    pub fn replaced_with(&self, input: UpdateProduct) -> Self {
        Self {
            id: self.id,
            name: input.name,
            price: input.price,
            created_at: self.created_at,
        }
    }
}

/// DTO for creating a product. Missing fields decode to their zero value
/// and are rejected by [`Product::validate`].
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateProduct {
    #[serde(default)]
    #[schema(example = "Keyboard")]
    pub name: String,
    #[serde(default)]
    #[schema(example = 49.5)]
    pub price: f64,
}

/// DTO for replacing a product
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateProduct {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
}

/// Listing direction over `(name, id)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

/// Query parameters for listing products
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProductsQuery {
    /// 1-based page number
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    #[param(minimum = 1)]
    pub page: u64,

    /// Page size
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    #[param(minimum = 1, maximum = 100)]
    pub limit: u64,

    /// Sort direction by name, ties broken by id
    #[serde(default)]
    pub sort: SortOrder,
}

impl Default for ListProductsQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            sort: SortOrder::default(),
        }
    }
}

/// Page window handed to repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
    pub sort: SortOrder,
}

impl PageRequest {
    pub fn new(page: u64, limit: u64, sort: SortOrder) -> Self {
        Self { page, limit, sort }
    }

    /// Rows to skip. Page 0 reads like page 1.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl From<ListProductsQuery> for PageRequest {
    fn from(query: ListProductsQuery) -> Self {
        Self::new(query.page, query.limit, query.sort)
    }
}
