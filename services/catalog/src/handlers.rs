//! Read-only category and product handlers

use std::sync::Arc;

use common::{Reply, ServiceError, ServiceResult};
use tracing::debug;

use crate::{
    models::{
        CategoryListResponse, CategoryResponse, ProductListResponse, ProductQuery,
        ProductResponse,
    },
    repositories::Catalog,
};

pub const CATEGORY_NOT_FOUND: &str = "category not found";
pub const PRODUCT_NOT_FOUND: &str = "product not found";

/// Catalog handlers over a shared, immutable catalog
#[derive(Debug, Clone)]
pub struct CatalogService {
    catalog: Arc<Catalog>,
}

impl CatalogService {
    /// Create a new catalog service
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Every category, in source order
    pub fn list_categories(&self) -> Reply {
        Reply::ok(&CategoryListResponse {
            categories: self.catalog.categories().to_vec(),
        })
    }

    /// One category by id
    pub fn get_category(&self, id: &str) -> ServiceResult<Reply> {
        let category = self
            .catalog
            .find_category(id)
            .ok_or(ServiceError::NotFound(CATEGORY_NOT_FOUND))?;

        Ok(Reply::ok(&CategoryResponse {
            category: category.clone(),
        }))
    }

    /// Products, filtered by exact category id when one is given
    pub fn list_products(&self, query: &ProductQuery) -> Reply {
        let products: Vec<_> = self
            .catalog
            .products(query.category.as_deref())
            .into_iter()
            .cloned()
            .collect();
        debug!(
            "Listing {} products (category filter: {:?})",
            products.len(),
            query.category
        );

        Reply::ok(&ProductListResponse { products })
    }

    /// One product by id
    pub fn get_product(&self, id: &str) -> ServiceResult<Reply> {
        let product = self
            .catalog
            .find_product(id)
            .ok_or(ServiceError::NotFound(PRODUCT_NOT_FOUND))?;

        Ok(Reply::ok(&ProductResponse {
            product: product.clone(),
        }))
    }
}
