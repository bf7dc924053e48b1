//! Static in-memory catalog

use std::collections::HashSet;

use serde::Deserialize;
use tracing::info;

use crate::{
    error::{CatalogError, CatalogResult},
    models::{Category, Product},
};

const BUNDLED_CATALOG: &str = include_str!("../data/catalog.json");

/// Read-only catalog of categories and products, in source order
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<Product>,
}

impl Catalog {
    /// Load the catalog shipped with the crate
    pub fn bundled() -> CatalogResult<Self> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Parse and validate catalog data
    pub fn from_json(raw: &str) -> CatalogResult<Self> {
        let catalog: Catalog = serde_json::from_str(raw)?;
        catalog.validate()?;

        info!(
            "Catalog loaded: {} categories, {} products",
            catalog.categories.len(),
            catalog.products.len()
        );
        Ok(catalog)
    }

    fn validate(&self) -> CatalogResult<()> {
        ensure_unique("category", self.categories.iter().map(|c| c.id.as_str()))?;
        ensure_unique("product", self.products.iter().map(|p| p.id.as_str()))?;

        for product in &self.products {
            let reason = if product.price.is_nan() || product.price < 0.0 {
                Some("price must be non-negative")
            } else if !(0.0..=5.0).contains(&product.seller.rating) {
                Some("seller rating must be between 0 and 5")
            } else {
                None
            };

            if let Some(reason) = reason {
                return Err(CatalogError::InvalidProduct {
                    id: product.id.clone(),
                    reason,
                });
            }
        }

        Ok(())
    }

    /// All categories
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Find a category by id
    pub fn find_category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// Products, optionally restricted to one category id
    pub fn products(&self, category: Option<&str>) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| category.is_none_or(|id| product.category == id))
            .collect()
    }

    /// Find a product by id
    pub fn find_product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }
}

fn ensure_unique<'a>(kind: &'static str, ids: impl Iterator<Item = &'a str>) -> CatalogResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
