//! Catalog models for categories and products

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub count: u32,
}

/// Who is selling a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub name: String,
    /// 0 to 5
    pub rating: f32,
    pub verified: bool,
}

/// Listing metadata shown on the product detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdDetails {
    pub condition: String,
    pub quantity: f64,
    pub unit: String,
    pub material: String,
    pub packaging: Option<String>,
    pub pickup_available: bool,
    pub delivery_available: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Product listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub location: String,
    /// Id of a [`Category`]; not checked against the category list
    pub category: String,
    pub description: String,
    pub images: Vec<String>,
    pub seller: Seller,
    pub created_at: DateTime<Utc>,
    pub ad_details: AdDetails,
}

/// Query parameters for product listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    /// Filter by exact category id
    pub category: Option<String>,
}

/// Response for category listing
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub categories: Vec<Category>,
}

/// Response for a single category
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub category: Category,
}

/// Response for product listing
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
}

/// Response for a single product
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductResponse {
    pub product: Product,
}
