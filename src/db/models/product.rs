//! Product Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::collection::Collection;

pub type ProductId = Thing;

/// Merchandising state shown on the storefront card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductFeature {
    #[default]
    None,
    Hot,
    New,
    SoldOut,
}

/// Product model (stored shape)
///
/// Invariant: `images` is never empty for a stored product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    /// Discount in percent (e.g. 20 = 20% off)
    #[serde(default)]
    pub discount: Option<f64>,
    #[serde(default)]
    pub feature: ProductFeature,
    /// Record link to collection
    pub collection: Thing,
    /// Ordered image filenames, at least one
    pub images: Vec<String>,
    /// Ordered video filenames, at most three
    #[serde(default)]
    pub videos: Vec<String>,
    /// Unique URL-safe identifier derived from the name
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

/// Product read shape with the collection record populated inline
///
/// `collection` is optional because a collection delete does not cascade;
/// a dangling reference comes back absent rather than failing the read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub discount: Option<f64>,
    #[serde(default)]
    pub feature: ProductFeature,
    #[serde(default)]
    pub collection: Option<Collection>,
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub discount: Option<f64>,
    pub feature: Option<ProductFeature>,
    pub collection: Thing,
    pub images: Vec<String>,
    pub videos: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub original_price: Option<f64>,
    pub discount: Option<f64>,
    pub feature: Option<ProductFeature>,
    pub collection: Option<Thing>,
    /// Full replacement asset list (retained existing ∪ newly uploaded)
    pub images: Option<Vec<String>>,
    pub videos: Option<Vec<String>>,
}

/// Sort keys for product listing; default is insertion order ("Featured")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    Featured,
    PriceAsc,
    PriceDesc,
    Newest,
    NameAsc,
    NameDesc,
}

impl ProductSort {
    /// ORDER BY clause fragment for the stored field names
    pub fn order_clause(self) -> &'static str {
        match self {
            ProductSort::Featured => "createdAt ASC",
            ProductSort::PriceAsc => "price ASC",
            ProductSort::PriceDesc => "price DESC",
            ProductSort::Newest => "createdAt DESC",
            ProductSort::NameAsc => "name ASC",
            ProductSort::NameDesc => "name DESC",
        }
    }
}

/// Listing query surface (all filters optional, combinable)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    /// Collection id ("collection:xyz" or bare id)
    pub collection: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    /// Case-insensitive substring over name and description
    pub keyword: Option<String>,
    /// Keep only products whose review average is at least this
    pub min_rating: Option<f64>,
    pub sort: Option<ProductSort>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const MAX_PAGE_SIZE: u32 = 100;

impl ProductQuery {
    /// Effective page number (1-based)
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Effective page size, clamped to [1, MAX_PAGE_SIZE]
    pub fn limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

/// One page of a product listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<ProductView>,
    pub total: u64,
    pub page: u32,
    pub total_pages: u32,
}

impl ProductPage {
    pub fn empty(page: u32) -> Self {
        Self {
            products: Vec::new(),
            total: 0,
            page,
            total_pages: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_defaults_clamp() {
        let q = ProductQuery::default();
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), DEFAULT_PAGE_SIZE);

        let q = ProductQuery {
            page: Some(0),
            limit: Some(100_000),
            ..Default::default()
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn feature_wire_names() {
        assert_eq!(
            serde_json::to_string(&ProductFeature::SoldOut).unwrap(),
            "\"sold-out\""
        );
        assert_eq!(
            serde_json::from_str::<ProductFeature>("\"hot\"").unwrap(),
            ProductFeature::Hot
        );
    }
}
