use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    model::{Category, Product},
    pricing::product_discount,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ProductResponse {
    pub id: i32,
    pub category_id: Option<i32>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: i64,
    pub compare_price: i64,
    /// Percentage off `compare_price`.
    pub discount: f64,
    pub thumbnail: Option<String>,
    pub images: Vec<String>,
    pub status: String,
    pub position: i32,
    pub featured: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub deleted_at: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        ProductResponse {
            id: value.product_id,
            category_id: value.category_id,
            discount: product_discount(value.price, value.compare_price),
            name: value.name,
            slug: value.slug,
            description: value.description,
            price: value.price,
            compare_price: value.compare_price,
            thumbnail: value.thumbnail,
            images: value.images,
            status: value.status,
            position: value.position,
            featured: value.featured,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
            deleted_at: value.deleted_at.map(|dt| dt.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub status: String,
    pub position: i32,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub deleted_at: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(value: Category) -> Self {
        CategoryResponse {
            id: value.category_id,
            name: value.name,
            slug: value.slug,
            description: value.description,
            thumbnail: value.thumbnail,
            status: value.status,
            position: value.position,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
            deleted_at: value.deleted_at.map(|dt| dt.to_string()),
        }
    }
}
