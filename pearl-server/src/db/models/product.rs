//! Product Model
//!
//! Digital products (3D assets). Media fields hold URLs managed by the
//! upload storage outside this service; `files` is the canonical
//! list of downloadable file references copied into orders at
//! purchase time.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Downloadable file reference on a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductFile {
    pub name: Option<String>,
    pub url: String,
}

/// Product model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: String,
    /// Derived from title on every write
    pub slug: String,
    /// Small cover URL
    pub image: Option<String>,
    /// Big cover URL
    pub big_image: Option<String>,
    /// Preview video URL
    pub preview: Option<String>,
    pub price: Option<f64>,
    /// Record link to category
    pub category: Option<RecordId>,
    /// Rich-text content (opaque editor JSON)
    pub content: Option<serde_json::Value>,
    /// Gallery image URLs
    #[serde(default)]
    pub gallery: Vec<String>,
    /// Downloadable files (name + URL)
    #[serde(default)]
    pub files: Vec<ProductFile>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub title: String,
    pub image: Option<String>,
    pub big_image: Option<String>,
    pub preview: Option<String>,
    pub price: Option<f64>,
    /// Category record id ("category:xyz" or bare id)
    pub category: Option<String>,
    pub content: Option<serde_json::Value>,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default)]
    pub files: Vec<ProductFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub big_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Category record id ("category:xyz" or bare id)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<ProductFile>>,
}

/// Product response with string record ids
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub image: Option<String>,
    pub big_image: Option<String>,
    pub preview: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub content: Option<serde_json::Value>,
    pub gallery: Vec<String>,
    pub files: Vec<ProductFile>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id.map(|id| id.to_string()).unwrap_or_default(),
            title: p.title,
            slug: p.slug,
            image: p.image,
            big_image: p.big_image,
            preview: p.preview,
            price: p.price,
            category: p.category.map(|id| id.to_string()),
            content: p.content,
            gallery: p.gallery,
            files: p.files,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
