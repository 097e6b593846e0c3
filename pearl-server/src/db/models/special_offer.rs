//! Special Offer Model
//!
//! Product bundles with a discounted price.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Special offer model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialOffer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: String,
    /// Derived from title on every write
    pub slug: String,
    pub total_price: Option<f64>,
    pub discount: Option<f64>,
    pub discounted_price: Option<f64>,
    pub subtitle: Option<String>,
    pub excerpt: Option<String>,
    /// Record links to bundled products
    #[serde(default)]
    pub products: Vec<RecordId>,
    /// Small cover URL
    pub image: Option<String>,
    /// Accent color (hex)
    pub color: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialOfferCreate {
    pub title: String,
    pub total_price: Option<f64>,
    pub discount: Option<f64>,
    pub discounted_price: Option<f64>,
    pub subtitle: Option<String>,
    pub excerpt: Option<String>,
    /// Product record ids ("product:xyz" or bare ids)
    #[serde(default)]
    pub products: Vec<String>,
    pub image: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialOfferUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// Product record ids ("product:xyz" or bare ids)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Special offer response with string record ids
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialOfferResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub total_price: Option<f64>,
    pub discount: Option<f64>,
    pub discounted_price: Option<f64>,
    pub subtitle: Option<String>,
    pub excerpt: Option<String>,
    pub products: Vec<String>,
    pub image: Option<String>,
    pub color: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<SpecialOffer> for SpecialOfferResponse {
    fn from(o: SpecialOffer) -> Self {
        Self {
            id: o.id.map(|id| id.to_string()).unwrap_or_default(),
            title: o.title,
            slug: o.slug,
            total_price: o.total_price,
            discount: o.discount,
            discounted_price: o.discounted_price,
            subtitle: o.subtitle,
            excerpt: o.excerpt,
            products: o.products.into_iter().map(|id| id.to_string()).collect(),
            image: o.image,
            color: o.color,
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}
