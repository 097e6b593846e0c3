//! Idea Model
//!
//! Editorial content (inspiration posts) surfaced on the storefront.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Idea model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Idea {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: String,
    /// Derived from title on every write
    pub slug: String,
    /// Cover image URL
    pub image: Option<String>,
    pub excerpt: Option<String>,
    /// Rich-text content (opaque editor JSON)
    pub content: Option<serde_json::Value>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeaCreate {
    pub title: String,
    pub image: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<serde_json::Value>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeaUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
}

/// Idea response with string record id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeaResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub image: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<serde_json::Value>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<Idea> for IdeaResponse {
    fn from(i: Idea) -> Self {
        Self {
            id: i.id.map(|id| id.to_string()).unwrap_or_default(),
            title: i.title,
            slug: i.slug,
            image: i.image,
            excerpt: i.excerpt,
            content: i.content,
            seo_title: i.seo_title,
            seo_description: i.seo_description,
            created_at: i.created_at,
            updated_at: i.updated_at,
        }
    }
}
