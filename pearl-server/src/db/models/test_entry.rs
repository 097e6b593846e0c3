//! Test Entry Model
//!
//! Minimal scratch collection kept from the original content model.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Test entry model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: String,
    /// Derived from title on every write
    pub slug: String,
    pub excerpt: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestEntryCreate {
    pub title: String,
    pub excerpt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestEntryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

/// Test entry response with string record id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestEntryResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<TestEntry> for TestEntryResponse {
    fn from(t: TestEntry) -> Self {
        Self {
            id: t.id.map(|id| id.to_string()).unwrap_or_default(),
            title: t.title,
            slug: t.slug,
            excerpt: t.excerpt,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}
