//! Test Entry Repository

use super::{BaseRepository, RepoError, RepoResult, Repository, now, record_id};
use crate::db::models::{TestEntry, TestEntryCreate, TestEntryUpdate};
use crate::utils::slugify;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "test";

#[derive(Clone)]
pub struct TestEntryRepository {
    base: BaseRepository,
}

impl TestEntryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find test entry by slug
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<TestEntry>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM test WHERE slug = $slug")
            .bind(("slug", slug_owned))
            .await?;
        let entries: Vec<TestEntry> = result.take(0)?;
        Ok(entries.into_iter().next())
    }

    async fn check_slug_free(&self, slug: &str, exclude_id: Option<&str>) -> RepoResult<()> {
        if let Some(existing) = self.find_by_slug(slug).await? {
            let existing_id = existing.id.map(|id| id.to_string()).unwrap_or_default();
            if exclude_id != Some(existing_id.as_str()) {
                return Err(RepoError::Duplicate(format!(
                    "Test entry slug '{}' already exists",
                    slug
                )));
            }
        }
        Ok(())
    }
}

impl Repository<TestEntry, TestEntryCreate, TestEntryUpdate> for TestEntryRepository {
    async fn find_all(&self) -> RepoResult<Vec<TestEntry>> {
        let entries: Vec<TestEntry> = self
            .base
            .db()
            .query("SELECT * FROM test ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(entries)
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<TestEntry>> {
        let entry: Option<TestEntry> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(entry)
    }

    async fn create(&self, data: TestEntryCreate) -> RepoResult<TestEntry> {
        let slug = slugify(&data.title);
        self.check_slug_free(&slug, None).await?;

        let entry = TestEntry {
            id: None,
            title: data.title,
            slug,
            excerpt: data.excerpt,
            created_at: now(),
            updated_at: None,
        };

        let created: Option<TestEntry> = self.base.db().create(TABLE).content(entry).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create test entry".to_string()))
    }

    async fn update(&self, id: &str, data: TestEntryUpdate) -> RepoResult<TestEntry> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Test entry {} not found", id)))?;
        let existing_id = existing.id.map(|rid| rid.to_string()).unwrap_or_default();

        let slug = data.title.as_deref().map(slugify);
        if let Some(ref new_slug) = slug
            && *new_slug != existing.slug
        {
            self.check_slug_free(new_slug, Some(existing_id.as_str()))
                .await?;
        }

        #[derive(Serialize)]
        struct TestEntryUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            title: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            slug: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            excerpt: Option<String>,
            updated_at: String,
        }

        let update_data = TestEntryUpdateDb {
            title: data.title,
            slug,
            excerpt: data.excerpt,
            updated_at: now(),
        };

        let rid = record_id(TABLE, id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", rid))
            .bind(("data", update_data))
            .await?
            .check()?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Test entry {} not found", id)))
    }

    async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<TestEntry> = self.base.db().delete(record_id(TABLE, id)).await?;
        Ok(deleted.is_some())
    }
}
