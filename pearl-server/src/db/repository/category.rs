//! Category Repository

use super::{BaseRepository, RepoError, RepoResult, Repository, now, record_id};
use crate::db::models::{Category, CategoryCreate, CategoryUpdate};
use crate::utils::slugify;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "category";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find category by slug
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Category>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM category WHERE slug = $slug")
            .bind(("slug", slug_owned))
            .await?;
        let categories: Vec<Category> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    /// Reject a slug that already belongs to a different record
    async fn check_slug_free(&self, slug: &str, exclude_id: Option<&str>) -> RepoResult<()> {
        if let Some(existing) = self.find_by_slug(slug).await? {
            let existing_id = existing.id.map(|id| id.to_string()).unwrap_or_default();
            if exclude_id != Some(existing_id.as_str()) {
                return Err(RepoError::Duplicate(format!(
                    "Category slug '{}' already exists",
                    slug
                )));
            }
        }
        Ok(())
    }
}

impl Repository<Category, CategoryCreate, CategoryUpdate> for CategoryRepository {
    /// Find all categories, newest first
    async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(categories)
    }

    /// Find category by id
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        let category: Option<Category> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(category)
    }

    /// Create a new category (slug derived from title)
    async fn create(&self, data: CategoryCreate) -> RepoResult<Category> {
        let slug = slugify(&data.title);
        self.check_slug_free(&slug, None).await?;

        let category = Category {
            id: None,
            title: data.title,
            slug,
            subtitle: data.subtitle,
            description: data.description,
            seo_title: data.seo_title,
            seo_description: data.seo_description,
            created_at: now(),
            updated_at: None,
        };

        let created: Option<Category> = self.base.db().create(TABLE).content(category).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    /// Update a category (slug re-derived when title changes)
    async fn update(&self, id: &str, data: CategoryUpdate) -> RepoResult<Category> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))?;
        let existing_id = existing.id.map(|rid| rid.to_string()).unwrap_or_default();

        let slug = data.title.as_deref().map(slugify);
        if let Some(ref new_slug) = slug
            && *new_slug != existing.slug
        {
            self.check_slug_free(new_slug, Some(existing_id.as_str()))
                .await?;
        }

        #[derive(Serialize)]
        struct CategoryUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            title: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            slug: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            subtitle: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            seo_title: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            seo_description: Option<String>,
            updated_at: String,
        }

        let update_data = CategoryUpdateDb {
            title: data.title,
            slug,
            subtitle: data.subtitle,
            description: data.description,
            seo_title: data.seo_title,
            seo_description: data.seo_description,
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
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))
    }

    /// Hard delete a category
    async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<Category> = self.base.db().delete(record_id(TABLE, id)).await?;
        Ok(deleted.is_some())
    }
}
