//! Idea Repository

use super::{BaseRepository, RepoError, RepoResult, Repository, now, record_id};
use crate::db::models::{Idea, IdeaCreate, IdeaUpdate};
use crate::utils::slugify;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "idea";

#[derive(Clone)]
pub struct IdeaRepository {
    base: BaseRepository,
}

impl IdeaRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find idea by slug
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Idea>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM idea WHERE slug = $slug")
            .bind(("slug", slug_owned))
            .await?;
        let ideas: Vec<Idea> = result.take(0)?;
        Ok(ideas.into_iter().next())
    }

    async fn check_slug_free(&self, slug: &str, exclude_id: Option<&str>) -> RepoResult<()> {
        if let Some(existing) = self.find_by_slug(slug).await? {
            let existing_id = existing.id.map(|id| id.to_string()).unwrap_or_default();
            if exclude_id != Some(existing_id.as_str()) {
                return Err(RepoError::Duplicate(format!(
                    "Idea slug '{}' already exists",
                    slug
                )));
            }
        }
        Ok(())
    }
}

impl Repository<Idea, IdeaCreate, IdeaUpdate> for IdeaRepository {
    async fn find_all(&self) -> RepoResult<Vec<Idea>> {
        let ideas: Vec<Idea> = self
            .base
            .db()
            .query("SELECT * FROM idea ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(ideas)
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Idea>> {
        let idea: Option<Idea> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(idea)
    }

    async fn create(&self, data: IdeaCreate) -> RepoResult<Idea> {
        let slug = slugify(&data.title);
        self.check_slug_free(&slug, None).await?;

        let idea = Idea {
            id: None,
            title: data.title,
            slug,
            image: data.image,
            excerpt: data.excerpt,
            content: data.content,
            seo_title: data.seo_title,
            seo_description: data.seo_description,
            created_at: now(),
            updated_at: None,
        };

        let created: Option<Idea> = self.base.db().create(TABLE).content(idea).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create idea".to_string()))
    }

    async fn update(&self, id: &str, data: IdeaUpdate) -> RepoResult<Idea> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Idea {} not found", id)))?;
        let existing_id = existing.id.map(|rid| rid.to_string()).unwrap_or_default();

        let slug = data.title.as_deref().map(slugify);
        if let Some(ref new_slug) = slug
            && *new_slug != existing.slug
        {
            self.check_slug_free(new_slug, Some(existing_id.as_str()))
                .await?;
        }

        #[derive(Serialize)]
        struct IdeaUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            title: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            slug: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            image: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            excerpt: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            content: Option<serde_json::Value>,
            #[serde(skip_serializing_if = "Option::is_none")]
            seo_title: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            seo_description: Option<String>,
            updated_at: String,
        }

        let update_data = IdeaUpdateDb {
            title: data.title,
            slug,
            image: data.image,
            excerpt: data.excerpt,
            content: data.content,
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
            .ok_or_else(|| RepoError::NotFound(format!("Idea {} not found", id)))
    }

    async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<Idea> = self.base.db().delete(record_id(TABLE, id)).await?;
        Ok(deleted.is_some())
    }
}
