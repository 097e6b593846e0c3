//! Special Offer Repository

use super::{BaseRepository, RepoError, RepoResult, Repository, now, record_id};
use crate::db::models::{SpecialOffer, SpecialOfferCreate, SpecialOfferUpdate};
use crate::utils::slugify;
use serde::Serialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "special_offer";

#[derive(Clone)]
pub struct SpecialOfferRepository {
    base: BaseRepository,
}

impl SpecialOfferRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find special offer by slug
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<SpecialOffer>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM special_offer WHERE slug = $slug")
            .bind(("slug", slug_owned))
            .await?;
        let offers: Vec<SpecialOffer> = result.take(0)?;
        Ok(offers.into_iter().next())
    }

    async fn check_slug_free(&self, slug: &str, exclude_id: Option<&str>) -> RepoResult<()> {
        if let Some(existing) = self.find_by_slug(slug).await? {
            let existing_id = existing.id.map(|id| id.to_string()).unwrap_or_default();
            if exclude_id != Some(existing_id.as_str()) {
                return Err(RepoError::Duplicate(format!(
                    "Special offer slug '{}' already exists",
                    slug
                )));
            }
        }
        Ok(())
    }
}

impl Repository<SpecialOffer, SpecialOfferCreate, SpecialOfferUpdate> for SpecialOfferRepository {
    async fn find_all(&self) -> RepoResult<Vec<SpecialOffer>> {
        let offers: Vec<SpecialOffer> = self
            .base
            .db()
            .query("SELECT * FROM special_offer ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(offers)
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<SpecialOffer>> {
        let offer: Option<SpecialOffer> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(offer)
    }

    async fn create(&self, data: SpecialOfferCreate) -> RepoResult<SpecialOffer> {
        let slug = slugify(&data.title);
        self.check_slug_free(&slug, None).await?;

        let products: Vec<RecordId> = data
            .products
            .iter()
            .map(|id| record_id("product", id))
            .collect();

        let offer = SpecialOffer {
            id: None,
            title: data.title,
            slug,
            total_price: data.total_price,
            discount: data.discount,
            discounted_price: data.discounted_price,
            subtitle: data.subtitle,
            excerpt: data.excerpt,
            products,
            image: data.image,
            color: data.color,
            created_at: now(),
            updated_at: None,
        };

        let created: Option<SpecialOffer> = self.base.db().create(TABLE).content(offer).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create special offer".to_string()))
    }

    async fn update(&self, id: &str, data: SpecialOfferUpdate) -> RepoResult<SpecialOffer> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Special offer {} not found", id)))?;
        let existing_id = existing.id.map(|rid| rid.to_string()).unwrap_or_default();

        let slug = data.title.as_deref().map(slugify);
        if let Some(ref new_slug) = slug
            && *new_slug != existing.slug
        {
            self.check_slug_free(new_slug, Some(existing_id.as_str()))
                .await?;
        }

        #[derive(Serialize)]
        struct SpecialOfferUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            title: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            slug: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            total_price: Option<f64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            discount: Option<f64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            discounted_price: Option<f64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            subtitle: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            excerpt: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            products: Option<Vec<RecordId>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            image: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            color: Option<String>,
            updated_at: String,
        }

        let update_data = SpecialOfferUpdateDb {
            title: data.title,
            slug,
            total_price: data.total_price,
            discount: data.discount,
            discounted_price: data.discounted_price,
            subtitle: data.subtitle,
            excerpt: data.excerpt,
            products: data
                .products
                .map(|ids| ids.iter().map(|id| record_id("product", id)).collect()),
            image: data.image,
            color: data.color,
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
            .ok_or_else(|| RepoError::NotFound(format!("Special offer {} not found", id)))
    }

    async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<SpecialOffer> = self.base.db().delete(record_id(TABLE, id)).await?;
        Ok(deleted.is_some())
    }
}
