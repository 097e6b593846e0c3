//! Product Repository

use super::{BaseRepository, RepoError, RepoResult, Repository, now, record_id};
use crate::db::models::{Product, ProductCreate, ProductFile, ProductUpdate};
use crate::utils::slugify;
use serde::Serialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find product by slug
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Product>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM product WHERE slug = $slug")
            .bind(("slug", slug_owned))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    /// Find all products in a category
    pub async fn find_by_category(&self, category_id: &str) -> RepoResult<Vec<Product>> {
        let cat = record_id("category", category_id);
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM product WHERE category = $cat ORDER BY created_at DESC")
            .bind(("cat", cat))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products)
    }

    async fn check_slug_free(&self, slug: &str, exclude_id: Option<&str>) -> RepoResult<()> {
        if let Some(existing) = self.find_by_slug(slug).await? {
            let existing_id = existing.id.map(|id| id.to_string()).unwrap_or_default();
            if exclude_id != Some(existing_id.as_str()) {
                return Err(RepoError::Duplicate(format!(
                    "Product slug '{}' already exists",
                    slug
                )));
            }
        }
        Ok(())
    }
}

impl Repository<Product, ProductCreate, ProductUpdate> for ProductRepository {
    async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(products)
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let product: Option<Product> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(product)
    }

    async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let slug = slugify(&data.title);
        self.check_slug_free(&slug, None).await?;

        let product = Product {
            id: None,
            title: data.title,
            slug,
            image: data.image,
            big_image: data.big_image,
            preview: data.preview,
            price: data.price,
            category: data.category.as_deref().map(|id| record_id("category", id)),
            content: data.content,
            gallery: data.gallery,
            files: data.files,
            created_at: now(),
            updated_at: None,
        };

        let created: Option<Product> = self.base.db().create(TABLE).content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))?;
        let existing_id = existing.id.map(|rid| rid.to_string()).unwrap_or_default();

        let slug = data.title.as_deref().map(slugify);
        if let Some(ref new_slug) = slug
            && *new_slug != existing.slug
        {
            self.check_slug_free(new_slug, Some(existing_id.as_str()))
                .await?;
        }

        #[derive(Serialize)]
        struct ProductUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            title: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            slug: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            image: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            big_image: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            preview: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            price: Option<f64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            category: Option<RecordId>,
            #[serde(skip_serializing_if = "Option::is_none")]
            content: Option<serde_json::Value>,
            #[serde(skip_serializing_if = "Option::is_none")]
            gallery: Option<Vec<String>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            files: Option<Vec<ProductFile>>,
            updated_at: String,
        }

        let update_data = ProductUpdateDb {
            title: data.title,
            slug,
            image: data.image,
            big_image: data.big_image,
            preview: data.preview,
            price: data.price,
            category: data.category.as_deref().map(|id| record_id("category", id)),
            content: data.content,
            gallery: data.gallery,
            files: data.files,
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
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<Product> = self.base.db().delete(record_id(TABLE, id)).await?;
        Ok(deleted.is_some())
    }
}
