//! User Repository

use super::{BaseRepository, RepoError, RepoResult, Repository, now, record_id};
use crate::db::models::{User, UserCreate, UserRole, UserUpdate};
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email")
            .bind(("email", email_owned))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    async fn check_email_free(&self, email: &str, exclude_id: Option<&str>) -> RepoResult<()> {
        if let Some(existing) = self.find_by_email(email).await? {
            let existing_id = existing.id.map(|id| id.to_string()).unwrap_or_default();
            if exclude_id != Some(existing_id.as_str()) {
                return Err(RepoError::Duplicate(format!(
                    "User '{}' already exists",
                    email
                )));
            }
        }
        Ok(())
    }
}

impl Repository<User, UserCreate, UserUpdate> for UserRepository {
    async fn find_all(&self) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(users)
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let user: Option<User> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(user)
    }

    async fn create(&self, data: UserCreate) -> RepoResult<User> {
        self.check_email_free(&data.email, None).await?;

        let user = User {
            id: None,
            email: data.email,
            first_name: data.first_name,
            last_name: data.last_name,
            phone: data.phone,
            street: data.street,
            address: data.address,
            city: data.city,
            state: data.state,
            zip: data.zip,
            country: data.country,
            role: data.role.unwrap_or(UserRole::Customer),
            created_at: now(),
            updated_at: None,
        };

        let created: Option<User> = self.base.db().create(TABLE).content(user).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    async fn update(&self, id: &str, data: UserUpdate) -> RepoResult<User> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))?;
        let existing_id = existing.id.map(|rid| rid.to_string()).unwrap_or_default();

        if let Some(ref new_email) = data.email
            && *new_email != existing.email
        {
            self.check_email_free(new_email, Some(existing_id.as_str()))
                .await?;
        }

        #[derive(Serialize)]
        struct UserUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            email: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            first_name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            last_name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            phone: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            street: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            address: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            city: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            state: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            zip: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            country: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            role: Option<UserRole>,
            updated_at: String,
        }

        let update_data = UserUpdateDb {
            email: data.email,
            first_name: data.first_name,
            last_name: data.last_name,
            phone: data.phone,
            street: data.street,
            address: data.address,
            city: data.city,
            state: data.state,
            zip: data.zip,
            country: data.country,
            role: data.role,
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
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<User> = self.base.db().delete(record_id(TABLE, id)).await?;
        Ok(deleted.is_some())
    }
}
