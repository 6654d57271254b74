//! Collection Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{Collection, CollectionCreate, CollectionUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "collection";

#[derive(Clone)]
pub struct CollectionRepository {
    base: BaseRepository,
}

impl CollectionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All collections in creation order
    pub async fn find_all(&self) -> RepoResult<Vec<Collection>> {
        let collections: Vec<Collection> = self
            .base
            .db()
            .query("SELECT * FROM collection ORDER BY createdAt ASC")
            .await?
            .take(0)?;
        Ok(collections)
    }

    /// Find collection by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Collection>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let collection: Option<Collection> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(collection)
    }

    /// Find collection by name
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Collection>> {
        let name_owned = name.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM collection WHERE name = $name LIMIT 1")
            .bind(("name", name_owned))
            .await?;
        let collections: Vec<Collection> = result.take(0)?;
        Ok(collections.into_iter().next())
    }

    /// Create a new collection (name must be unique)
    pub async fn create(&self, data: CollectionCreate) -> RepoResult<Collection> {
        if data.name.trim().is_empty() {
            return Err(RepoError::Validation("name cannot be empty".into()));
        }
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Collection '{}' already exists",
                data.name
            )));
        }

        let collection = Collection {
            id: None,
            name: data.name,
            image: data.image,
            created_at: Utc::now(),
        };

        let created: Option<Collection> =
            self.base.db().create(TABLE).content(collection).await?;
        let created = created
            .ok_or_else(|| RepoError::Database("Failed to create collection".to_string()))?;

        tracing::info!(name = %created.name, "Collection created");
        Ok(created)
    }

    /// Update a collection (partial fields)
    pub async fn update(&self, id: &str, data: CollectionUpdate) -> RepoResult<Collection> {
        let pure_id = strip_table_prefix(TABLE, id).to_string();

        // Renaming must not collide with another collection
        if let Some(name) = &data.name {
            if let Some(existing) = self.find_by_name(name).await? {
                let existing_id = existing
                    .id
                    .as_ref()
                    .map(|t| t.id.to_string())
                    .unwrap_or_default();
                if existing_id != pure_id {
                    return Err(RepoError::Duplicate(format!(
                        "Collection '{}' already exists",
                        name
                    )));
                }
            }
        }

        let mut set_parts: Vec<&str> = Vec::new();
        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.image.is_some() {
            set_parts.push("image = $image");
        }

        if set_parts.is_empty() {
            return self
                .find_by_id(&pure_id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Collection {} not found", id)));
        }

        let query_str = format!("UPDATE $thing SET {} RETURN AFTER", set_parts.join(", "));
        let thing = super::make_thing(TABLE, &pure_id);

        let mut query = self.base.db().query(query_str).bind(("thing", thing));
        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.image {
            query = query.bind(("image", v));
        }

        let mut result = query.await?;
        let collections: Vec<Collection> = result.take(0)?;

        let updated = collections
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Collection {} not found", id)))?;

        tracing::info!(name = %updated.name, "Collection updated");
        Ok(updated)
    }

    /// Hard delete a collection
    ///
    /// Products referencing it are not touched; their reference dangles.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(TABLE, id);
        let result: Option<Collection> = self.base.db().delete((TABLE, pure_id)).await?;
        match result {
            Some(collection) => {
                tracing::info!(name = %collection.name, "Collection deleted");
                Ok(())
            }
            None => Err(RepoError::NotFound(format!("Collection {} not found", id))),
        }
    }
}
