//! Banner Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{Banner, BannerCreate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "banner";

#[derive(Clone)]
pub struct BannerRepository {
    base: BaseRepository,
}

impl BannerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All banners in creation order (carousel display order)
    pub async fn find_all(&self) -> RepoResult<Vec<Banner>> {
        let banners: Vec<Banner> = self
            .base
            .db()
            .query("SELECT * FROM banner ORDER BY createdAt ASC")
            .await?
            .take(0)?;
        Ok(banners)
    }

    /// Find banner by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Banner>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let banner: Option<Banner> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(banner)
    }

    /// Create a new banner
    pub async fn create(&self, data: BannerCreate) -> RepoResult<Banner> {
        if data.banner_image.is_empty() {
            return Err(RepoError::Validation("bannerImage is required".into()));
        }

        let banner = Banner {
            id: None,
            banner_image: data.banner_image,
            created_at: Utc::now(),
        };

        let created: Option<Banner> = self.base.db().create(TABLE).content(banner).await?;
        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create banner".to_string()))?;

        tracing::info!(image = %created.banner_image, "Banner created");
        Ok(created)
    }

    /// Replace a banner's image
    pub async fn update_image(&self, id: &str, banner_image: String) -> RepoResult<Banner> {
        if banner_image.is_empty() {
            return Err(RepoError::Validation("bannerImage is required".into()));
        }

        let pure_id = strip_table_prefix(TABLE, id);
        let thing = super::make_thing(TABLE, pure_id);

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET bannerImage = $bannerImage RETURN AFTER")
            .bind(("thing", thing))
            .bind(("bannerImage", banner_image))
            .await?;
        let banners: Vec<Banner> = result.take(0)?;

        let updated = banners
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Banner {} not found", id)))?;

        tracing::info!(image = %updated.banner_image, "Banner updated");
        Ok(updated)
    }

    /// Hard delete a banner (the image file is not removed)
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(TABLE, id);
        let result: Option<Banner> = self.base.db().delete((TABLE, pure_id)).await?;
        match result {
            Some(banner) => {
                tracing::info!(image = %banner.banner_image, "Banner deleted");
                Ok(())
            }
            None => Err(RepoError::NotFound(format!("Banner {} not found", id))),
        }
    }
}
