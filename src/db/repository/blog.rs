//! Blog Repository

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{Blog, BlogCreate, BlogUpdate};
use crate::utils::slug::{slug_candidate, slugify};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const BLOG_TABLE: &str = "blog";

/// Server-side cap: two videos per blog post
pub const MAX_BLOG_VIDEOS: usize = 2;

#[derive(Clone)]
pub struct BlogRepository {
    base: BaseRepository,
}

impl BlogRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All blog posts, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Blog>> {
        let blogs: Vec<Blog> = self
            .base
            .db()
            .query("SELECT * FROM blog ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(blogs)
    }

    /// Find blog by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Blog>> {
        let pure_id = strip_table_prefix(BLOG_TABLE, id);
        let blog: Option<Blog> = self.base.db().select((BLOG_TABLE, pure_id)).await?;
        Ok(blog)
    }

    /// Find blog by slug
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Blog>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM blog WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug_owned))
            .await?;
        let blogs: Vec<Blog> = result.take(0)?;
        Ok(blogs.into_iter().next())
    }

    async fn slug_exists(&self, slug: &str) -> RepoResult<bool> {
        Ok(self.find_by_slug(slug).await?.is_some())
    }

    async fn unique_slug(&self, title: &str) -> RepoResult<String> {
        let base = slugify(title);
        for attempt in 1..=64 {
            let candidate = slug_candidate(&base, attempt);
            if !self.slug_exists(&candidate).await? {
                return Ok(candidate);
            }
        }
        Ok(format!("{}-{}", base, uuid::Uuid::new_v4().simple()))
    }

    /// Create a new blog post
    pub async fn create(&self, data: BlogCreate) -> RepoResult<Blog> {
        if data.title.trim().is_empty() {
            return Err(RepoError::Validation("title cannot be empty".into()));
        }
        if data.image.is_empty() {
            return Err(RepoError::Validation("a cover image is required".into()));
        }
        if data.videos.len() > MAX_BLOG_VIDEOS {
            return Err(RepoError::Validation(format!(
                "at most {} videos allowed",
                MAX_BLOG_VIDEOS
            )));
        }

        let slug = self.unique_slug(&data.title).await?;
        let blog = Blog {
            id: None,
            title: data.title,
            description: data.description,
            tag: data.tag,
            read_time: data.read_time,
            image: data.image,
            videos: data.videos,
            slug,
            created_at: Utc::now(),
        };

        let created: Option<Blog> = self.base.db().create(BLOG_TABLE).content(blog).await?;
        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create blog".to_string()))?;

        tracing::info!(slug = %created.slug, "Blog created");
        Ok(created)
    }

    /// Update a blog post (partial fields, dynamic SET)
    pub async fn update(&self, id: &str, data: BlogUpdate) -> RepoResult<Blog> {
        if let Some(image) = &data.image
            && image.is_empty()
        {
            return Err(RepoError::Validation("a cover image is required".into()));
        }
        if let Some(videos) = &data.videos
            && videos.len() > MAX_BLOG_VIDEOS
        {
            return Err(RepoError::Validation(format!(
                "at most {} videos allowed",
                MAX_BLOG_VIDEOS
            )));
        }

        let pure_id = strip_table_prefix(BLOG_TABLE, id);
        let thing = make_thing(BLOG_TABLE, pure_id);

        let mut set_parts: Vec<&str> = Vec::new();
        if data.title.is_some() {
            set_parts.push("title = $title");
        }
        if data.description.is_some() {
            set_parts.push("description = $description");
        }
        if data.tag.is_some() {
            set_parts.push("tag = $tag");
        }
        if data.read_time.is_some() {
            set_parts.push("readTime = $readTime");
        }
        if data.image.is_some() {
            set_parts.push("image = $image");
        }
        if data.videos.is_some() {
            set_parts.push("videos = $videos");
        }

        if set_parts.is_empty() {
            return self
                .find_by_id(pure_id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Blog {} not found", id)));
        }

        let query_str = format!("UPDATE $thing SET {} RETURN AFTER", set_parts.join(", "));

        let mut query = self.base.db().query(query_str).bind(("thing", thing));
        if let Some(v) = data.title {
            query = query.bind(("title", v));
        }
        if let Some(v) = data.description {
            query = query.bind(("description", v));
        }
        if let Some(v) = data.tag {
            query = query.bind(("tag", v));
        }
        if let Some(v) = data.read_time {
            query = query.bind(("readTime", v));
        }
        if let Some(v) = data.image {
            query = query.bind(("image", v));
        }
        if let Some(v) = data.videos {
            query = query.bind(("videos", v));
        }

        let mut result = query.await?;
        let blogs: Vec<Blog> = result.take(0)?;

        let updated = blogs
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Blog {} not found", id)))?;

        tracing::info!(slug = %updated.slug, "Blog updated");
        Ok(updated)
    }

    /// Hard delete a blog post (media files are not removed)
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(BLOG_TABLE, id);
        let result: Option<Blog> = self.base.db().delete((BLOG_TABLE, pure_id)).await?;
        match result {
            Some(blog) => {
                tracing::info!(slug = %blog.slug, "Blog deleted");
                Ok(())
            }
            None => Err(RepoError::NotFound(format!("Blog {} not found", id))),
        }
    }
}
