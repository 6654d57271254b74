//! Review Repository
//!
//! Append-only: reviews are created and listed, never edited. Aggregates are
//! computed at read time from the stored rows.

use super::{BaseRepository, RepoError, RepoResult, make_thing};
use crate::db::models::{AddReviewRequest, Review};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;

const REVIEW_TABLE: &str = "review";

#[derive(Clone)]
pub struct ReviewRepository {
    base: BaseRepository,
}

/// One product's review mean, from the grouped aggregation query
#[derive(Debug, serde::Deserialize)]
pub struct ProductRating {
    pub product: Thing,
    pub average: f64,
}

impl ReviewRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Append a review for a product
    pub async fn create(&self, product: Thing, data: AddReviewRequest) -> RepoResult<Review> {
        if !(1..=5).contains(&data.review_stars) {
            return Err(RepoError::Validation(
                "reviewStars must be between 1 and 5".into(),
            ));
        }
        if data.review_text.trim().is_empty() {
            return Err(RepoError::Validation("reviewText cannot be empty".into()));
        }
        if data.user_name.trim().is_empty() {
            return Err(RepoError::Validation("userName cannot be empty".into()));
        }

        let review = Review {
            id: None,
            product,
            review_stars: data.review_stars,
            review_text: data.review_text,
            user_name: data.user_name,
            user_id: data.user_id,
            created_at: Utc::now(),
        };

        let created: Option<Review> = self.base.db().create(REVIEW_TABLE).content(review).await?;
        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create review".to_string()))?;

        tracing::info!(product = %created.product, stars = created.review_stars, "Review created");
        Ok(created)
    }

    /// All reviews for a product, oldest first
    pub async fn find_by_product(&self, product_id: &str) -> RepoResult<Vec<Review>> {
        let product = make_thing("product", product_id);
        let reviews: Vec<Review> = self
            .base
            .db()
            .query("SELECT * FROM review WHERE product = $product ORDER BY createdAt ASC")
            .bind(("product", product))
            .await?
            .take(0)?;
        Ok(reviews)
    }

    /// Per-product review means over the whole review table
    pub async fn averages(&self) -> RepoResult<Vec<ProductRating>> {
        let ratings: Vec<ProductRating> = self
            .base
            .db()
            .query(
                "SELECT product, math::mean(reviewStars) AS average \
                 FROM review GROUP BY product",
            )
            .await?
            .take(0)?;
        Ok(ratings)
    }

    /// Product ids whose review average is at least `min`
    pub async fn product_ids_with_min_average(&self, min: f64) -> RepoResult<Vec<Thing>> {
        let ratings = self.averages().await?;
        Ok(ratings
            .into_iter()
            .filter(|r| r.average >= min)
            .map(|r| r.product)
            .collect())
    }
}
