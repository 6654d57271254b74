//! Review Model
//!
//! Reviews are append-only: there is no update or delete surface, and the
//! per-product aggregates (count, average) are derived at read time rather
//! than stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use validator::Validate;

pub type ReviewId = Thing;

/// Review model (stored shape)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ReviewId>,
    /// Record link to product
    pub product: Thing,
    /// Integer stars, 1..=5
    pub review_stars: i32,
    pub review_text: String,
    pub user_name: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// POST /reviews/add-review request body
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddReviewRequest {
    pub product_id: String,
    #[validate(range(min = 1, max = 5, message = "reviewStars must be between 1 and 5"))]
    pub review_stars: i32,
    #[validate(length(min = 1, message = "reviewText must not be empty"))]
    pub review_text: String,
    #[validate(length(min = 1, message = "userName must not be empty"))]
    pub user_name: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Reviews for one product plus derived aggregates
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReviews {
    pub reviews: Vec<Review>,
    pub count: u64,
    /// Mean stars rounded to 1 decimal; 0.0 when there are no reviews
    pub average: f64,
}

impl ProductReviews {
    /// Build the read-time aggregate from an ordered review list.
    pub fn from_reviews(reviews: Vec<Review>) -> Self {
        let count = reviews.len() as u64;
        let average = if count == 0 {
            0.0
        } else {
            let sum: i32 = reviews.iter().map(|r| r.review_stars).sum();
            round_to_tenth(f64::from(sum) / count as f64)
        };
        Self {
            reviews,
            count,
            average,
        }
    }
}

/// Round to one decimal place (half away from zero)
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(stars: i32) -> Review {
        Review {
            id: None,
            product: Thing::from(("product", "p1")),
            review_stars: stars,
            review_text: "ok".into(),
            user_name: "tester".into(),
            user_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn average_rounds_to_one_decimal() {
        let agg = ProductReviews::from_reviews(vec![review(5), review(5), review(4)]);
        assert_eq!(agg.count, 3);
        assert_eq!(agg.average, 4.7);
    }

    #[test]
    fn empty_reviews_average_zero() {
        let agg = ProductReviews::from_reviews(Vec::new());
        assert_eq!(agg.count, 0);
        assert_eq!(agg.average, 0.0);
    }

    #[test]
    fn single_review_is_exact() {
        let agg = ProductReviews::from_reviews(vec![review(3)]);
        assert_eq!(agg.average, 3.0);
    }

    #[test]
    fn request_validation_bounds() {
        use validator::Validate;

        let bad = AddReviewRequest {
            product_id: "product:p1".into(),
            review_stars: 6,
            review_text: "great".into(),
            user_name: "a".into(),
            user_id: None,
        };
        assert!(bad.validate().is_err());

        let empty_text = AddReviewRequest {
            review_stars: 4,
            review_text: "".into(),
            ..bad
        };
        assert!(empty_text.validate().is_err());
    }
}
