//! Banner Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

pub type BannerId = Thing;

/// Carousel banner — a single image, listed in creation order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<BannerId>,
    pub banner_image: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerCreate {
    pub banner_image: String,
}
