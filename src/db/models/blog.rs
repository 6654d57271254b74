//! Blog Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

pub type BlogId = Thing;

/// Blog post model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<BlogId>,
    pub title: String,
    pub description: String,
    pub tag: String,
    /// Display read time, e.g. "4 min"
    pub read_time: String,
    /// Single cover image filename
    pub image: String,
    /// Ordered video filenames, at most two
    #[serde(default)]
    pub videos: Vec<String>,
    /// Unique URL-safe identifier derived from the title
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogCreate {
    pub title: String,
    pub description: String,
    pub tag: String,
    pub read_time: String,
    pub image: String,
    pub videos: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tag: Option<String>,
    pub read_time: Option<String>,
    pub image: Option<String>,
    /// Full replacement video list (retained existing ∪ newly uploaded)
    pub videos: Option<Vec<String>>,
}
