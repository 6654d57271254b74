//! Enquiry Model
//!
//! Contact-form submissions: write-once, read by the admin listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use validator::Validate;

pub type EnquiryId = Thing;

/// Stored enquiry record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EnquiryId>,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// POST /enquiry/add-enquiry request body
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddEnquiryRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "message must not be empty"))]
    pub message: String,
}
