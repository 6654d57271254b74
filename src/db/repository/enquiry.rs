//! Enquiry Repository
//!
//! Write-once contact-form records; the admin dashboard lists them
//! newest-first.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{AddEnquiryRequest, Enquiry};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "enquiry";

#[derive(Clone)]
pub struct EnquiryRepository {
    base: BaseRepository,
}

impl EnquiryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All enquiries, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Enquiry>> {
        let enquiries: Vec<Enquiry> = self
            .base
            .db()
            .query("SELECT * FROM enquiry ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(enquiries)
    }

    /// Store a contact-form submission
    pub async fn create(&self, data: AddEnquiryRequest) -> RepoResult<Enquiry> {
        let enquiry = Enquiry {
            id: None,
            name: data.name,
            email: data.email,
            message: data.message,
            created_at: Utc::now(),
        };

        let created: Option<Enquiry> = self.base.db().create(TABLE).content(enquiry).await?;
        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create enquiry".to_string()))?;

        tracing::info!(email = %created.email, "Enquiry created");
        Ok(created)
    }
}
