//! Repository Module
//!
//! Provides CRUD operations for the catalog tables in SurrealDB.

pub mod banner;
pub mod blog;
pub mod collection;
pub mod enquiry;
pub mod product;
pub mod review;

// Re-exports
pub use banner::BannerRepository;
pub use blog::BlogRepository;
pub use collection::CollectionRepository;
pub use enquiry::EnquiryRepository;
pub use product::ProductRepository;
pub use review::ReviewRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 客户端传入的 ID 可能带表前缀 ("product:abc") 也可能是纯 ID ("abc")，
// 仓库层统一通过 strip_table_prefix / make_thing 归一化。

/// Extract the bare id if the string carries a "table:" prefix
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}

/// Build a record link for `table` from a possibly-prefixed id string
pub fn make_thing(table: &str, id: &str) -> Thing {
    Thing::from((table.to_string(), strip_table_prefix(table, id).to_string()))
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_prefix_only_for_matching_table() {
        assert_eq!(strip_table_prefix("product", "product:abc"), "abc");
        assert_eq!(strip_table_prefix("product", "abc"), "abc");
        // A different table's prefix is left alone
        assert_eq!(strip_table_prefix("product", "collection:abc"), "collection:abc");
    }

    #[test]
    fn make_thing_normalizes() {
        let a = make_thing("product", "abc");
        let b = make_thing("product", "product:abc");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "product:abc");
    }
}
