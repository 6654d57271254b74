//! Media Pipeline
//!
//! Multipart uploads land here: payloads are validated, written to a
//! filesystem location segmented by type, and referenced from the owning
//! record by filename only.

pub mod form;
pub mod store;

pub use form::{MultipartForm, UploadedFile};
pub use store::{MediaKind, MediaStore, merge_assets};
