//! Multipart form intake
//!
//! Admin screens submit FormData with conditionally-included fields. This
//! module reads the whole multipart stream once into a typed bag, and the
//! handlers build explicit draft DTOs from it: empty text fields count as
//! absent, and `existingImages` / `existingVideos` arrive as JSON-encoded
//! arrays of retained filenames.

use std::collections::HashMap;
use std::str::FromStr;

use axum::body::Bytes;
use axum::extract::Multipart;

use crate::utils::{AppError, AppResult};

/// One uploaded file part
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Multipart field name ("images", "videos", ...)
    pub field: String,
    /// Client-supplied filename (used for the extension only)
    pub filename: String,
    pub bytes: Bytes,
}

/// Fully-read multipart form: text fields plus file parts
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: Vec<UploadedFile>,
}

impl MultipartForm {
    /// Drain a multipart stream
    ///
    /// Empty file parts (a file input left blank) are dropped.
    pub async fn read(multipart: &mut Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            if let Some(filename) = field.file_name().map(|s| s.to_string()) {
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    form.files.push(UploadedFile {
                        field: name,
                        filename,
                        bytes,
                    });
                }
            } else {
                let text = field.text().await?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    /// Text field value; empty or whitespace-only values count as absent
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    /// Required text field
    pub fn require_text(&self, name: &str) -> AppResult<String> {
        self.text(name)
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::validation(format!("'{}' is required", name)))
    }

    /// Optional parsed field (numbers, enums via FromStr)
    pub fn parse<T: FromStr>(&self, name: &str) -> AppResult<Option<T>> {
        match self.text(name) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<T>()
                .map(Some)
                .map_err(|_| AppError::validation(format!("'{}' has an invalid value", name))),
        }
    }

    /// Required parsed field
    pub fn require_parse<T: FromStr>(&self, name: &str) -> AppResult<T> {
        self.parse(name)?
            .ok_or_else(|| AppError::validation(format!("'{}' is required", name)))
    }

    /// Optional JSON-encoded string array (`existingImages`, `existingVideos`)
    pub fn json_list(&self, name: &str) -> AppResult<Option<Vec<String>>> {
        match self.text(name) {
            None => Ok(None),
            Some(raw) => serde_json::from_str::<Vec<String>>(raw).map(Some).map_err(|_| {
                AppError::validation(format!("'{}' must be a JSON array of filenames", name))
            }),
        }
    }

    /// Optional typed field deserialized from its JSON wire name
    /// (used for enums whose wire form is a quoted string)
    pub fn json_value<T: serde::de::DeserializeOwned>(&self, name: &str) -> AppResult<Option<T>> {
        match self.text(name) {
            None => Ok(None),
            Some(raw) => serde_json::from_value(serde_json::Value::String(raw.to_string()))
                .map(Some)
                .map_err(|_| AppError::validation(format!("'{}' has an invalid value", name))),
        }
    }

    /// All file parts uploaded under a field name, in submission order
    pub fn files(&self, field: &str) -> Vec<&UploadedFile> {
        self.files.iter().filter(|f| f.field == field).collect()
    }

    /// First file part under a field name
    pub fn file(&self, field: &str) -> Option<&UploadedFile> {
        self.files.iter().find(|f| f.field == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with(fields: &[(&str, &str)]) -> MultipartForm {
        MultipartForm {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            files: Vec::new(),
        }
    }

    #[test]
    fn empty_text_counts_as_absent() {
        let form = form_with(&[("name", "  "), ("price", "12.5")]);
        assert_eq!(form.text("name"), None);
        assert_eq!(form.text("price"), Some("12.5"));
        assert!(form.require_text("name").is_err());
    }

    #[test]
    fn parse_numbers() {
        let form = form_with(&[("price", "19.99"), ("discount", "oops")]);
        assert_eq!(form.parse::<f64>("price").unwrap(), Some(19.99));
        assert!(form.parse::<f64>("discount").is_err());
        assert_eq!(form.parse::<f64>("missing").unwrap(), None);
    }

    #[test]
    fn json_list_decodes_retained_assets() {
        let form = form_with(&[("existingImages", r#"["a.jpg","b.jpg"]"#)]);
        assert_eq!(
            form.json_list("existingImages").unwrap(),
            Some(vec!["a.jpg".to_string(), "b.jpg".to_string()])
        );
        assert_eq!(form.json_list("existingVideos").unwrap(), None);

        let bad = form_with(&[("existingImages", "not-json")]);
        assert!(bad.json_list("existingImages").is_err());
    }

    #[test]
    fn json_value_decodes_feature_enum() {
        use crate::db::models::ProductFeature;

        let form = form_with(&[("feature", "sold-out")]);
        assert_eq!(
            form.json_value::<ProductFeature>("feature").unwrap(),
            Some(ProductFeature::SoldOut)
        );

        let bad = form_with(&[("feature", "blazing")]);
        assert!(bad.json_value::<ProductFeature>("feature").is_err());
    }
}
