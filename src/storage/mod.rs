//! Blob storage for uploaded file payloads and profile pictures.
//!
//! Records only keep a `blob_key`; the bytes live behind [`BlobStore`].

pub mod local;
pub mod memory;

pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppResult;

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `data` and returns the key it can be read back with.
    async fn put(&self, file_name: &str, data: &[u8]) -> AppResult<String>;
    async fn get(&self, key: &str) -> AppResult<Vec<u8>>;
    async fn delete(&self, key: &str) -> AppResult<()>;
}

/// Builds a collision-free key that still carries a readable file name.
pub(crate) fn blob_key(file_name: &str) -> String {
    format!("files/{}-{}", Uuid::new_v4(), sanitize_file_name(file_name))
}

/// Keeps ASCII alphanumerics, dots, dashes and underscores. Path separators
/// and anything else are replaced so a key never escapes its directory.
pub(crate) fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim_start_matches('.');

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\temp\\notes.pdf"), "notes.pdf");
    }

    #[test]
    fn test_sanitize_replaces_odd_characters() {
        assert_eq!(sanitize_file_name("my report (v2).pdf"), "my_report__v2_.pdf");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name(""), "upload");
    }

    #[test]
    fn test_blob_key_layout() {
        let key = blob_key("slides.pptx");
        assert!(key.starts_with("files/"));
        assert!(key.ends_with("-slides.pptx"));
    }
}
