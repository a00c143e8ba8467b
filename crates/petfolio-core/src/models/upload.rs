//! Uploaded file models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A file attached during the current session.
///
/// The `reference` is only meaningful to the shell that produced the bytes;
/// nothing is stored remotely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadedFile {
    /// Unique upload ID
    pub id: String,
    /// Owning pet ID
    pub pet_id: String,
    pub file_name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    /// Why the file was attached (e.g. "vaccination", "signature")
    pub context: String,
    /// Session-local reference, `<prefix>/<uuid>`
    pub reference: String,
    /// Hex SHA-256 of the file contents
    pub sha256: String,
    pub created_at: DateTime<Utc>,
}

impl UploadedFile {
    /// Wrap freshly selected file contents.
    pub fn new(
        pet_id: String,
        file_name: String,
        mime_type: String,
        bytes: &[u8],
        context: String,
        reference_prefix: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let id = uuid::Uuid::new_v4().to_string();
        let reference = format!("{}/{}", reference_prefix.trim_end_matches('/'), id);
        Self {
            sha256: hex::encode(Sha256::digest(bytes)),
            size_bytes: bytes.len() as u64,
            id,
            pet_id,
            file_name,
            mime_type,
            context,
            reference,
            created_at: now,
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}
