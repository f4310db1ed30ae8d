use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Content type recorded when an upload does not declare one
pub const DEFAULT_PICTURE_CONTENT_TYPE: &str = "image/png";

/// Uploaded image bytes stored in the database
///
/// A picture is exclusively owned by one entity slot (main picture or icon)
/// and is deleted when that slot is replaced or its owner is deleted.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Picture {
    pub id: Uuid,

    /// Raw file content
    #[serde(skip_serializing)]
    #[serde(default)]
    pub content: Vec<u8>,

    /// Original file name, if the upload carried one
    pub name: Option<String>,

    /// MIME type
    #[serde(rename = "type")]
    pub content_type: String,

    pub created_at: DateTime<Utc>,
}

impl Picture {
    pub fn new(content: Vec<u8>, name: Option<String>, content_type: Option<String>) -> Self {
        let content_type = content_type
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PICTURE_CONTENT_TYPE.to_string());

        Self {
            id: Uuid::new_v4(),
            content,
            name,
            content_type,
            created_at: Utc::now(),
        }
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

// Keep multi-megabyte blobs out of debug output.
impl std::fmt::Debug for Picture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Picture")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size", &self.content.len())
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// A video registered by reference to the transferred file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: Uuid,
    pub path: String,
    pub filename: Option<String>,
    pub original_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Video {
    pub fn new(path: String, filename: Option<String>, original_name: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            path,
            filename,
            original_name,
            created_at: Utc::now(),
        }
    }
}
