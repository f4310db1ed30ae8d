// src/infrastructure/file_transfer.rs
//
// Uploaded-file hand-off
//
// The transport layer receives multipart uploads into temporary files and
// hands them over as descriptors. Reading the bytes and removing the
// temporary file afterwards go through `FileTransfer`.

use std::path::{Path, PathBuf};

use crate::error::AppResult;

/// A received picture upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Temporary location of the received bytes
    pub path: PathBuf,
    /// Client-side file name
    pub name: Option<String>,
    /// Declared MIME type
    pub content_type: Option<String>,
}

impl UploadedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            name: None,
            content_type: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// A received video upload; videos stay on disk and are registered by path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedVideo {
    pub path: PathBuf,
    /// Name the transport stored the file under
    pub filename: Option<String>,
    /// Client-side file name
    pub original_name: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
pub trait FileTransfer: Send + Sync {
    /// Read the whole file into memory
    fn read_file(&self, path: &Path) -> AppResult<Vec<u8>>;

    /// Remove a temporary upload
    fn delete_file(&self, path: &Path) -> AppResult<()>;
}

/// Uploads on the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileTransfer;

impl FileTransfer for LocalFileTransfer {
    fn read_file(&self, path: &Path) -> AppResult<Vec<u8>> {
        Ok(std::fs::read(path)?)
    }

    fn delete_file(&self, path: &Path) -> AppResult<()> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            // Already gone is what we wanted.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
