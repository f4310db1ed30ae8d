// src/infrastructure/mod.rs
//
// Infrastructure Layer
//
// Collaborators that support the services but hold no catalog data:
// slug generation and the uploaded-file hand-off.
//
// RULES:
// - Infrastructure serves the domain
// - Infrastructure never dictates domain behavior
// - Infrastructure is replaceable

pub mod file_transfer;
pub mod transliteration;

pub use file_transfer::{FileTransfer, LocalFileTransfer, UploadedFile, UploadedVideo};
pub use transliteration::{transliterate, transliterate_opt};

#[cfg(test)]
pub use file_transfer::MockFileTransfer;
