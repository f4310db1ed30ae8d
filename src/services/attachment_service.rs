// src/services/attachment_service.rs
//
// Attachment lifecycle
//
// RULES:
// - An upload is read whole, stored, then its temporary file is removed
// - Attachments stored for an owner write live in an `AttachmentBatch`;
//   a batch dropped without `commit` removes what it stored
// - Superseded attachments are removed only after the owner write succeeded
// - Removal after the fact is best-effort: failures are logged, not returned

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Picture, Video};
use crate::error::AppResult;
use crate::infrastructure::{FileTransfer, UploadedFile, UploadedVideo};
use crate::repositories::{PictureRepository, VideoRepository};

pub struct AttachmentService {
    picture_repo: Arc<dyn PictureRepository>,
    video_repo: Arc<dyn VideoRepository>,
    file_transfer: Arc<dyn FileTransfer>,
}

impl AttachmentService {
    pub fn new(
        picture_repo: Arc<dyn PictureRepository>,
        video_repo: Arc<dyn VideoRepository>,
        file_transfer: Arc<dyn FileTransfer>,
    ) -> Self {
        Self {
            picture_repo,
            video_repo,
            file_transfer,
        }
    }

    /// Store an uploaded picture. No upload, no picture.
    pub fn store_picture(&self, upload: Option<&UploadedFile>) -> AppResult<Option<Picture>> {
        let Some(upload) = upload else {
            return Ok(None);
        };

        let content = self.file_transfer.read_file(&upload.path)?;
        let picture = Picture::new(content, upload.name.clone(), upload.content_type.clone());
        self.picture_repo.insert(&picture)?;

        log::info!(
            "Stored picture {} ({} bytes, {})",
            picture.id,
            picture.size(),
            picture.content_type
        );

        if let Err(e) = self.file_transfer.delete_file(&upload.path) {
            log::warn!(
                "Failed to remove temporary upload {}: {}",
                upload.path.display(),
                e
            );
        }

        Ok(Some(picture))
    }

    /// Register an uploaded video by its stored path.
    pub fn store_video(&self, upload: Option<&UploadedVideo>) -> AppResult<Option<Video>> {
        let Some(upload) = upload else {
            return Ok(None);
        };

        let video = Video::new(
            upload.path.to_string_lossy().into_owned(),
            upload.filename.clone(),
            upload.original_name.clone(),
        );
        self.video_repo.insert(&video)?;

        log::info!("Registered video {} at {}", video.id, video.path);

        Ok(Some(video))
    }

    pub fn get_picture(&self, id: Uuid) -> AppResult<Option<Picture>> {
        self.picture_repo.get_by_id(id)
    }

    pub fn get_video(&self, id: Uuid) -> AppResult<Option<Video>> {
        self.video_repo.get_by_id(id)
    }

    /// Delete a picture by id; `None` is a no-op.
    pub fn delete_picture(&self, id: Option<Uuid>) -> AppResult<usize> {
        let removed = self.picture_repo.delete_many(id)?;
        if removed > 0 {
            log::debug!("Deleted picture {:?}", id);
        }
        Ok(removed)
    }

    /// Delete a video by id; `None` is a no-op.
    pub fn delete_video(&self, id: Option<Uuid>) -> AppResult<usize> {
        let removed = self.video_repo.delete_many(id)?;
        if removed > 0 {
            log::debug!("Deleted video {:?}", id);
        }
        Ok(removed)
    }

    /// Best-effort `delete_picture`.
    pub fn discard_picture(&self, id: Option<Uuid>) {
        if let Err(e) = self.delete_picture(id) {
            log::warn!("Failed to delete picture {:?}: {}", id, e);
        }
    }

    /// Best-effort `delete_video`.
    pub fn discard_video(&self, id: Option<Uuid>) {
        if let Err(e) = self.delete_video(id) {
            log::warn!("Failed to delete video {:?}: {}", id, e);
        }
    }

    /// Start collecting the attachments of one owner write.
    pub fn begin(&self) -> AttachmentBatch<'_> {
        AttachmentBatch {
            attachments: self,
            pictures: Vec::new(),
            videos: Vec::new(),
            committed: false,
        }
    }
}

/// Attachments stored ahead of an owner write.
///
/// Dropping the batch without calling [`AttachmentBatch::commit`] deletes
/// everything it stored, so an early `?` return from the owner write leaves
/// no orphaned attachments behind.
pub struct AttachmentBatch<'a> {
    attachments: &'a AttachmentService,
    pictures: Vec<Uuid>,
    videos: Vec<Uuid>,
    committed: bool,
}

impl AttachmentBatch<'_> {
    /// Store an uploaded picture as part of this batch.
    pub fn picture(&mut self, upload: Option<&UploadedFile>) -> AppResult<Option<Uuid>> {
        let stored = self.attachments.store_picture(upload)?.map(|picture| picture.id);
        self.pictures.extend(stored);
        Ok(stored)
    }

    /// Register an uploaded video as part of this batch.
    pub fn video(&mut self, upload: Option<&UploadedVideo>) -> AppResult<Option<Uuid>> {
        let stored = self.attachments.store_video(upload)?.map(|video| video.id);
        self.videos.extend(stored);
        Ok(stored)
    }

    /// The owner write succeeded; keep the stored attachments.
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for AttachmentBatch<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }

        for id in self.pictures.drain(..) {
            log::warn!("Removing picture {} stored for a failed write", id);
            self.attachments.discard_picture(Some(id));
        }
        for id in self.videos.drain(..) {
            log::warn!("Removing video {} stored for a failed write", id);
            self.attachments.discard_video(Some(id));
        }
    }
}

/// Point an attachment slot at a newly stored attachment.
///
/// Returns the id the slot held before, which the caller deletes once the
/// owner is saved. An empty upload leaves the slot alone and returns `None`.
pub fn replace_attachment(slot: &mut Option<Uuid>, stored: Option<Uuid>) -> Option<Uuid> {
    match stored {
        Some(id) => std::mem::replace(slot, Some(id)),
        None => None,
    }
}
