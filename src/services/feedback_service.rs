// src/services/feedback_service.rs
//
// Feedback orchestration
//
// Feedback entries carry a picture and a video. Both are removed with
// the entry.

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{validate_feedback, ContentStatus, Feedback};
use crate::error::{AppError, AppResult};
use crate::infrastructure::{UploadedFile, UploadedVideo};
use crate::repositories::FeedbackRepository;
use crate::services::attachment_service::{replace_attachment, AttachmentService};

#[derive(Debug, Clone, Default)]
pub struct CreateFeedbackRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: ContentStatus,
}

#[derive(Debug, Clone)]
pub struct UpdateFeedbackRequest {
    pub feedback_id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ContentStatus>,
}

/// Uploads accompanying a feedback write
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedbackUploads<'a> {
    pub picture: Option<&'a UploadedFile>,
    pub video: Option<&'a UploadedVideo>,
}

pub struct FeedbackService {
    feedback_repo: Arc<dyn FeedbackRepository>,
    attachments: Arc<AttachmentService>,
}

impl FeedbackService {
    pub fn new(
        feedback_repo: Arc<dyn FeedbackRepository>,
        attachments: Arc<AttachmentService>,
    ) -> Self {
        Self {
            feedback_repo,
            attachments,
        }
    }

    /// All feedback ordered by number
    pub fn list(&self) -> AppResult<Vec<Feedback>> {
        self.feedback_repo.list_all()
    }

    pub fn get(&self, id: Uuid) -> AppResult<Option<Feedback>> {
        self.feedback_repo.get_by_id(id)
    }

    pub fn create(
        &self,
        uploads: FeedbackUploads<'_>,
        request: CreateFeedbackRequest,
    ) -> AppResult<Feedback> {
        let mut feedback = Feedback::new(request.title, request.description, request.status);
        validate_feedback(&feedback)?;

        let mut batch = self.attachments.begin();
        feedback.picture_id = batch.picture(uploads.picture)?;
        feedback.video_id = batch.video(uploads.video)?;

        feedback.number = self.feedback_repo.insert(&feedback)?;
        batch.commit();

        log::info!("Created feedback {} (#{})", feedback.id, feedback.number);
        Ok(feedback)
    }

    pub fn update(
        &self,
        uploads: FeedbackUploads<'_>,
        request: UpdateFeedbackRequest,
    ) -> AppResult<Feedback> {
        let mut feedback = self
            .feedback_repo
            .get_by_id(request.feedback_id)?
            .ok_or(AppError::NotFound)?;

        feedback.update(request.title, request.description, request.status);
        validate_feedback(&feedback)?;

        let mut batch = self.attachments.begin();
        let old_picture = replace_attachment(&mut feedback.picture_id, batch.picture(uploads.picture)?);
        let old_video = replace_attachment(&mut feedback.video_id, batch.video(uploads.video)?);

        self.feedback_repo.update(&feedback)?;
        batch.commit();

        self.attachments.discard_picture(old_picture);
        self.attachments.discard_video(old_video);

        log::info!("Updated feedback {}", feedback.id);
        Ok(feedback)
    }

    /// Delete the entry, then its picture and video.
    pub fn delete(&self, id: Uuid) -> AppResult<Feedback> {
        let feedback = self.feedback_repo.get_by_id(id)?.ok_or(AppError::NotFound)?;

        self.feedback_repo.delete(id)?;

        self.attachments.discard_picture(feedback.picture_id);
        self.attachments.discard_video(feedback.video_id);

        log::info!("Deleted feedback {} (#{})", feedback.id, feedback.number);
        Ok(feedback)
    }

    pub fn update_status(
        &self,
        id: Uuid,
        status: Option<ContentStatus>,
    ) -> AppResult<Option<Feedback>> {
        let Some(current) = self.feedback_repo.get_by_id(id)? else {
            return Ok(None);
        };

        let next = status.unwrap_or(current.status);
        if !self.feedback_repo.update_status(id, next)? {
            return Ok(None);
        }

        log::info!("Feedback {} status {} -> {}", id, current.status, next);
        self.get(id)
    }
}
