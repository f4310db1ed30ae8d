use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{ContentStatus, DomainError, DomainResult};

/// A customer testimonial, optionally with a picture and a video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: Uuid,

    /// Store-assigned sequence number; listings are ordered by it
    pub number: i64,

    pub title: Option<String>,
    pub description: Option<String>,
    pub status: ContentStatus,
    pub picture_id: Option<Uuid>,
    pub video_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Feedback {
    pub fn new(title: Option<String>, description: Option<String>, status: ContentStatus) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            number: 0,
            title,
            description,
            status,
            picture_id: None,
            video_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update(
        &mut self,
        title: Option<String>,
        description: Option<String>,
        status: Option<ContentStatus>,
    ) {
        if title.is_some() {
            self.title = title;
        }
        if description.is_some() {
            self.description = description;
        }
        if let Some(status) = status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }
}

pub fn validate_feedback(feedback: &Feedback) -> DomainResult<()> {
    if let Some(title) = &feedback.title {
        if title.trim().is_empty() {
            return Err(DomainError::InvariantViolation(
                "Feedback title cannot be blank".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_keeps_missing_fields() {
        let mut feedback = Feedback::new(
            Some("Great".to_string()),
            Some("Fast install".to_string()),
            ContentStatus::Draft,
        );
        feedback.update(None, Some("Very fast".to_string()), None);

        assert_eq!(feedback.title.as_deref(), Some("Great"));
        assert_eq!(feedback.description.as_deref(), Some("Very fast"));
        assert_eq!(feedback.status, ContentStatus::Draft);
    }

    #[test]
    fn test_blank_title_fails() {
        let feedback = Feedback::new(Some("".to_string()), None, ContentStatus::Draft);
        assert!(validate_feedback(&feedback).is_err());
    }
}
