// src/repositories/feedback_repository.rs
//
// Feedback persistence

use chrono::Utc;
use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{ContentStatus, Feedback};
use crate::error::{AppError, AppResult};
use crate::repositories::row_values::{
    datetime_column, opt_uuid_column, opt_uuid_param, status_column, timestamp_param,
    uuid_column,
};
use crate::repositories::sequences::{next_value, FEEDBACK_NUMBERS};

#[cfg_attr(test, mockall::automock)]
pub trait FeedbackRepository: Send + Sync {
    /// All feedback ordered by number.
    fn list_all(&self) -> AppResult<Vec<Feedback>>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Feedback>>;
    /// Stores the feedback and returns the number assigned to it.
    fn insert(&self, feedback: &Feedback) -> AppResult<i64>;
    fn update(&self, feedback: &Feedback) -> AppResult<()>;
    fn update_status(&self, id: Uuid, status: ContentStatus) -> AppResult<bool>;
    fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct SqliteFeedbackRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteFeedbackRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_feedback(row: &Row) -> Result<Feedback, rusqlite::Error> {
        Ok(Feedback {
            id: uuid_column(row, "id")?,
            number: row.get("number")?,
            title: row.get("title")?,
            description: row.get("description")?,
            status: status_column(row, "status")?,
            picture_id: opt_uuid_column(row, "picture_id")?,
            video_id: opt_uuid_column(row, "video_id")?,
            created_at: datetime_column(row, "created_at")?,
            updated_at: datetime_column(row, "updated_at")?,
        })
    }
}

impl FeedbackRepository for SqliteFeedbackRepository {
    fn list_all(&self) -> AppResult<Vec<Feedback>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, number, title, description, status, picture_id, video_id,
                    created_at, updated_at
             FROM feedback
             ORDER BY number",
        )?;

        let feedback = stmt
            .query_map([], Self::row_to_feedback)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(feedback)
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Feedback>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, number, title, description, status, picture_id, video_id,
                    created_at, updated_at
             FROM feedback WHERE id = ?1",
        )?;

        match stmt.query_row(params![id.to_string()], Self::row_to_feedback) {
            Ok(feedback) => Ok(Some(feedback)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn insert(&self, feedback: &Feedback) -> AppResult<i64> {
        let mut conn = self.pool.get()?;

        let tx = conn.transaction()?;
        let number = next_value(&tx, FEEDBACK_NUMBERS)?;

        tx.execute(
            "INSERT INTO feedback (
                id, number, title, description, status, picture_id, video_id,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                feedback.id.to_string(),
                number,
                feedback.title,
                feedback.description,
                feedback.status.to_string(),
                opt_uuid_param(feedback.picture_id),
                opt_uuid_param(feedback.video_id),
                timestamp_param(&feedback.created_at),
                timestamp_param(&feedback.updated_at),
            ],
        )?;
        tx.commit()?;

        Ok(number)
    }

    fn update(&self, feedback: &Feedback) -> AppResult<()> {
        let conn = self.pool.get()?;

        let changed = conn.execute(
            "UPDATE feedback SET
                title = ?2, description = ?3, status = ?4, picture_id = ?5,
                video_id = ?6, updated_at = ?7
             WHERE id = ?1",
            params![
                feedback.id.to_string(),
                feedback.title,
                feedback.description,
                feedback.status.to_string(),
                opt_uuid_param(feedback.picture_id),
                opt_uuid_param(feedback.video_id),
                timestamp_param(&feedback.updated_at),
            ],
        )?;

        if changed == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn update_status(&self, id: Uuid, status: ContentStatus) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let changed = conn.execute(
            "UPDATE feedback SET status = ?2, updated_at = ?3 WHERE id = ?1",
            params![id.to_string(), status.to_string(), timestamp_param(&Utc::now())],
        )?;

        Ok(changed > 0)
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let removed = conn.execute("DELETE FROM feedback WHERE id = ?1", params![id.to_string()])?;

        if removed == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
