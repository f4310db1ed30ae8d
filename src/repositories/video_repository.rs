// src/repositories/video_repository.rs
//
// Video persistence
//
// Videos are registered by reference: the row keeps the stored path and
// names, not the content.

use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::Video;
use crate::error::{AppError, AppResult};
use crate::repositories::row_values::{datetime_column, timestamp_param, uuid_column};

#[cfg_attr(test, mockall::automock)]
pub trait VideoRepository: Send + Sync {
    fn insert(&self, video: &Video) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Video>>;
    fn delete_many(&self, id: Option<Uuid>) -> AppResult<usize>;
}

pub struct SqliteVideoRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteVideoRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_video(row: &Row) -> Result<Video, rusqlite::Error> {
        Ok(Video {
            id: uuid_column(row, "id")?,
            path: row.get("path")?,
            filename: row.get("filename")?,
            original_name: row.get("original_name")?,
            created_at: datetime_column(row, "created_at")?,
        })
    }
}

impl VideoRepository for SqliteVideoRepository {
    fn insert(&self, video: &Video) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO videos (id, path, filename, original_name, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                video.id.to_string(),
                video.path,
                video.filename,
                video.original_name,
                timestamp_param(&video.created_at),
            ],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Video>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, path, filename, original_name, created_at FROM videos WHERE id = ?1",
        )?;

        match stmt.query_row(params![id.to_string()], Self::row_to_video) {
            Ok(video) => Ok(Some(video)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn delete_many(&self, id: Option<Uuid>) -> AppResult<usize> {
        let Some(id) = id else {
            return Ok(0);
        };

        let conn = self.pool.get()?;
        let removed = conn.execute("DELETE FROM videos WHERE id = ?1", params![id.to_string()])?;

        Ok(removed)
    }
}
