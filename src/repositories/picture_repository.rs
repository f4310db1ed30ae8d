// src/repositories/picture_repository.rs
//
// Picture persistence
//
// Pictures are stored whole, content included, and referenced by id from
// their owners. Deleting by an absent id is a no-op.

use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::Picture;
use crate::error::{AppError, AppResult};
use crate::repositories::row_values::{datetime_column, timestamp_param, uuid_column};

#[cfg_attr(test, mockall::automock)]
pub trait PictureRepository: Send + Sync {
    fn insert(&self, picture: &Picture) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Picture>>;
    /// Delete the picture with `id`, if any. Returns the number of rows removed.
    fn delete_many(&self, id: Option<Uuid>) -> AppResult<usize>;
}

pub struct SqlitePictureRepository {
    pool: Arc<ConnectionPool>,
}

impl SqlitePictureRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_picture(row: &Row) -> Result<Picture, rusqlite::Error> {
        Ok(Picture {
            id: uuid_column(row, "id")?,
            content: row.get("content")?,
            name: row.get("name")?,
            content_type: row.get("content_type")?,
            created_at: datetime_column(row, "created_at")?,
        })
    }
}

impl PictureRepository for SqlitePictureRepository {
    fn insert(&self, picture: &Picture) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO pictures (id, content, name, content_type, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                picture.id.to_string(),
                picture.content,
                picture.name,
                picture.content_type,
                timestamp_param(&picture.created_at),
            ],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Picture>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, content, name, content_type, created_at FROM pictures WHERE id = ?1",
        )?;

        match stmt.query_row(params![id.to_string()], Self::row_to_picture) {
            Ok(picture) => Ok(Some(picture)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn delete_many(&self, id: Option<Uuid>) -> AppResult<usize> {
        let Some(id) = id else {
            return Ok(0);
        };

        let conn = self.pool.get()?;
        let removed = conn.execute("DELETE FROM pictures WHERE id = ?1", params![id.to_string()])?;

        Ok(removed)
    }
}
