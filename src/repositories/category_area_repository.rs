// src/repositories/category_area_repository.rs
//
// CategoryArea persistence

use chrono::Utc;
use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{CategoryArea, ContentStatus};
use crate::error::{AppError, AppResult};
use crate::repositories::row_values::{
    datetime_column, opt_uuid_column, opt_uuid_param, status_column, timestamp_param,
    uuid_column,
};

#[cfg_attr(test, mockall::automock)]
pub trait CategoryAreaRepository: Send + Sync {
    /// Category-areas in creation order, optionally limited to one category.
    fn list(&self, category_id: Option<Uuid>) -> AppResult<Vec<CategoryArea>>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<CategoryArea>>;
    fn insert(&self, category_area: &CategoryArea) -> AppResult<()>;
    fn update(&self, category_area: &CategoryArea) -> AppResult<()>;
    fn update_status(&self, id: Uuid, status: ContentStatus) -> AppResult<bool>;
    fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct SqliteCategoryAreaRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteCategoryAreaRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_category_area(row: &Row) -> Result<CategoryArea, rusqlite::Error> {
        Ok(CategoryArea {
            id: uuid_column(row, "id")?,
            area_id: uuid_column(row, "area_id")?,
            category_id: uuid_column(row, "category_id")?,
            picture_id: opt_uuid_column(row, "picture_id")?,
            status: status_column(row, "status")?,
            created_at: datetime_column(row, "created_at")?,
            updated_at: datetime_column(row, "updated_at")?,
        })
    }
}

impl CategoryAreaRepository for SqliteCategoryAreaRepository {
    fn list(&self, category_id: Option<Uuid>) -> AppResult<Vec<CategoryArea>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, area_id, category_id, picture_id, status, created_at, updated_at
             FROM category_areas
             WHERE (?1 IS NULL OR category_id = ?1)
             ORDER BY created_at, rowid",
        )?;

        let category_areas = stmt
            .query_map(params![opt_uuid_param(category_id)], Self::row_to_category_area)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(category_areas)
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<CategoryArea>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, area_id, category_id, picture_id, status, created_at, updated_at
             FROM category_areas WHERE id = ?1",
        )?;

        match stmt.query_row(params![id.to_string()], Self::row_to_category_area) {
            Ok(category_area) => Ok(Some(category_area)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn insert(&self, category_area: &CategoryArea) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO category_areas (
                id, area_id, category_id, picture_id, status, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                category_area.id.to_string(),
                category_area.area_id.to_string(),
                category_area.category_id.to_string(),
                opt_uuid_param(category_area.picture_id),
                category_area.status.to_string(),
                timestamp_param(&category_area.created_at),
                timestamp_param(&category_area.updated_at),
            ],
        )?;

        Ok(())
    }

    fn update(&self, category_area: &CategoryArea) -> AppResult<()> {
        let conn = self.pool.get()?;

        let changed = conn.execute(
            "UPDATE category_areas SET
                area_id = ?2, category_id = ?3, picture_id = ?4, status = ?5, updated_at = ?6
             WHERE id = ?1",
            params![
                category_area.id.to_string(),
                category_area.area_id.to_string(),
                category_area.category_id.to_string(),
                opt_uuid_param(category_area.picture_id),
                category_area.status.to_string(),
                timestamp_param(&category_area.updated_at),
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
            "UPDATE category_areas SET status = ?2, updated_at = ?3 WHERE id = ?1",
            params![id.to_string(), status.to_string(), timestamp_param(&Utc::now())],
        )?;

        Ok(changed > 0)
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let removed = conn.execute(
            "DELETE FROM category_areas WHERE id = ?1",
            params![id.to_string()],
        )?;

        if removed == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
