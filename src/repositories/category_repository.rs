// src/repositories/category_repository.rs
//
// Category persistence
//
// The optional `list` block is a JSON text column, decoded after the row
// is read so malformed text reports the column instead of a row error.

use chrono::Utc;
use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{Category, CategoryList, ContentStatus};
use crate::error::{AppError, AppResult};
use crate::repositories::json_columns::{decode_field, encode_field};
use crate::repositories::row_values::{
    datetime_column, opt_uuid_column, opt_uuid_param, status_column, timestamp_param,
    uuid_column,
};

const CATEGORY_COLUMNS: &str = "id, title, description, subtitle, section_id, picture_id, \
     video_id, icon_picture_id, list, status, created_at, updated_at";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    pub status: Option<ContentStatus>,
}

#[cfg_attr(test, mockall::automock)]
pub trait CategoryRepository: Send + Sync {
    fn list(&self, filter: CategoryFilter) -> AppResult<Vec<Category>>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Category>>;
    fn insert(&self, category: &Category) -> AppResult<()>;
    fn update(&self, category: &Category) -> AppResult<()>;
    /// Returns false when no category has `id`.
    fn update_status(&self, id: Uuid, status: ContentStatus) -> AppResult<bool>;
    fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Row as stored, before the list column is decoded
struct CategoryRecord {
    category: Category,
    list: Option<String>,
}

impl CategoryRecord {
    fn into_category(self) -> AppResult<Category> {
        let mut category = self.category;
        category.list = decode_field::<Option<CategoryList>>("list", self.list.as_deref())?;
        Ok(category)
    }
}

pub struct SqliteCategoryRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteCategoryRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &Row) -> Result<CategoryRecord, rusqlite::Error> {
        Ok(CategoryRecord {
            category: Category {
                id: uuid_column(row, "id")?,
                title: row.get("title")?,
                description: row.get("description")?,
                subtitle: row.get("subtitle")?,
                section_id: row.get("section_id")?,
                picture_id: opt_uuid_column(row, "picture_id")?,
                video_id: opt_uuid_column(row, "video_id")?,
                icon_picture_id: opt_uuid_column(row, "icon_picture_id")?,
                list: None,
                status: status_column(row, "status")?,
                created_at: datetime_column(row, "created_at")?,
                updated_at: datetime_column(row, "updated_at")?,
            },
            list: row.get("list")?,
        })
    }
}

impl CategoryRepository for SqliteCategoryRepository {
    fn list(&self, filter: CategoryFilter) -> AppResult<Vec<Category>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM categories
             WHERE (?1 IS NULL OR status = ?1)
             ORDER BY created_at, rowid",
            CATEGORY_COLUMNS
        ))?;

        let records = stmt
            .query_map(
                params![filter.status.map(|s| s.to_string())],
                Self::row_to_record,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        records.into_iter().map(CategoryRecord::into_category).collect()
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Category>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM categories WHERE id = ?1",
            CATEGORY_COLUMNS
        ))?;

        match stmt.query_row(params![id.to_string()], Self::row_to_record) {
            Ok(record) => record.into_category().map(Some),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn insert(&self, category: &Category) -> AppResult<()> {
        let conn = self.pool.get()?;
        let list = encode_field(category.list.as_ref())?;

        conn.execute(
            "INSERT INTO categories (
                id, title, description, subtitle, section_id, picture_id,
                video_id, icon_picture_id, list, status, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                category.id.to_string(),
                category.title,
                category.description,
                category.subtitle,
                category.section_id,
                opt_uuid_param(category.picture_id),
                opt_uuid_param(category.video_id),
                opt_uuid_param(category.icon_picture_id),
                list,
                category.status.to_string(),
                timestamp_param(&category.created_at),
                timestamp_param(&category.updated_at),
            ],
        )?;

        Ok(())
    }

    fn update(&self, category: &Category) -> AppResult<()> {
        let conn = self.pool.get()?;
        let list = encode_field(category.list.as_ref())?;

        let changed = conn.execute(
            "UPDATE categories SET
                title = ?2, description = ?3, subtitle = ?4, section_id = ?5,
                picture_id = ?6, video_id = ?7, icon_picture_id = ?8, list = ?9,
                status = ?10, updated_at = ?11
             WHERE id = ?1",
            params![
                category.id.to_string(),
                category.title,
                category.description,
                category.subtitle,
                category.section_id,
                opt_uuid_param(category.picture_id),
                opt_uuid_param(category.video_id),
                opt_uuid_param(category.icon_picture_id),
                list,
                category.status.to_string(),
                timestamp_param(&category.updated_at),
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
            "UPDATE categories SET status = ?2, updated_at = ?3 WHERE id = ?1",
            params![id.to_string(), status.to_string(), timestamp_param(&Utc::now())],
        )?;

        Ok(changed > 0)
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let removed = conn.execute("DELETE FROM categories WHERE id = ?1", params![id.to_string()])?;

        if removed == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
