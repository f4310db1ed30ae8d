// src/repositories/area_repository.rs
//
// Area persistence

use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::Area;
use crate::error::{AppError, AppResult};
use crate::repositories::row_values::{datetime_column, timestamp_param, uuid_column};

#[cfg_attr(test, mockall::automock)]
pub trait AreaRepository: Send + Sync {
    fn insert(&self, area: &Area) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Area>>;
    fn list_all(&self) -> AppResult<Vec<Area>>;
}

pub struct SqliteAreaRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteAreaRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_area(row: &Row) -> Result<Area, rusqlite::Error> {
        Ok(Area {
            id: uuid_column(row, "id")?,
            name: row.get("name")?,
            created_at: datetime_column(row, "created_at")?,
        })
    }
}

impl AreaRepository for SqliteAreaRepository {
    fn insert(&self, area: &Area) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO areas (id, name, created_at) VALUES (?1, ?2, ?3)",
            params![area.id.to_string(), area.name, timestamp_param(&area.created_at)],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Area>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT id, name, created_at FROM areas WHERE id = ?1")?;

        match stmt.query_row(params![id.to_string()], Self::row_to_area) {
            Ok(area) => Ok(Some(area)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Area>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT id, name, created_at FROM areas ORDER BY name")?;

        let areas = stmt
            .query_map([], Self::row_to_area)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(areas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::create_test_pool;

    #[test]
    fn test_insert_and_get() {
        let repo = SqliteAreaRepository::new(create_test_pool());
        let area = Area::new("Москва".to_string());

        repo.insert(&area).unwrap();

        let loaded = repo.get_by_id(area.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Москва");
        assert_eq!(loaded.created_at.timestamp(), area.created_at.timestamp());
    }

    #[test]
    fn test_missing_area_is_none() {
        let repo = SqliteAreaRepository::new(create_test_pool());
        assert!(repo.get_by_id(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_list_sorted_by_name() {
        let repo = SqliteAreaRepository::new(create_test_pool());
        repo.insert(&Area::new("Самара".to_string())).unwrap();
        repo.insert(&Area::new("Казань".to_string())).unwrap();

        let names: Vec<String> = repo.list_all().unwrap().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Казань", "Самара"]);
    }
}
