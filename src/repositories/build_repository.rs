// src/repositories/build_repository.rs
//
// Build persistence
//
// Coordinates, the itemized list and the build-area polygon are JSON text
// columns. `number` is assigned by the store on insert and never reused.

use chrono::Utc;
use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{Build, ContentStatus};
use crate::error::{AppError, AppResult};
use crate::repositories::json_columns::{decode_field, encode_field};
use crate::repositories::row_values::{
    datetime_column, opt_uuid_column, opt_uuid_param, status_column, timestamp_param,
    uuid_column,
};
use crate::repositories::sequences::{next_value, BUILD_NUMBERS};

const BUILD_COLUMNS: &str = "b.id, b.number, b.name, b.coordinates, b.w_description, \
     b.g_title, b.g_sub_title, b.list, b.build_area_coordinates, b.status, \
     b.category_area_id, b.picture_id, b.icon_picture_id, b.seo_title, \
     b.seo_description, b.created_at, b.updated_at";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildFilter {
    pub category_area_id: Option<Uuid>,
    pub status: Option<ContentStatus>,
}

#[cfg_attr(test, mockall::automock)]
pub trait BuildRepository: Send + Sync {
    /// Builds ordered by number.
    fn list(&self, filter: BuildFilter) -> AppResult<Vec<Build>>;
    /// Builds of every category-area of one category, ordered by number.
    fn list_for_category(
        &self,
        category_id: Uuid,
        status: Option<ContentStatus>,
    ) -> AppResult<Vec<Build>>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Build>>;
    /// Stores the build and returns the number assigned to it.
    fn insert(&self, build: &Build) -> AppResult<i64>;
    fn update(&self, build: &Build) -> AppResult<()>;
    fn update_status(&self, id: Uuid, status: ContentStatus) -> AppResult<bool>;
    fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Row as stored, before the JSON columns are decoded
struct BuildRecord {
    build: Build,
    coordinates: Option<String>,
    list: Option<String>,
    build_area_coordinates: Option<String>,
}

impl BuildRecord {
    fn into_build(self) -> AppResult<Build> {
        let mut build = self.build;
        build.coordinates = decode_field("coordinates", self.coordinates.as_deref())?;
        build.list = decode_field("list", self.list.as_deref())?;
        build.build_area_coordinates =
            decode_field("build_area_coordinates", self.build_area_coordinates.as_deref())?;
        Ok(build)
    }
}

/// Encoded JSON columns of a build about to be written
struct EncodedColumns {
    coordinates: Option<String>,
    list: Option<String>,
    build_area_coordinates: Option<String>,
}

impl EncodedColumns {
    fn of(build: &Build) -> AppResult<Self> {
        Ok(Self {
            coordinates: encode_field(Some(&build.coordinates))?,
            list: encode_field(Some(&build.list))?,
            build_area_coordinates: encode_field(Some(&build.build_area_coordinates))?,
        })
    }
}

pub struct SqliteBuildRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteBuildRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &Row) -> Result<BuildRecord, rusqlite::Error> {
        Ok(BuildRecord {
            build: Build {
                id: uuid_column(row, "id")?,
                number: row.get("number")?,
                name: row.get("name")?,
                coordinates: Vec::new(),
                w_description: row.get("w_description")?,
                g_title: row.get("g_title")?,
                g_sub_title: row.get("g_sub_title")?,
                list: Vec::new(),
                build_area_coordinates: Vec::new(),
                status: status_column(row, "status")?,
                category_area_id: opt_uuid_column(row, "category_area_id")?,
                picture_id: opt_uuid_column(row, "picture_id")?,
                icon_picture_id: opt_uuid_column(row, "icon_picture_id")?,
                seo_title: row.get("seo_title")?,
                seo_description: row.get("seo_description")?,
                created_at: datetime_column(row, "created_at")?,
                updated_at: datetime_column(row, "updated_at")?,
            },
            coordinates: row.get("coordinates")?,
            list: row.get("list")?,
            build_area_coordinates: row.get("build_area_coordinates")?,
        })
    }

    fn decode_all(records: Vec<BuildRecord>) -> AppResult<Vec<Build>> {
        records.into_iter().map(BuildRecord::into_build).collect()
    }
}

impl BuildRepository for SqliteBuildRepository {
    fn list(&self, filter: BuildFilter) -> AppResult<Vec<Build>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM builds b
             WHERE (?1 IS NULL OR b.category_area_id = ?1)
               AND (?2 IS NULL OR b.status = ?2)
             ORDER BY b.number",
            BUILD_COLUMNS
        ))?;

        let records = stmt
            .query_map(
                params![
                    opt_uuid_param(filter.category_area_id),
                    filter.status.map(|s| s.to_string()),
                ],
                Self::row_to_record,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Self::decode_all(records)
    }

    fn list_for_category(
        &self,
        category_id: Uuid,
        status: Option<ContentStatus>,
    ) -> AppResult<Vec<Build>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM builds b
             JOIN category_areas ca ON ca.id = b.category_area_id
             WHERE ca.category_id = ?1
               AND (?2 IS NULL OR b.status = ?2)
             ORDER BY b.number",
            BUILD_COLUMNS
        ))?;

        let records = stmt
            .query_map(
                params![category_id.to_string(), status.map(|s| s.to_string())],
                Self::row_to_record,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Self::decode_all(records)
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Build>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM builds b WHERE b.id = ?1",
            BUILD_COLUMNS
        ))?;

        match stmt.query_row(params![id.to_string()], Self::row_to_record) {
            Ok(record) => record.into_build().map(Some),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn insert(&self, build: &Build) -> AppResult<i64> {
        let mut conn = self.pool.get()?;
        let encoded = EncodedColumns::of(build)?;

        let tx = conn.transaction()?;
        let number = next_value(&tx, BUILD_NUMBERS)?;

        tx.execute(
            "INSERT INTO builds (
                id, number, name, coordinates, w_description, g_title, g_sub_title,
                list, build_area_coordinates, status, category_area_id, picture_id,
                icon_picture_id, seo_title, seo_description, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
            params![
                build.id.to_string(),
                number,
                build.name,
                encoded.coordinates,
                build.w_description,
                build.g_title,
                build.g_sub_title,
                encoded.list,
                encoded.build_area_coordinates,
                build.status.to_string(),
                opt_uuid_param(build.category_area_id),
                opt_uuid_param(build.picture_id),
                opt_uuid_param(build.icon_picture_id),
                build.seo_title,
                build.seo_description,
                timestamp_param(&build.created_at),
                timestamp_param(&build.updated_at),
            ],
        )?;
        tx.commit()?;

        Ok(number)
    }

    fn update(&self, build: &Build) -> AppResult<()> {
        let conn = self.pool.get()?;
        let encoded = EncodedColumns::of(build)?;

        let changed = conn.execute(
            "UPDATE builds SET
                name = ?2, coordinates = ?3, w_description = ?4, g_title = ?5,
                g_sub_title = ?6, list = ?7, build_area_coordinates = ?8, status = ?9,
                category_area_id = ?10, picture_id = ?11, icon_picture_id = ?12,
                seo_title = ?13, seo_description = ?14, updated_at = ?15
             WHERE id = ?1",
            params![
                build.id.to_string(),
                build.name,
                encoded.coordinates,
                build.w_description,
                build.g_title,
                build.g_sub_title,
                encoded.list,
                encoded.build_area_coordinates,
                build.status.to_string(),
                opt_uuid_param(build.category_area_id),
                opt_uuid_param(build.picture_id),
                opt_uuid_param(build.icon_picture_id),
                build.seo_title,
                build.seo_description,
                timestamp_param(&build.updated_at),
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
            "UPDATE builds SET status = ?2, updated_at = ?3 WHERE id = ?1",
            params![id.to_string(), status.to_string(), timestamp_param(&Utc::now())],
        )?;

        Ok(changed > 0)
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let removed = conn.execute("DELETE FROM builds WHERE id = ?1", params![id.to_string()])?;

        if removed == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::create_test_pool;
    use crate::domain::{Area, Category, CategoryArea, ListItem};
    use crate::repositories::{
        AreaRepository, CategoryAreaRepository, CategoryRepository, SqliteAreaRepository,
        SqliteCategoryAreaRepository, SqliteCategoryRepository,
    };

    fn seed_category_area(pool: &Arc<ConnectionPool>, category: &Category) -> CategoryArea {
        let area = Area::new("Москва".to_string());
        SqliteAreaRepository::new(pool.clone()).insert(&area).unwrap();

        let category_area = CategoryArea::new(area.id, category.id, ContentStatus::Published);
        SqliteCategoryAreaRepository::new(pool.clone())
            .insert(&category_area)
            .unwrap();
        category_area
    }

    fn seed_category(pool: &Arc<ConnectionPool>) -> Category {
        let category = Category::new(ContentStatus::Published);
        SqliteCategoryRepository::new(pool.clone()).insert(&category).unwrap();
        category
    }

    fn build_in(category_area: Option<&CategoryArea>, status: ContentStatus) -> Build {
        let mut build = Build::new(status);
        build.name = Some("Щит на Тверской".to_string());
        build.category_area_id = category_area.map(|ca| ca.id);
        build
    }

    #[test]
    fn test_structured_fields_round_trip() {
        let repo = SqliteBuildRepository::new(create_test_pool());
        let mut build = build_in(None, ContentStatus::Draft);
        build.coordinates = vec![[55.7575, 37.6130]];
        build.build_area_coordinates = vec![[55.75, 37.61], [55.76, 37.61], [55.76, 37.62]];
        build.list = vec![ListItem::new("Площадь", "18 м²"), ListItem::new("Стороны", "2")];

        repo.insert(&build).unwrap();

        let loaded = repo.get_by_id(build.id).unwrap().unwrap();
        assert_eq!(loaded.coordinates, build.coordinates);
        assert_eq!(loaded.build_area_coordinates, build.build_area_coordinates);
        assert_eq!(loaded.list, build.list);
    }

    #[test]
    fn test_null_columns_decode_empty() {
        let pool = create_test_pool();
        let repo = SqliteBuildRepository::new(pool.clone());
        let build = build_in(None, ContentStatus::Draft);
        repo.insert(&build).unwrap();

        pool.get()
            .unwrap()
            .execute(
                "UPDATE builds SET coordinates = NULL, list = NULL WHERE id = ?1",
                params![build.id.to_string()],
            )
            .unwrap();

        let loaded = repo.get_by_id(build.id).unwrap().unwrap();
        assert!(loaded.coordinates.is_empty());
        assert!(loaded.list.is_empty());
    }

    #[test]
    fn test_malformed_coordinates_fail_the_read() {
        let pool = create_test_pool();
        let repo = SqliteBuildRepository::new(pool.clone());
        let build = build_in(None, ContentStatus::Draft);
        repo.insert(&build).unwrap();

        pool.get()
            .unwrap()
            .execute(
                "UPDATE builds SET coordinates = 'not json' WHERE id = ?1",
                params![build.id.to_string()],
            )
            .unwrap();

        assert!(matches!(
            repo.list(BuildFilter::default()),
            Err(AppError::MalformedStoredData { column: "coordinates", .. })
        ));
    }

    #[test]
    fn test_numbers_are_sequential() {
        let repo = SqliteBuildRepository::new(create_test_pool());
        let first = build_in(None, ContentStatus::Draft);
        let second = build_in(None, ContentStatus::Draft);

        assert_eq!(repo.insert(&first).unwrap(), 1);
        assert_eq!(repo.insert(&second).unwrap(), 2);
        assert_eq!(repo.get_by_id(second.id).unwrap().unwrap().number, 2);
    }

    #[test]
    fn test_number_of_deleted_build_is_not_reissued() {
        let repo = SqliteBuildRepository::new(create_test_pool());
        let first = build_in(None, ContentStatus::Draft);
        let newest = build_in(None, ContentStatus::Draft);
        repo.insert(&first).unwrap();
        let newest_number = repo.insert(&newest).unwrap();

        repo.delete(newest.id).unwrap();

        let next = build_in(None, ContentStatus::Draft);
        let next_number = repo.insert(&next).unwrap();
        assert!(next_number > newest_number, "{} reissued", newest_number);
        assert_eq!(repo.get_by_id(next.id).unwrap().unwrap().number, 3);
    }

    #[test]
    fn test_failed_insert_does_not_consume_a_number() {
        let repo = SqliteBuildRepository::new(create_test_pool());
        let first = build_in(None, ContentStatus::Draft);
        repo.insert(&first).unwrap();

        // duplicate primary key
        assert!(repo.insert(&first).is_err());

        assert_eq!(repo.insert(&build_in(None, ContentStatus::Draft)).unwrap(), 2);
    }

    #[test]
    fn test_filters() {
        let pool = create_test_pool();
        let repo = SqliteBuildRepository::new(pool.clone());
        let category = seed_category(&pool);
        let category_area = seed_category_area(&pool, &category);

        repo.insert(&build_in(Some(&category_area), ContentStatus::Published)).unwrap();
        repo.insert(&build_in(Some(&category_area), ContentStatus::Draft)).unwrap();
        repo.insert(&build_in(None, ContentStatus::Published)).unwrap();

        let in_area = repo
            .list(BuildFilter {
                category_area_id: Some(category_area.id),
                status: None,
            })
            .unwrap();
        assert_eq!(in_area.len(), 2);

        let published_in_area = repo
            .list(BuildFilter {
                category_area_id: Some(category_area.id),
                status: Some(ContentStatus::Published),
            })
            .unwrap();
        assert_eq!(published_in_area.len(), 1);

        let for_category = repo
            .list_for_category(category.id, Some(ContentStatus::Published))
            .unwrap();
        assert_eq!(for_category.len(), 1);

        assert_eq!(repo.list(BuildFilter::default()).unwrap().len(), 3);
    }

    #[test]
    fn test_deleting_category_area_detaches_builds() {
        let pool = create_test_pool();
        let repo = SqliteBuildRepository::new(pool.clone());
        let category = seed_category(&pool);
        let category_area = seed_category_area(&pool, &category);
        let build = build_in(Some(&category_area), ContentStatus::Published);
        repo.insert(&build).unwrap();

        SqliteCategoryAreaRepository::new(pool.clone())
            .delete(category_area.id)
            .unwrap();

        let loaded = repo.get_by_id(build.id).unwrap().unwrap();
        assert_eq!(loaded.category_area_id, None);
    }

    #[test]
    fn test_update_status_delete() {
        let repo = SqliteBuildRepository::new(create_test_pool());
        let mut build = build_in(None, ContentStatus::Draft);
        repo.insert(&build).unwrap();

        build.g_title = Some("Billboard 6x3".to_string());
        repo.update(&build).unwrap();
        assert!(repo.update_status(build.id, ContentStatus::Published).unwrap());

        let loaded = repo.get_by_id(build.id).unwrap().unwrap();
        assert_eq!(loaded.g_title.as_deref(), Some("Billboard 6x3"));
        assert!(loaded.status.is_published());

        repo.delete(build.id).unwrap();
        assert!(matches!(repo.update(&build), Err(AppError::NotFound)));
        assert!(matches!(repo.delete(build.id), Err(AppError::NotFound)));
    }
}
