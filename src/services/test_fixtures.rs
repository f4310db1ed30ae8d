// src/services/test_fixtures.rs
//
// Shared setup for service tests: one in-memory catalog, real SQLite
// repositories, uploads written to temporary files.

use std::io::Write;
use std::sync::Arc;

use crate::db::connection::create_test_pool;
use crate::db::ConnectionPool;
use crate::domain::{Area, Category, CategoryArea, ContentStatus};
use crate::infrastructure::{LocalFileTransfer, UploadedFile};
use crate::repositories::{
    AreaRepository, CategoryAreaRepository, CategoryRepository, SqliteAreaRepository,
    SqliteBuildRepository, SqliteCategoryAreaRepository, SqliteCategoryRepository,
    SqliteFeedbackRepository, SqlitePictureRepository, SqliteVideoRepository,
};
use crate::services::AttachmentService;

pub(crate) struct Catalog {
    pub pool: Arc<ConnectionPool>,
    pub areas: Arc<SqliteAreaRepository>,
    pub categories: Arc<SqliteCategoryRepository>,
    pub category_areas: Arc<SqliteCategoryAreaRepository>,
    pub builds: Arc<SqliteBuildRepository>,
    pub feedback: Arc<SqliteFeedbackRepository>,
    pub attachments: Arc<AttachmentService>,
}

impl Catalog {
    pub fn new() -> Self {
        let pool = create_test_pool();
        Self {
            areas: Arc::new(SqliteAreaRepository::new(pool.clone())),
            categories: Arc::new(SqliteCategoryRepository::new(pool.clone())),
            category_areas: Arc::new(SqliteCategoryAreaRepository::new(pool.clone())),
            builds: Arc::new(SqliteBuildRepository::new(pool.clone())),
            feedback: Arc::new(SqliteFeedbackRepository::new(pool.clone())),
            attachments: Arc::new(attachments_on(&pool)),
            pool,
        }
    }

    pub fn rows(&self, table: &str) -> i64 {
        let conn = self.pool.get().unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
            .unwrap()
    }

    pub fn area(&self, name: &str) -> Area {
        let area = Area::new(name.to_string());
        self.areas.insert(&area).unwrap();
        area
    }

    pub fn category(&self, title: &str) -> Category {
        let mut category = Category::new(ContentStatus::Published);
        category.title = Some(title.to_string());
        self.categories.insert(&category).unwrap();
        category
    }

    pub fn category_area(&self, area: &Area, category: &Category) -> CategoryArea {
        let category_area = CategoryArea::new(area.id, category.id, ContentStatus::Published);
        self.category_areas.insert(&category_area).unwrap();
        category_area
    }
}

pub(crate) fn attachments_on(pool: &Arc<ConnectionPool>) -> AttachmentService {
    AttachmentService::new(
        Arc::new(SqlitePictureRepository::new(pool.clone())),
        Arc::new(SqliteVideoRepository::new(pool.clone())),
        Arc::new(LocalFileTransfer),
    )
}

/// A picture upload backed by a real temporary file
pub(crate) fn upload(bytes: &[u8]) -> UploadedFile {
    let mut temp = tempfile::NamedTempFile::new().unwrap();
    temp.write_all(bytes).unwrap();
    let path = temp.into_temp_path().keep().unwrap();
    UploadedFile::new(path).with_content_type("image/jpeg")
}
