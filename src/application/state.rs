// src/application/state.rs
//
// Application wiring
//
// One pool, one repository per table, services sharing the repositories.
// All fields are Arc-wrapped so the embedding transport can share them
// across request handlers.

use std::sync::Arc;

use crate::db::{create_connection_pool, get_connection, initialize_database, ConnectionPool, DatabaseConfig};
use crate::error::AppResult;
use crate::infrastructure::{FileTransfer, LocalFileTransfer};
use crate::repositories::{
    AreaRepository, BuildRepository, CategoryAreaRepository, CategoryRepository,
    FeedbackRepository, PictureRepository, SqliteAreaRepository, SqliteBuildRepository,
    SqliteCategoryAreaRepository, SqliteCategoryRepository, SqliteFeedbackRepository,
    SqlitePictureRepository, SqliteVideoRepository, VideoRepository,
};
use crate::services::{
    AreaService, AttachmentService, BuildService, CategoryAreaService, CategoryService,
    FeedbackService,
};

pub struct AppState {
    pub pool: Arc<ConnectionPool>,
    pub attachment_service: Arc<AttachmentService>,
    pub area_service: Arc<AreaService>,
    pub category_service: Arc<CategoryService>,
    pub category_area_service: Arc<CategoryAreaService>,
    pub build_service: Arc<BuildService>,
    pub feedback_service: Arc<FeedbackService>,
}

impl AppState {
    /// Wire services over an initialized pool.
    pub fn new(pool: Arc<ConnectionPool>, file_transfer: Arc<dyn FileTransfer>) -> Self {
        // 1. REPOSITORIES
        let area_repo: Arc<dyn AreaRepository> = Arc::new(SqliteAreaRepository::new(pool.clone()));
        let category_repo: Arc<dyn CategoryRepository> =
            Arc::new(SqliteCategoryRepository::new(pool.clone()));
        let category_area_repo: Arc<dyn CategoryAreaRepository> =
            Arc::new(SqliteCategoryAreaRepository::new(pool.clone()));
        let build_repo: Arc<dyn BuildRepository> = Arc::new(SqliteBuildRepository::new(pool.clone()));
        let feedback_repo: Arc<dyn FeedbackRepository> =
            Arc::new(SqliteFeedbackRepository::new(pool.clone()));
        let picture_repo: Arc<dyn PictureRepository> =
            Arc::new(SqlitePictureRepository::new(pool.clone()));
        let video_repo: Arc<dyn VideoRepository> = Arc::new(SqliteVideoRepository::new(pool.clone()));

        // 2. SERVICES
        let attachment_service = Arc::new(AttachmentService::new(
            picture_repo,
            video_repo,
            file_transfer,
        ));
        let area_service = Arc::new(AreaService::new(area_repo.clone()));
        let category_service = Arc::new(CategoryService::new(
            category_repo.clone(),
            build_repo.clone(),
            attachment_service.clone(),
        ));
        let category_area_service = Arc::new(CategoryAreaService::new(
            category_area_repo.clone(),
            area_repo,
            category_repo.clone(),
            build_repo.clone(),
            attachment_service.clone(),
        ));
        let build_service = Arc::new(BuildService::new(
            build_repo,
            category_area_repo,
            category_repo,
            attachment_service.clone(),
        ));
        let feedback_service = Arc::new(FeedbackService::new(
            feedback_repo,
            attachment_service.clone(),
        ));

        Self {
            pool,
            attachment_service,
            area_service,
            category_service,
            category_area_service,
            build_service,
            feedback_service,
        }
    }

    /// Open the configured database, apply the schema and wire services
    /// with uploads read from the local filesystem.
    pub fn open(config: &DatabaseConfig) -> AppResult<Self> {
        let pool = Arc::new(create_connection_pool(config)?);

        {
            let conn = get_connection(&pool)?;
            initialize_database(&conn)?;
        }

        Ok(Self::new(pool, Arc::new(LocalFileTransfer)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::{CreateBuildDto, CreateCategoryAreaDto, UpdateStatusDto};
    use crate::domain::{ContentStatus, ListItem};
    use crate::services::{BuildUploads, CategoryUploads, CreateBuildRequest, CreateCategoryAreaRequest, CreateCategoryRequest};

    fn open_temp() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            path: dir.path().join("catalog").join("adcatalog.db"),
            max_connections: 4,
            busy_timeout_ms: 1000,
        };
        let state = AppState::open(&config).unwrap();
        (dir, state)
    }

    #[test]
    fn test_open_creates_database() {
        let (dir, state) = open_temp();

        assert!(dir.path().join("catalog").join("adcatalog.db").exists());
        assert!(state.feedback_service.list().unwrap().is_empty());
    }

    #[test]
    fn test_catalog_flow_through_dtos() {
        let (_dir, state) = open_temp();

        let area = state.area_service.create("Москва".to_string()).unwrap();
        let category = state
            .category_service
            .create(
                CategoryUploads::default(),
                CreateCategoryRequest {
                    title: Some("Билборды".to_string()),
                    status: ContentStatus::Published,
                    ..Default::default()
                },
            )
            .unwrap();

        let category_area = state
            .category_area_service
            .create(
                None,
                CreateCategoryAreaRequest::try_from(CreateCategoryAreaDto {
                    area_id: area.id.to_string(),
                    category_id: category.id.to_string(),
                    status: Some("PUBLISHED".to_string()),
                })
                .unwrap(),
            )
            .unwrap();

        let build = state
            .build_service
            .create(
                BuildUploads::default(),
                CreateBuildRequest::try_from(CreateBuildDto {
                    name: Some("Щит 1".to_string()),
                    list: Some(vec![ListItem::new("Вид носителя", "Билборд")]),
                    category_area_id: Some(category_area.id.to_string()),
                    ..Default::default()
                })
                .unwrap(),
            )
            .unwrap();

        // Draft builds stay out of the listing until published.
        assert!(state.category_area_service.list(None).unwrap()[0].builds.is_empty());

        let (id, status) = UpdateStatusDto {
            id: build.id.to_string(),
            status: Some("published".to_string()),
        }
        .parse()
        .unwrap();
        state.build_service.update_status(id, status).unwrap().unwrap();

        let views = state.category_area_service.list(Some(category.id)).unwrap();
        assert_eq!(views[0].builds.len(), 1);
        assert_eq!(views[0].list[0].title, "Количество рекламных площадок");
        assert_eq!(views[0].list[0].value, 1.0);

        let json = serde_json::to_value(&views[0]).unwrap();
        assert_eq!(json["urlTitle"], "moskva");
        assert_eq!(json["builds"][0]["urlBuild"], "shchit-1");
        assert_eq!(json["categoryId"], category.id.to_string());
    }
}
