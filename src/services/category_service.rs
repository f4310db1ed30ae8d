// src/services/category_service.rs
//
// Category orchestration
//
// A category owns three attachment slots: picture, video and icon. The
// read view carries a slug and the totals of every published build in
// the category's areas.

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    aggregate_lists, validate_category, AggregationRules, Category, CategoryChanges,
    CategoryList, ContentStatus,
};
use crate::error::{AppError, AppResult};
use crate::infrastructure::{transliterate_opt, UploadedFile, UploadedVideo};
use crate::repositories::{BuildRepository, CategoryFilter, CategoryRepository};
use crate::services::attachment_service::{replace_attachment, AttachmentService};
use crate::services::views::CategoryView;

#[derive(Debug, Clone, Default)]
pub struct CreateCategoryRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subtitle: Option<String>,
    pub section_id: Option<String>,
    pub list: Option<CategoryList>,
    pub status: ContentStatus,
}

#[derive(Debug, Clone)]
pub struct UpdateCategoryRequest {
    pub category_id: Uuid,
    pub changes: CategoryChanges,
}

/// Uploads accompanying a category write
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryUploads<'a> {
    pub picture: Option<&'a UploadedFile>,
    pub video: Option<&'a UploadedVideo>,
    pub icon: Option<&'a UploadedFile>,
}

pub struct CategoryService {
    category_repo: Arc<dyn CategoryRepository>,
    build_repo: Arc<dyn BuildRepository>,
    attachments: Arc<AttachmentService>,
}

impl CategoryService {
    pub fn new(
        category_repo: Arc<dyn CategoryRepository>,
        build_repo: Arc<dyn BuildRepository>,
        attachments: Arc<AttachmentService>,
    ) -> Self {
        Self {
            category_repo,
            build_repo,
            attachments,
        }
    }

    pub fn list(&self, filter: CategoryFilter) -> AppResult<Vec<CategoryView>> {
        self.category_repo
            .list(filter)?
            .into_iter()
            .map(|category| self.view(category))
            .collect()
    }

    pub fn get(&self, id: Uuid) -> AppResult<Option<CategoryView>> {
        self.category_repo
            .get_by_id(id)?
            .map(|category| self.view(category))
            .transpose()
    }

    pub fn create(
        &self,
        uploads: CategoryUploads<'_>,
        request: CreateCategoryRequest,
    ) -> AppResult<Category> {
        let mut category = Category::new(request.status);
        category.title = request.title;
        category.description = request.description;
        category.subtitle = request.subtitle;
        category.section_id = request.section_id;
        category.list = request.list;

        validate_category(&category)?;

        let mut batch = self.attachments.begin();
        category.picture_id = batch.picture(uploads.picture)?;
        category.video_id = batch.video(uploads.video)?;
        category.icon_picture_id = batch.picture(uploads.icon)?;

        self.category_repo.insert(&category)?;
        batch.commit();

        log::info!("Created category {} ({:?})", category.id, category.title);
        Ok(category)
    }

    pub fn update(
        &self,
        uploads: CategoryUploads<'_>,
        request: UpdateCategoryRequest,
    ) -> AppResult<Category> {
        let mut category = self
            .category_repo
            .get_by_id(request.category_id)?
            .ok_or(AppError::NotFound)?;

        category.apply(request.changes);
        validate_category(&category)?;

        let mut batch = self.attachments.begin();
        let old_picture = replace_attachment(&mut category.picture_id, batch.picture(uploads.picture)?);
        let old_video = replace_attachment(&mut category.video_id, batch.video(uploads.video)?);
        let old_icon = replace_attachment(&mut category.icon_picture_id, batch.picture(uploads.icon)?);

        self.category_repo.update(&category)?;
        batch.commit();

        self.attachments.discard_picture(old_picture);
        self.attachments.discard_video(old_video);
        self.attachments.discard_picture(old_icon);

        log::info!("Updated category {}", category.id);
        Ok(category)
    }

    /// Delete the category, then its attachments.
    pub fn delete(&self, id: Uuid) -> AppResult<Category> {
        let category = self.category_repo.get_by_id(id)?.ok_or(AppError::NotFound)?;

        self.category_repo.delete(id)?;

        self.attachments.discard_picture(category.picture_id);
        self.attachments.discard_video(category.video_id);
        self.attachments.discard_picture(category.icon_picture_id);

        log::info!("Deleted category {}", id);
        Ok(category)
    }

    /// Set the status, keeping the current one when `status` is `None`.
    ///
    /// Returns `None` when the category does not exist.
    pub fn update_status(
        &self,
        id: Uuid,
        status: Option<ContentStatus>,
    ) -> AppResult<Option<CategoryView>> {
        let Some(current) = self.category_repo.get_by_id(id)? else {
            return Ok(None);
        };

        let next = status.unwrap_or(current.status);
        if !self.category_repo.update_status(id, next)? {
            return Ok(None);
        }

        log::info!("Category {} status {} -> {}", id, current.status, next);
        self.get(id)
    }

    fn view(&self, category: Category) -> AppResult<CategoryView> {
        let builds = self
            .build_repo
            .list_for_category(category.id, Some(ContentStatus::Published))?;
        let summary = aggregate_lists(
            builds.iter().map(|build| build.list.as_slice()),
            &AggregationRules::SUMMARY,
        );

        Ok(CategoryView {
            url_title: transliterate_opt(category.title.as_deref()),
            category,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Build, ListItem};
    use crate::repositories::{MockCategoryRepository, SqliteBuildRepository};
    use crate::services::test_fixtures::{attachments_on, upload, Catalog};
    use crate::db::connection::create_test_pool;

    fn service(catalog: &Catalog) -> CategoryService {
        CategoryService::new(
            catalog.categories.clone(),
            catalog.builds.clone(),
            catalog.attachments.clone(),
        )
    }

    fn titled(title: &str) -> CreateCategoryRequest {
        CreateCategoryRequest {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_stores_attachments() {
        let catalog = Catalog::new();
        let service = service(&catalog);
        let picture = upload(b"picture");
        let icon = upload(b"icon");

        let category = service
            .create(
                CategoryUploads {
                    picture: Some(&picture),
                    icon: Some(&icon),
                    video: None,
                },
                titled("Билборды"),
            )
            .unwrap();

        assert!(category.picture_id.is_some());
        assert!(category.icon_picture_id.is_some());
        assert_ne!(category.picture_id, category.icon_picture_id);
        assert_eq!(category.video_id, None);
        assert_eq!(catalog.rows("pictures"), 2);
    }

    #[test]
    fn test_update_replaces_picture() {
        let catalog = Catalog::new();
        let service = service(&catalog);
        let first = upload(b"old");
        let created = service
            .create(
                CategoryUploads {
                    picture: Some(&first),
                    ..Default::default()
                },
                titled("Билборды"),
            )
            .unwrap();
        let old_id = created.picture_id.unwrap();

        let second = upload(b"new");
        let updated = service
            .update(
                CategoryUploads {
                    picture: Some(&second),
                    ..Default::default()
                },
                UpdateCategoryRequest {
                    category_id: created.id,
                    changes: CategoryChanges::default(),
                },
            )
            .unwrap();

        let new_id = updated.picture_id.unwrap();
        assert_ne!(new_id, old_id);
        assert!(catalog.attachments.get_picture(old_id).unwrap().is_none());
        assert_eq!(
            catalog.attachments.get_picture(new_id).unwrap().unwrap().content,
            b"new".to_vec()
        );
        assert_eq!(
            service.get(created.id).unwrap().unwrap().category.picture_id,
            Some(new_id)
        );
    }

    #[test]
    fn test_update_without_upload_keeps_attachment() {
        let catalog = Catalog::new();
        let service = service(&catalog);
        let picture = upload(b"keep");
        let created = service
            .create(
                CategoryUploads {
                    picture: Some(&picture),
                    ..Default::default()
                },
                titled("Пилоны"),
            )
            .unwrap();

        let updated = service
            .update(
                CategoryUploads::default(),
                UpdateCategoryRequest {
                    category_id: created.id,
                    changes: CategoryChanges {
                        subtitle: Some("Городские".to_string()),
                        ..Default::default()
                    },
                },
            )
            .unwrap();

        assert_eq!(updated.picture_id, created.picture_id);
        assert_eq!(updated.title.as_deref(), Some("Пилоны"));
        assert_eq!(catalog.rows("pictures"), 1);
    }

    #[test]
    fn test_update_missing_category_is_not_found() {
        let catalog = Catalog::new();
        let result = service(&catalog).update(
            CategoryUploads::default(),
            UpdateCategoryRequest {
                category_id: Uuid::new_v4(),
                changes: CategoryChanges::default(),
            },
        );
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[test]
    fn test_failed_insert_removes_new_attachments() {
        let pool = create_test_pool();
        let attachments = Arc::new(attachments_on(&pool));

        let mut categories = MockCategoryRepository::new();
        categories
            .expect_insert()
            .returning(|_| Err(AppError::Other("disk full".to_string())));

        let service = CategoryService::new(
            Arc::new(categories),
            Arc::new(SqliteBuildRepository::new(pool.clone())),
            attachments,
        );

        let picture = upload(b"orphan?");
        let result = service.create(
            CategoryUploads {
                picture: Some(&picture),
                ..Default::default()
            },
            titled("Билборды"),
        );

        assert!(result.is_err());
        let remaining: i64 = pool
            .get()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM pictures", [], |row| row.get(0))
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[test]
    fn test_delete_removes_attachments() {
        let catalog = Catalog::new();
        let service = service(&catalog);
        let picture = upload(b"p");
        let icon = upload(b"i");
        let created = service
            .create(
                CategoryUploads {
                    picture: Some(&picture),
                    icon: Some(&icon),
                    video: None,
                },
                titled("Билборды"),
            )
            .unwrap();

        let deleted = service.delete(created.id).unwrap();

        assert_eq!(deleted.id, created.id);
        assert!(service.get(created.id).unwrap().is_none());
        assert_eq!(catalog.rows("pictures"), 0);
    }

    #[test]
    fn test_status_update_preserves_and_soft_misses() {
        let catalog = Catalog::new();
        let service = service(&catalog);
        let created = service
            .create(
                CategoryUploads::default(),
                CreateCategoryRequest {
                    status: ContentStatus::Published,
                    ..titled("Билборды")
                },
            )
            .unwrap();

        let unchanged = service.update_status(created.id, None).unwrap().unwrap();
        assert_eq!(unchanged.category.status, ContentStatus::Published);

        let drafted = service
            .update_status(created.id, Some(ContentStatus::Draft))
            .unwrap()
            .unwrap();
        assert_eq!(drafted.category.status, ContentStatus::Draft);

        assert!(service.update_status(Uuid::new_v4(), None).unwrap().is_none());
    }

    #[test]
    fn test_view_summarizes_published_builds() {
        let catalog = Catalog::new();
        let service = service(&catalog);
        let category = catalog.category("Рекламные щиты");
        let area = catalog.area("Москва");
        let category_area = catalog.category_area(&area, &category);

        let mut published = Build::new(ContentStatus::Published);
        published.category_area_id = Some(category_area.id);
        published.list = vec![ListItem::new("Площадь", "18"), ListItem::new("Площадь", "шт")];
        catalog.builds.insert(&published).unwrap();

        let mut draft = Build::new(ContentStatus::Draft);
        draft.category_area_id = Some(category_area.id);
        draft.list = vec![ListItem::new("Площадь", "100")];
        catalog.builds.insert(&draft).unwrap();

        let view = service.get(category.id).unwrap().unwrap();

        assert_eq!(view.url_title, "reklamnye-shchity");
        assert_eq!(view.summary.len(), 1);
        assert_eq!(view.summary[0].title, "Площадь");
        assert_eq!(view.summary[0].value, 18.0);
    }

    #[test]
    fn test_list_filters_status() {
        let catalog = Catalog::new();
        let service = service(&catalog);
        service.create(CategoryUploads::default(), titled("Черновик")).unwrap();
        catalog.category("Опубликовано");

        let published = service
            .list(CategoryFilter {
                status: Some(ContentStatus::Published),
            })
            .unwrap();

        assert_eq!(published.len(), 1);
        assert_eq!(published[0].url_title, "opublikovano");
    }
}
