// src/services/category_area_service.rs
//
// CategoryArea orchestration
//
// The listing view is assembled on every read: the area and parent
// category are loaded, published builds are decoded and slugged, and
// their itemized lists are folded with the category-area rules
// (text values count once, carrier type totalled as placements).

use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{aggregate_area_lists, Area, Category, CategoryArea, ContentStatus};
use crate::error::{AppError, AppResult};
use crate::infrastructure::{transliterate_opt, UploadedFile};
use crate::repositories::{
    AreaRepository, BuildFilter, BuildRepository, CategoryAreaRepository, CategoryRepository,
};
use crate::services::attachment_service::{replace_attachment, AttachmentService};
use crate::services::views::{AreaBuildView, CategoryAreaDetail, CategoryAreaView};

#[derive(Debug, Clone)]
pub struct CreateCategoryAreaRequest {
    pub area_id: Uuid,
    pub category_id: Uuid,
    pub status: ContentStatus,
}

#[derive(Debug, Clone)]
pub struct UpdateCategoryAreaRequest {
    pub category_area_id: Uuid,
    pub area_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub status: Option<ContentStatus>,
}

pub struct CategoryAreaService {
    category_area_repo: Arc<dyn CategoryAreaRepository>,
    area_repo: Arc<dyn AreaRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    build_repo: Arc<dyn BuildRepository>,
    attachments: Arc<AttachmentService>,
}

impl CategoryAreaService {
    pub fn new(
        category_area_repo: Arc<dyn CategoryAreaRepository>,
        area_repo: Arc<dyn AreaRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        build_repo: Arc<dyn BuildRepository>,
        attachments: Arc<AttachmentService>,
    ) -> Self {
        Self {
            category_area_repo,
            area_repo,
            category_repo,
            build_repo,
            attachments,
        }
    }

    /// Category-areas in creation order, with their published builds.
    pub fn list(&self, category_id: Option<Uuid>) -> AppResult<Vec<CategoryAreaView>> {
        let mut categories: HashMap<Uuid, Option<Category>> = HashMap::new();

        self.category_area_repo
            .list(category_id)?
            .into_iter()
            .map(|category_area| -> AppResult<CategoryAreaView> {
                let category = self.category_for(&mut categories, category_area.category_id)?;
                self.list_view(category_area, category.as_ref())
            })
            .collect()
    }

    pub fn get(&self, id: Uuid) -> AppResult<Option<CategoryAreaDetail>> {
        self.category_area_repo
            .get_by_id(id)?
            .map(|category_area| self.detail(category_area))
            .transpose()
    }

    pub fn create(
        &self,
        picture: Option<&UploadedFile>,
        request: CreateCategoryAreaRequest,
    ) -> AppResult<CategoryArea> {
        let mut category_area =
            CategoryArea::new(request.area_id, request.category_id, request.status);

        let mut batch = self.attachments.begin();
        category_area.picture_id = batch.picture(picture)?;

        self.category_area_repo.insert(&category_area)?;
        batch.commit();

        log::info!(
            "Created category-area {} (category {}, area {})",
            category_area.id,
            category_area.category_id,
            category_area.area_id
        );
        Ok(category_area)
    }

    pub fn update(
        &self,
        picture: Option<&UploadedFile>,
        request: UpdateCategoryAreaRequest,
    ) -> AppResult<CategoryArea> {
        let mut category_area = self
            .category_area_repo
            .get_by_id(request.category_area_id)?
            .ok_or(AppError::NotFound)?;

        category_area.update(request.area_id, request.category_id, request.status);

        let mut batch = self.attachments.begin();
        let old_picture = replace_attachment(&mut category_area.picture_id, batch.picture(picture)?);

        self.category_area_repo.update(&category_area)?;
        batch.commit();

        self.attachments.discard_picture(old_picture);

        log::info!("Updated category-area {}", category_area.id);
        Ok(category_area)
    }

    /// Delete the category-area, then its picture. Its builds stay, detached.
    pub fn delete(&self, id: Uuid) -> AppResult<CategoryArea> {
        let category_area = self
            .category_area_repo
            .get_by_id(id)?
            .ok_or(AppError::NotFound)?;

        self.category_area_repo.delete(id)?;
        self.attachments.discard_picture(category_area.picture_id);

        log::info!("Deleted category-area {}", id);
        Ok(category_area)
    }

    pub fn update_status(
        &self,
        id: Uuid,
        status: Option<ContentStatus>,
    ) -> AppResult<Option<CategoryAreaDetail>> {
        let Some(current) = self.category_area_repo.get_by_id(id)? else {
            return Ok(None);
        };

        let next = status.unwrap_or(current.status);
        if !self.category_area_repo.update_status(id, next)? {
            return Ok(None);
        }

        log::info!("Category-area {} status {} -> {}", id, current.status, next);
        self.get(id)
    }

    fn category_for(
        &self,
        cache: &mut HashMap<Uuid, Option<Category>>,
        id: Uuid,
    ) -> AppResult<Option<Category>> {
        if let Some(category) = cache.get(&id) {
            return Ok(category.clone());
        }
        let category = self.category_repo.get_by_id(id)?;
        cache.insert(id, category.clone());
        Ok(category)
    }

    fn area_of(&self, category_area: &CategoryArea) -> AppResult<Option<Area>> {
        self.area_repo.get_by_id(category_area.area_id)
    }

    fn detail(&self, category_area: CategoryArea) -> AppResult<CategoryAreaDetail> {
        let area = self.area_of(&category_area)?;

        Ok(CategoryAreaDetail {
            url_title: transliterate_opt(area.as_ref().map(|a| a.name.as_str())),
            category_area,
            area,
        })
    }

    fn list_view(
        &self,
        category_area: CategoryArea,
        category: Option<&Category>,
    ) -> AppResult<CategoryAreaView> {
        let area = self.area_of(&category_area)?;
        let builds = self.build_repo.list(BuildFilter {
            category_area_id: Some(category_area.id),
            status: Some(ContentStatus::Published),
        })?;

        let list = aggregate_area_lists(builds.iter().map(|build| build.list.as_slice()));

        let url_title = transliterate_opt(area.as_ref().map(|a| a.name.as_str()));
        let url_category = transliterate_opt(category.and_then(|c| c.title.as_deref()));
        let category_icon_picture_id = category.and_then(|c| c.icon_picture_id);

        let builds = builds
            .into_iter()
            .map(|build| AreaBuildView {
                url_build: transliterate_opt(build.name.as_deref()),
                url_category: url_category.clone(),
                url_category_area: url_title.clone(),
                category_icon_picture_id,
                build,
            })
            .collect();

        Ok(CategoryAreaView {
            category_area,
            area,
            url_title,
            builds,
            list,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Build, ListItem, CARRIER_TYPE_TITLE, PLACEMENT_COUNT_TITLE};
    use crate::services::test_fixtures::{upload, Catalog};

    fn service(catalog: &Catalog) -> CategoryAreaService {
        CategoryAreaService::new(
            catalog.category_areas.clone(),
            catalog.areas.clone(),
            catalog.categories.clone(),
            catalog.builds.clone(),
            catalog.attachments.clone(),
        )
    }

    fn add_build(catalog: &Catalog, category_area: &CategoryArea, items: Vec<ListItem>, status: ContentStatus) {
        let mut build = Build::new(status);
        build.name = Some("Щит №1".to_string());
        build.category_area_id = Some(category_area.id);
        build.list = items;
        catalog.builds.insert(&build).unwrap();
    }

    #[test]
    fn test_list_aggregates_published_builds() {
        let catalog = Catalog::new();
        let category = catalog.category("Билборды");
        let area = catalog.area("Москва");
        let category_area = catalog.category_area(&area, &category);

        add_build(
            &catalog,
            &category_area,
            vec![ListItem::new("A", "2"), ListItem::new("B", "3")],
            ContentStatus::Published,
        );
        add_build(&catalog, &category_area, vec![ListItem::new("A", "4")], ContentStatus::Published);
        add_build(&catalog, &category_area, vec![ListItem::new("A", "100")], ContentStatus::Draft);

        let views = service(&catalog).list(Some(category.id)).unwrap();

        assert_eq!(views.len(), 1);
        let view = &views[0];
        assert_eq!(view.builds.len(), 2);
        let a = view.list.iter().find(|t| t.title == "A").unwrap();
        let b = view.list.iter().find(|t| t.title == "B").unwrap();
        assert_eq!(a.value, 6.0);
        assert_eq!(b.value, 3.0);
    }

    #[test]
    fn test_list_rewrites_carrier_type_and_counts_text_once() {
        let catalog = Catalog::new();
        let category = catalog.category("Билборды");
        let area = catalog.area("Москва");
        let category_area = catalog.category_area(&area, &category);

        add_build(
            &catalog,
            &category_area,
            vec![ListItem::new(PLACEMENT_COUNT_TITLE, "2")],
            ContentStatus::Published,
        );
        add_build(
            &catalog,
            &category_area,
            vec![
                ListItem::new(CARRIER_TYPE_TITLE, "Билборд"),
                ListItem::new("Освещение", "not-a-number"),
            ],
            ContentStatus::Published,
        );

        let view = service(&catalog).list(None).unwrap().remove(0);

        let placements = view.list.iter().find(|t| t.title == PLACEMENT_COUNT_TITLE).unwrap();
        assert_eq!(placements.value, 3.0);
        assert!(view.list.iter().all(|t| t.title != CARRIER_TYPE_TITLE));
        let lighting = view.list.iter().find(|t| t.title == "Освещение").unwrap();
        assert_eq!(lighting.value, 1.0);
    }

    #[test]
    fn test_list_slugs_and_category_icon() {
        let catalog = Catalog::new();
        let mut category = catalog.category("Рекламные щиты");
        category.icon_picture_id = Some(Uuid::new_v4());
        catalog.categories.update(&category).unwrap();
        let area = catalog.area("Санкт-Петербург");
        let category_area = catalog.category_area(&area, &category);
        add_build(&catalog, &category_area, vec![], ContentStatus::Published);

        let view = service(&catalog).list(None).unwrap().remove(0);

        assert_eq!(view.url_title, "sankt-peterburg");
        assert!(view.list.is_empty());
        let build = &view.builds[0];
        assert_eq!(build.url_build, "shchit-1");
        assert_eq!(build.url_category, "reklamnye-shchity");
        assert_eq!(build.url_category_area, "sankt-peterburg");
        assert_eq!(build.category_icon_picture_id, category.icon_picture_id);
    }

    #[test]
    fn test_empty_category_area() {
        let catalog = Catalog::new();
        let category = catalog.category("Пилоны");
        let area = catalog.area("Казань");
        catalog.category_area(&area, &category);

        let view = service(&catalog).list(Some(category.id)).unwrap().remove(0);

        assert!(view.builds.is_empty());
        assert!(view.list.is_empty());
    }

    #[test]
    fn test_list_in_creation_order_and_filtered() {
        let catalog = Catalog::new();
        let first_category = catalog.category("Первая");
        let second_category = catalog.category("Вторая");
        let area = catalog.area("Тверь");
        let a = catalog.category_area(&area, &first_category);
        catalog.category_area(&area, &second_category);
        let c = catalog.category_area(&area, &first_category);

        let ids: Vec<Uuid> = service(&catalog)
            .list(Some(first_category.id))
            .unwrap()
            .into_iter()
            .map(|v| v.category_area.id)
            .collect();

        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[test]
    fn test_get_detail() {
        let catalog = Catalog::new();
        let category = catalog.category("Пилоны");
        let area = catalog.area("Тула");
        let category_area = catalog.category_area(&area, &category);

        let detail = service(&catalog).get(category_area.id).unwrap().unwrap();

        assert_eq!(detail.url_title, "tula");
        assert_eq!(detail.area.unwrap().id, area.id);
        assert!(service(&catalog).get(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_create_update_replaces_picture() {
        let catalog = Catalog::new();
        let service = service(&catalog);
        let category = catalog.category("Пилоны");
        let area = catalog.area("Тула");

        let first = upload(b"first");
        let created = service
            .create(
                Some(&first),
                CreateCategoryAreaRequest {
                    area_id: area.id,
                    category_id: category.id,
                    status: ContentStatus::Draft,
                },
            )
            .unwrap();
        let old_picture = created.picture_id.unwrap();

        let second = upload(b"second");
        let updated = service
            .update(
                Some(&second),
                UpdateCategoryAreaRequest {
                    category_area_id: created.id,
                    area_id: None,
                    category_id: None,
                    status: Some(ContentStatus::Published),
                },
            )
            .unwrap();

        assert_ne!(updated.picture_id, Some(old_picture));
        assert_eq!(updated.status, ContentStatus::Published);
        assert_eq!(updated.area_id, area.id);
        assert!(catalog.attachments.get_picture(old_picture).unwrap().is_none());
        assert_eq!(catalog.rows("pictures"), 1);
    }

    #[test]
    fn test_delete_detaches_builds_and_removes_picture() {
        let catalog = Catalog::new();
        let service = service(&catalog);
        let category = catalog.category("Пилоны");
        let area = catalog.area("Тула");
        let picture = upload(b"p");
        let created = service
            .create(
                Some(&picture),
                CreateCategoryAreaRequest {
                    area_id: area.id,
                    category_id: category.id,
                    status: ContentStatus::Published,
                },
            )
            .unwrap();
        add_build(&catalog, &created, vec![], ContentStatus::Published);

        service.delete(created.id).unwrap();

        assert_eq!(catalog.rows("pictures"), 0);
        assert_eq!(catalog.rows("builds"), 1);
        assert!(matches!(service.delete(created.id), Err(AppError::NotFound)));
    }

    #[test]
    fn test_status_update() {
        let catalog = Catalog::new();
        let service = service(&catalog);
        let category = catalog.category("Пилоны");
        let area = catalog.area("Тула");
        let category_area = catalog.category_area(&area, &category);

        let kept = service.update_status(category_area.id, None).unwrap().unwrap();
        assert_eq!(kept.category_area.status, ContentStatus::Published);
        assert_eq!(kept.url_title, "tula");

        let drafted = service
            .update_status(category_area.id, Some(ContentStatus::Draft))
            .unwrap()
            .unwrap();
        assert_eq!(drafted.category_area.status, ContentStatus::Draft);

        assert!(service
            .update_status(Uuid::new_v4(), Some(ContentStatus::Draft))
            .unwrap()
            .is_none());
    }
}
