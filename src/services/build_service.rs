// src/services/build_service.rs
//
// Build orchestration
//
// A build has two independent picture slots, the main picture and the
// icon; each is replaced with the same store-then-swap sequence.

use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    aggregate_build_list, validate_build, Build, BuildChanges, ContentStatus, Coordinate,
    ListItem,
};
use crate::error::{AppError, AppResult};
use crate::infrastructure::{transliterate_opt, UploadedFile};
use crate::repositories::{BuildFilter, BuildRepository, CategoryAreaRepository, CategoryRepository};
use crate::services::attachment_service::{replace_attachment, AttachmentService};
use crate::services::views::BuildView;

#[derive(Debug, Clone, Default)]
pub struct CreateBuildRequest {
    pub name: Option<String>,
    pub coordinates: Vec<Coordinate>,
    pub w_description: Option<String>,
    pub g_title: Option<String>,
    pub g_sub_title: Option<String>,
    pub list: Vec<ListItem>,
    pub build_area_coordinates: Vec<Coordinate>,
    pub status: ContentStatus,
    pub category_area_id: Option<Uuid>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateBuildRequest {
    pub build_id: Uuid,
    pub changes: BuildChanges,
}

/// Uploads accompanying a build write
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildUploads<'a> {
    pub picture: Option<&'a UploadedFile>,
    pub icon: Option<&'a UploadedFile>,
}

pub struct BuildService {
    build_repo: Arc<dyn BuildRepository>,
    category_area_repo: Arc<dyn CategoryAreaRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    attachments: Arc<AttachmentService>,
}

impl BuildService {
    pub fn new(
        build_repo: Arc<dyn BuildRepository>,
        category_area_repo: Arc<dyn CategoryAreaRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        attachments: Arc<AttachmentService>,
    ) -> Self {
        Self {
            build_repo,
            category_area_repo,
            category_repo,
            attachments,
        }
    }

    /// Builds ordered by number, optionally limited to one category-area.
    pub fn list(&self, category_area_id: Option<Uuid>) -> AppResult<Vec<BuildView>> {
        let builds = self.build_repo.list(BuildFilter {
            category_area_id,
            status: None,
        })?;

        let mut icons: HashMap<Uuid, Option<Uuid>> = HashMap::new();
        builds
            .into_iter()
            .map(|build| -> AppResult<BuildView> {
                let icon = match build.category_area_id {
                    Some(id) => match icons.get(&id) {
                        Some(icon) => *icon,
                        None => {
                            let icon = self.category_icon(id)?;
                            icons.insert(id, icon);
                            icon
                        }
                    },
                    None => None,
                };
                Ok(Self::view(build, icon))
            })
            .collect()
    }

    pub fn get(&self, id: Uuid) -> AppResult<Option<BuildView>> {
        let Some(build) = self.build_repo.get_by_id(id)? else {
            return Ok(None);
        };

        let icon = match build.category_area_id {
            Some(category_area_id) => self.category_icon(category_area_id)?,
            None => None,
        };

        Ok(Some(Self::view(build, icon)))
    }

    pub fn create(&self, uploads: BuildUploads<'_>, request: CreateBuildRequest) -> AppResult<Build> {
        let mut build = Build::new(request.status);
        build.name = request.name;
        build.coordinates = request.coordinates;
        build.w_description = request.w_description;
        build.g_title = request.g_title;
        build.g_sub_title = request.g_sub_title;
        build.list = request.list;
        build.build_area_coordinates = request.build_area_coordinates;
        build.category_area_id = request.category_area_id;
        build.seo_title = request.seo_title;
        build.seo_description = request.seo_description;

        validate_build(&build)?;

        let mut batch = self.attachments.begin();
        build.picture_id = batch.picture(uploads.picture)?;
        build.icon_picture_id = batch.picture(uploads.icon)?;

        build.number = self.build_repo.insert(&build)?;
        batch.commit();

        log::info!("Created build {} (#{})", build.id, build.number);
        Ok(build)
    }

    pub fn update(&self, uploads: BuildUploads<'_>, request: UpdateBuildRequest) -> AppResult<Build> {
        let mut build = self
            .build_repo
            .get_by_id(request.build_id)?
            .ok_or(AppError::NotFound)?;

        build.apply(request.changes);
        validate_build(&build)?;

        let mut batch = self.attachments.begin();
        let old_picture = replace_attachment(&mut build.picture_id, batch.picture(uploads.picture)?);
        let old_icon = replace_attachment(&mut build.icon_picture_id, batch.picture(uploads.icon)?);

        self.build_repo.update(&build)?;
        batch.commit();

        self.attachments.discard_picture(old_picture);
        self.attachments.discard_picture(old_icon);

        log::info!("Updated build {} (#{})", build.id, build.number);
        Ok(build)
    }

    /// Delete the build, then its picture and icon.
    pub fn delete(&self, id: Uuid) -> AppResult<Build> {
        let build = self.build_repo.get_by_id(id)?.ok_or(AppError::NotFound)?;

        self.build_repo.delete(id)?;

        self.attachments.discard_picture(build.picture_id);
        self.attachments.discard_picture(build.icon_picture_id);

        log::info!("Deleted build {} (#{})", build.id, build.number);
        Ok(build)
    }

    pub fn update_status(
        &self,
        id: Uuid,
        status: Option<ContentStatus>,
    ) -> AppResult<Option<BuildView>> {
        let Some(current) = self.build_repo.get_by_id(id)? else {
            return Ok(None);
        };

        let next = status.unwrap_or(current.status);
        if !self.build_repo.update_status(id, next)? {
            return Ok(None);
        }

        log::info!("Build {} status {} -> {}", id, current.status, next);
        self.get(id)
    }

    /// Icon of the category that owns a category-area
    fn category_icon(&self, category_area_id: Uuid) -> AppResult<Option<Uuid>> {
        let Some(category_area) = self.category_area_repo.get_by_id(category_area_id)? else {
            return Ok(None);
        };

        Ok(self
            .category_repo
            .get_by_id(category_area.category_id)?
            .and_then(|category| category.icon_picture_id))
    }

    fn view(build: Build, category_icon_picture_id: Option<Uuid>) -> BuildView {
        BuildView {
            url_title: transliterate_opt(build.name.as_deref()),
            summary: aggregate_build_list(&build.list),
            category_icon_picture_id,
            build,
        }
    }
}
