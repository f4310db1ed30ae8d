// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs mirror the request bodies the transport receives (camelCase JSON)
// - Ids and statuses arrive as strings and are parsed here
// - An empty id string means "no id"
// - Conversion INTO service requests only; responses serialize the views

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::{BuildChanges, CategoryChanges, CategoryList, ContentStatus, Coordinate, ListItem};
use crate::error::{AppError, AppResult};
use crate::services::{
    CreateBuildRequest, CreateCategoryAreaRequest, CreateCategoryRequest, CreateFeedbackRequest,
    UpdateBuildRequest, UpdateCategoryAreaRequest, UpdateCategoryRequest, UpdateFeedbackRequest,
};

fn parse_id(field: &str, raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|e| AppError::Other(format!("Invalid {}: {}", field, e)))
}

fn parse_opt_id(field: &str, raw: Option<&str>) -> AppResult<Option<Uuid>> {
    raw.filter(|r| !r.trim().is_empty())
        .map(|r| parse_id(field, r))
        .transpose()
}

fn parse_status(raw: Option<&str>) -> AppResult<Option<ContentStatus>> {
    Ok(raw
        .filter(|r| !r.trim().is_empty())
        .map(str::parse::<ContentStatus>)
        .transpose()?)
}

/// Keep an explicit `null` apart from a missing key.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

// ============================================================================
// BUILD DTOs
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateBuildDto {
    pub name: Option<String>,
    pub coordinates: Option<Vec<Coordinate>>,
    pub w_description: Option<String>,
    pub g_title: Option<String>,
    pub g_sub_title: Option<String>,
    pub list: Option<Vec<ListItem>>,
    pub build_area_coordinates: Option<Vec<Coordinate>>,
    pub status: Option<String>,
    pub category_area_id: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

impl TryFrom<CreateBuildDto> for CreateBuildRequest {
    type Error = AppError;

    fn try_from(dto: CreateBuildDto) -> AppResult<Self> {
        Ok(CreateBuildRequest {
            category_area_id: parse_opt_id("categoryAreaId", dto.category_area_id.as_deref())?,
            status: parse_status(dto.status.as_deref())?.unwrap_or_default(),
            name: dto.name,
            coordinates: dto.coordinates.unwrap_or_default(),
            w_description: dto.w_description,
            g_title: dto.g_title,
            g_sub_title: dto.g_sub_title,
            list: dto.list.unwrap_or_default(),
            build_area_coordinates: dto.build_area_coordinates.unwrap_or_default(),
            seo_title: dto.seo_title,
            seo_description: dto.seo_description,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateBuildDto {
    pub id: String,
    pub name: Option<String>,
    pub coordinates: Option<Vec<Coordinate>>,
    pub w_description: Option<String>,
    pub g_title: Option<String>,
    pub g_sub_title: Option<String>,
    pub list: Option<Vec<ListItem>>,
    pub build_area_coordinates: Option<Vec<Coordinate>>,
    pub status: Option<String>,
    /// Absent keeps the category-area; `null` or `""` detaches the build
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub category_area_id: Option<Option<String>>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

impl TryFrom<UpdateBuildDto> for UpdateBuildRequest {
    type Error = AppError;

    fn try_from(dto: UpdateBuildDto) -> AppResult<Self> {
        Ok(UpdateBuildRequest {
            build_id: parse_id("id", &dto.id)?,
            changes: BuildChanges {
                name: dto.name,
                coordinates: dto.coordinates,
                w_description: dto.w_description,
                g_title: dto.g_title,
                g_sub_title: dto.g_sub_title,
                list: dto.list,
                build_area_coordinates: dto.build_area_coordinates,
                status: parse_status(dto.status.as_deref())?,
                category_area_id: dto
                    .category_area_id
                    .map(|raw| parse_opt_id("categoryAreaId", raw.as_deref()))
                    .transpose()?,
                seo_title: dto.seo_title,
                seo_description: dto.seo_description,
            },
        })
    }
}

// ============================================================================
// CATEGORY DTOs
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateCategoryDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subtitle: Option<String>,
    pub section_id: Option<String>,
    pub list: Option<CategoryList>,
    pub status: Option<String>,
}

impl TryFrom<CreateCategoryDto> for CreateCategoryRequest {
    type Error = AppError;

    fn try_from(dto: CreateCategoryDto) -> AppResult<Self> {
        Ok(CreateCategoryRequest {
            status: parse_status(dto.status.as_deref())?.unwrap_or_default(),
            title: dto.title,
            description: dto.description,
            subtitle: dto.subtitle,
            section_id: dto.section_id,
            list: dto.list,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateCategoryDto {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub subtitle: Option<String>,
    pub section_id: Option<String>,
    pub list: Option<CategoryList>,
    pub status: Option<String>,
}

impl TryFrom<UpdateCategoryDto> for UpdateCategoryRequest {
    type Error = AppError;

    fn try_from(dto: UpdateCategoryDto) -> AppResult<Self> {
        Ok(UpdateCategoryRequest {
            category_id: parse_id("id", &dto.id)?,
            changes: CategoryChanges {
                title: dto.title,
                description: dto.description,
                subtitle: dto.subtitle,
                section_id: dto.section_id,
                list: dto.list,
                status: parse_status(dto.status.as_deref())?,
            },
        })
    }
}

// ============================================================================
// CATEGORY AREA DTOs
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateCategoryAreaDto {
    pub area_id: String,
    pub category_id: String,
    pub status: Option<String>,
}

impl TryFrom<CreateCategoryAreaDto> for CreateCategoryAreaRequest {
    type Error = AppError;

    fn try_from(dto: CreateCategoryAreaDto) -> AppResult<Self> {
        Ok(CreateCategoryAreaRequest {
            area_id: parse_id("areaId", &dto.area_id)?,
            category_id: parse_id("categoryId", &dto.category_id)?,
            status: parse_status(dto.status.as_deref())?.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateCategoryAreaDto {
    pub id: String,
    pub area_id: Option<String>,
    pub category_id: Option<String>,
    pub status: Option<String>,
}

impl TryFrom<UpdateCategoryAreaDto> for UpdateCategoryAreaRequest {
    type Error = AppError;

    fn try_from(dto: UpdateCategoryAreaDto) -> AppResult<Self> {
        Ok(UpdateCategoryAreaRequest {
            category_area_id: parse_id("id", &dto.id)?,
            area_id: parse_opt_id("areaId", dto.area_id.as_deref())?,
            category_id: parse_opt_id("categoryId", dto.category_id.as_deref())?,
            status: parse_status(dto.status.as_deref())?,
        })
    }
}

// ============================================================================
// FEEDBACK DTOs
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateFeedbackDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl TryFrom<CreateFeedbackDto> for CreateFeedbackRequest {
    type Error = AppError;

    fn try_from(dto: CreateFeedbackDto) -> AppResult<Self> {
        Ok(CreateFeedbackRequest {
            title: dto.title,
            description: dto.description,
            status: parse_status(dto.status.as_deref())?.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateFeedbackDto {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl TryFrom<UpdateFeedbackDto> for UpdateFeedbackRequest {
    type Error = AppError;

    fn try_from(dto: UpdateFeedbackDto) -> AppResult<Self> {
        Ok(UpdateFeedbackRequest {
            feedback_id: parse_id("id", &dto.id)?,
            title: dto.title,
            description: dto.description,
            status: parse_status(dto.status.as_deref())?,
        })
    }
}

// ============================================================================
// STATUS DTO
// ============================================================================

/// Status change for any catalog entity; a missing status keeps the current one
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateStatusDto {
    pub id: String,
    pub status: Option<String>,
}

impl UpdateStatusDto {
    pub fn parse(&self) -> AppResult<(Uuid, Option<ContentStatus>)> {
        Ok((parse_id("id", &self.id)?, parse_status(self.status.as_deref())?))
    }
}
