// src/services/views.rs
//
// Read views
//
// Entities plus fields derived on every read: slugs, aggregated lists and
// the owning category's icon. Nothing here is stored.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Area, Build, Category, CategoryArea, ListAggregate};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaView {
    #[serde(flatten)]
    pub area: Area,
    pub url_title: String,
}

/// Category with its slug and the totals of its published builds
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    #[serde(flatten)]
    pub category: Category,
    pub url_title: String,
    pub summary: Vec<ListAggregate>,
}

/// Single category-area with its area
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAreaDetail {
    #[serde(flatten)]
    pub category_area: CategoryArea,
    pub area: Option<Area>,
    pub url_title: String,
}

/// Published build as shown inside a category-area listing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaBuildView {
    #[serde(flatten)]
    pub build: Build,
    pub category_icon_picture_id: Option<Uuid>,
    pub url_build: String,
    pub url_category: String,
    pub url_category_area: String,
}

/// Category-area listing entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAreaView {
    #[serde(flatten)]
    pub category_area: CategoryArea,
    pub area: Option<Area>,
    pub url_title: String,
    pub builds: Vec<AreaBuildView>,
    /// Totals of the builds' itemized lists
    pub list: Vec<ListAggregate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildView {
    #[serde(flatten)]
    pub build: Build,
    pub category_icon_picture_id: Option<Uuid>,
    pub url_title: String,
    /// Per-title totals of this build's own list
    pub summary: Vec<ListAggregate>,
}
