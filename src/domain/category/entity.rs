use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ContentStatus;

/// Titled bullet list shown on a category page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub items: Vec<CategoryListItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryListItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcaption: Option<String>,
}

/// A top-level advertising category (billboards, city formats, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub subtitle: Option<String>,

    /// Page section this category is rendered in
    pub section_id: Option<String>,

    pub picture_id: Option<Uuid>,
    pub video_id: Option<Uuid>,

    /// Icon shown on map markers of the category's builds
    pub icon_picture_id: Option<Uuid>,

    pub list: Option<CategoryList>,
    pub status: ContentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field changes applied to a category; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subtitle: Option<String>,
    pub section_id: Option<String>,
    pub list: Option<CategoryList>,
    pub status: Option<ContentStatus>,
}

impl Category {
    pub fn new(status: ContentStatus) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: None,
            description: None,
            subtitle: None,
            section_id: None,
            picture_id: None,
            video_id: None,
            icon_picture_id: None,
            list: None,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, changes: CategoryChanges) {
        if changes.title.is_some() {
            self.title = changes.title;
        }
        if changes.description.is_some() {
            self.description = changes.description;
        }
        if changes.subtitle.is_some() {
            self.subtitle = changes.subtitle;
        }
        if changes.section_id.is_some() {
            self.section_id = changes.section_id;
        }
        if changes.list.is_some() {
            self.list = changes.list;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }

        self.updated_at = Utc::now();
    }
}
