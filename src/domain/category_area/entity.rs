use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ContentStatus;

/// Placement of a category in one geographic area
///
/// Builds hang off a category-area; its read view aggregates their lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryArea {
    pub id: Uuid,
    pub area_id: Uuid,
    pub category_id: Uuid,
    pub picture_id: Option<Uuid>,
    pub status: ContentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CategoryArea {
    pub fn new(area_id: Uuid, category_id: Uuid, status: ContentStatus) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            area_id,
            category_id,
            picture_id: None,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update(
        &mut self,
        area_id: Option<Uuid>,
        category_id: Option<Uuid>,
        status: Option<ContentStatus>,
    ) {
        if let Some(area_id) = area_id {
            self.area_id = area_id;
        }
        if let Some(category_id) = category_id {
            self.category_id = category_id;
        }
        if let Some(status) = status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }
}
