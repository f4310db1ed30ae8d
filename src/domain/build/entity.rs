use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::ContentStatus;

/// A 2-D point, `[latitude, longitude]`
pub type Coordinate = [f64; 2];

/// One line of a build's itemized list
///
/// `value` is normally a numeric string ("12", "3.5") but is kept as text;
/// aggregation decides how to read it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "text_or_number"
    )]
    pub value: Option<String>,
}

impl ListItem {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            value: Some(value.into()),
        }
    }
}

/// Older rows store list values as bare JSON numbers.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}

/// An advertising structure placed on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    pub id: Uuid,

    /// Store-assigned sequence number, 0 until inserted
    pub number: i64,

    pub name: Option<String>,

    /// Outline or marker points of the structure
    pub coordinates: Vec<Coordinate>,

    pub w_description: Option<String>,
    pub g_title: Option<String>,
    pub g_sub_title: Option<String>,

    /// Itemized list (title/value pairs)
    pub list: Vec<ListItem>,

    /// Polygon of the surrounding build area
    pub build_area_coordinates: Vec<Coordinate>,

    pub status: ContentStatus,
    pub category_area_id: Option<Uuid>,
    pub picture_id: Option<Uuid>,
    pub icon_picture_id: Option<Uuid>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field changes applied to a build; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildChanges {
    pub name: Option<String>,
    pub coordinates: Option<Vec<Coordinate>>,
    pub w_description: Option<String>,
    pub g_title: Option<String>,
    pub g_sub_title: Option<String>,
    pub list: Option<Vec<ListItem>>,
    pub build_area_coordinates: Option<Vec<Coordinate>>,
    pub status: Option<ContentStatus>,
    /// `Some(None)` detaches the build from its category-area
    pub category_area_id: Option<Option<Uuid>>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

impl Build {
    pub fn new(status: ContentStatus) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            number: 0,
            name: None,
            coordinates: Vec::new(),
            w_description: None,
            g_title: None,
            g_sub_title: None,
            list: Vec::new(),
            build_area_coordinates: Vec::new(),
            status,
            category_area_id: None,
            picture_id: None,
            icon_picture_id: None,
            seo_title: None,
            seo_description: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply changes and bump the modification timestamp
    pub fn apply(&mut self, changes: BuildChanges) {
        let BuildChanges {
            name,
            coordinates,
            w_description,
            g_title,
            g_sub_title,
            list,
            build_area_coordinates,
            status,
            category_area_id,
            seo_title,
            seo_description,
        } = changes;

        if name.is_some() {
            self.name = name;
        }
        if let Some(coordinates) = coordinates {
            self.coordinates = coordinates;
        }
        if w_description.is_some() {
            self.w_description = w_description;
        }
        if g_title.is_some() {
            self.g_title = g_title;
        }
        if g_sub_title.is_some() {
            self.g_sub_title = g_sub_title;
        }
        if let Some(list) = list {
            self.list = list;
        }
        if let Some(area) = build_area_coordinates {
            self.build_area_coordinates = area;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(category_area_id) = category_area_id {
            self.category_area_id = category_area_id;
        }
        if seo_title.is_some() {
            self.seo_title = seo_title;
        }
        if seo_description.is_some() {
            self.seo_description = seo_description;
        }

        self.updated_at = Utc::now();
    }
}
