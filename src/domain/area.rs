use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult};

/// A geographic area (city, district) that categories are placed in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Area {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
        }
    }
}

pub fn validate_area(area: &Area) -> DomainResult<()> {
    if area.name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Area name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_fails() {
        assert!(validate_area(&Area::new("  ".to_string())).is_err());
        assert!(validate_area(&Area::new("Москва".to_string())).is_ok());
    }
}
