use super::entity::Category;
use crate::domain::{DomainError, DomainResult};

/// Validates all Category invariants
pub fn validate_category(category: &Category) -> DomainResult<()> {
    if let Some(title) = &category.title {
        if title.trim().is_empty() {
            return Err(DomainError::InvariantViolation(
                "Category title cannot be blank".to_string(),
            ));
        }
    }
    Ok(())
}
