// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file declares all domain modules and re-exports their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod aggregation;
pub mod area;
pub mod attachment;
pub mod build;
pub mod category;
pub mod category_area;
pub mod feedback;
pub mod status;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Shared status
pub use status::ContentStatus;

// Area
pub use area::{validate_area, Area};

// Attachments
pub use attachment::{Picture, Video, DEFAULT_PICTURE_CONTENT_TYPE};

// Build
pub use build::{validate_build, Build, BuildChanges, Coordinate, ListItem};

// Category
pub use category::{validate_category, Category, CategoryChanges, CategoryList, CategoryListItem};

// Category area
pub use category_area::CategoryArea;

// Feedback
pub use feedback::{validate_feedback, Feedback};

// Aggregation (derived data)
pub use aggregation::{
    aggregate_area_lists, aggregate_build_list, aggregate_lists, parse_list_value,
    AggregationRules, FallbackWeight, ListAggregate, CARRIER_TYPE_TITLE, PLACEMENT_COUNT_TITLE,
};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
