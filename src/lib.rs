// src/lib.rs
// adcatalog - Content catalog backend for advertising structures
//
// Architecture:
// - Domain-centric: entities, invariants and list aggregation live in `domain`
// - Repositories are dumb SQLite mappers; structured fields are JSON columns
// - Services orchestrate writes together with their picture/video attachments
// - Read views (slugs, aggregated lists) are derived on every read
// - Application layer: request DTOs and state wiring for an embedding transport

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod db;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    aggregate_area_lists,
    aggregate_build_list,
    aggregate_lists,
    validate_area,
    validate_build,
    validate_category,
    validate_feedback,
    AggregationRules,
    // Area
    Area,
    // Build
    Build,
    BuildChanges,
    // Category
    Category,
    // CategoryArea
    CategoryArea,
    CategoryChanges,
    CategoryList,
    CategoryListItem,
    // Status
    ContentStatus,
    Coordinate,
    DomainError,
    FallbackWeight,
    // Feedback
    Feedback,
    ListAggregate,
    ListItem,
    // Attachments
    Picture,
    Video,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Infrastructure
// ============================================================================

pub use infrastructure::{
    transliterate, FileTransfer, LocalFileTransfer, UploadedFile, UploadedVideo,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    AreaService, AttachmentService, BuildService, BuildView, CategoryAreaService,
    CategoryAreaView, CategoryService, CategoryView, FeedbackService,
};

// ============================================================================
// PUBLIC API - Application
// ============================================================================

pub use application::AppState;
pub use db::DatabaseConfig;
