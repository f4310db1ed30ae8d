// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// RULES:
// - Services hold repository handles, never connections
// - Invariants are checked before anything is stored
// - New attachments are stored first and removed again if the owner
//   write fails; superseded attachments go only after it succeeds

pub mod area_service;
pub mod attachment_service;
pub mod build_service;
pub mod category_area_service;
pub mod category_service;
pub mod feedback_service;
pub mod views;

#[cfg(test)]
mod test_fixtures;

pub use area_service::AreaService;

pub use attachment_service::{replace_attachment, AttachmentBatch, AttachmentService};

pub use build_service::{BuildService, BuildUploads, CreateBuildRequest, UpdateBuildRequest};

pub use category_area_service::{
    CategoryAreaService, CreateCategoryAreaRequest, UpdateCategoryAreaRequest,
};

pub use category_service::{
    CategoryService, CategoryUploads, CreateCategoryRequest, UpdateCategoryRequest,
};

pub use feedback_service::{
    CreateFeedbackRequest, FeedbackService, FeedbackUploads, UpdateFeedbackRequest,
};

pub use views::{
    AreaBuildView, AreaView, BuildView, CategoryAreaDetail, CategoryAreaView, CategoryView,
};
