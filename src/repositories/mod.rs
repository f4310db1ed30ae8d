// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO cross-repository calls
// - Explicit SQL only
// - Structured columns go through `json_columns`

pub mod area_repository;
pub mod build_repository;
pub mod category_area_repository;
pub mod category_repository;
pub mod feedback_repository;
pub mod json_columns;
pub mod picture_repository;
pub mod video_repository;

mod row_values;
mod sequences;

pub use area_repository::{AreaRepository, SqliteAreaRepository};
pub use build_repository::{BuildFilter, BuildRepository, SqliteBuildRepository};
pub use category_area_repository::{CategoryAreaRepository, SqliteCategoryAreaRepository};
pub use category_repository::{CategoryFilter, CategoryRepository, SqliteCategoryRepository};
pub use feedback_repository::{FeedbackRepository, SqliteFeedbackRepository};
pub use json_columns::{decode_field, encode_field};
pub use picture_repository::{PictureRepository, SqlitePictureRepository};
pub use video_repository::{SqliteVideoRepository, VideoRepository};

#[cfg(test)]
pub use area_repository::MockAreaRepository;
#[cfg(test)]
pub use build_repository::MockBuildRepository;
#[cfg(test)]
pub use category_area_repository::MockCategoryAreaRepository;
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
#[cfg(test)]
pub use feedback_repository::MockFeedbackRepository;
#[cfg(test)]
pub use picture_repository::MockPictureRepository;
#[cfg(test)]
pub use video_repository::MockVideoRepository;
