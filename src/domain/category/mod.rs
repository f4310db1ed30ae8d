pub mod entity;
pub mod invariants;

pub use entity::{Category, CategoryChanges, CategoryList, CategoryListItem};
pub use invariants::validate_category;
