pub mod entity;
pub mod invariants;

pub use entity::{Build, BuildChanges, Coordinate, ListItem};
pub use invariants::validate_build;
