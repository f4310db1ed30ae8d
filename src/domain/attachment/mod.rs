pub mod entity;

pub use entity::{Picture, Video, DEFAULT_PICTURE_CONTENT_TYPE};
