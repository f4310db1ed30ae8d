pub mod entity;

pub use entity::{validate_feedback, Feedback};
