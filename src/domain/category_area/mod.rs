pub mod entity;

pub use entity::CategoryArea;
