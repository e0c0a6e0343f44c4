pub mod entity;
pub mod mesh;
pub mod points;
pub mod sprite;
