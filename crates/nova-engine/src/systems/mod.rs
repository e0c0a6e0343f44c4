pub mod effects;
pub mod lighting;
pub mod render;
pub mod sdf_render;
