pub mod camera;
pub mod instance;
pub mod sdf_instance;
