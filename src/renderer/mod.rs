pub mod camera;
pub mod gpu;
pub mod star_field;

pub use camera::{Camera, CameraMode};
pub use gpu::GpuState;
