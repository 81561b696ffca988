use crate::renderer::CameraMode;
use crate::terrain::{Ease, GridConfig};

pub struct UiState {
    pub grid: GridConfig,
    pub seed: u64,
    pub fade_ease: Ease,

    pub camera_mode: CameraMode,
    pub vsync_enabled: bool,

    pub show_stats: bool,
    pub show_help: bool,

    pub fps_cap_enabled: bool,
    pub fps_cap: u32,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            seed: 12345,
            fade_ease: Ease::QuadOut,

            camera_mode: CameraMode::Orbital,
            vsync_enabled: false,

            show_stats: true,
            show_help: true,

            fps_cap_enabled: false,
            fps_cap: 144,
        }
    }
}

#[derive(Clone, Copy, Default)]
pub struct FrameStats {
    pub fps: f32,
    pub vertices: usize,
    pub triangles: usize,
    pub active_highlights: usize,
    pub hovered: Option<[u32; 3]>,
    pub time: f64,
}
