pub mod animation;
pub mod config;
pub mod engine;
pub mod highlight;
pub mod mesh;
pub mod picking;
pub mod pointer;
pub mod scene;

pub use config::{AnimationSettings, Ease, GridConfig, GridConfigError, HighlightSettings};
pub use engine::TerrainEngine;
pub use mesh::TerrainMesh;
pub use picking::{PickResult, Ray, pick};
pub use pointer::PointerState;
pub use scene::TerrainScene;
