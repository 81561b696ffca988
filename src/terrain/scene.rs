use crate::renderer::Camera;
use crate::terrain::animation::Animator;
use crate::terrain::config::{AnimationSettings, Ease, GridConfig, GridConfigError, HighlightSettings};
use crate::terrain::highlight::HighlightController;
use crate::terrain::mesh::TerrainMesh;
use crate::terrain::picking::{PickResult, pick};
use crate::terrain::pointer::PointerState;

pub struct TerrainScene {
    mesh: TerrainMesh,
    animator: Animator,
    highlights: HighlightController,
    pointer: PointerState,
    last_pick: Option<PickResult>,
}

impl TerrainScene {
    pub fn new(mesh: TerrainMesh) -> Self {
        Self::with_settings(mesh, AnimationSettings::default(), HighlightSettings::default())
    }

    pub fn with_settings(
        mesh: TerrainMesh,
        animation: AnimationSettings,
        highlight: HighlightSettings,
    ) -> Self {
        Self {
            mesh,
            animator: Animator::new(animation),
            highlights: HighlightController::new(highlight),
            pointer: PointerState::unset(),
            last_pick: None,
        }
    }

    pub fn mesh(&self) -> &TerrainMesh {
        &self.mesh
    }

    pub fn mesh_mut(&mut self) -> &mut TerrainMesh {
        &mut self.mesh
    }

    pub fn pointer_mut(&mut self) -> &mut PointerState {
        &mut self.pointer
    }

    pub fn highlights(&self) -> &HighlightController {
        &self.highlights
    }

    pub fn time(&self) -> f64 {
        self.animator.time()
    }

    pub fn set_fade_ease(&mut self, ease: Ease) {
        self.highlights.set_ease(ease);
    }

    pub fn last_pick(&self) -> Option<&PickResult> {
        self.last_pick.as_ref()
    }

    /// Transitions index into the old vertex arrays and are dropped with it.
    pub fn replace_mesh(&mut self, mesh: TerrainMesh) {
        log::info!(
            "terrain rebuilt: {} vertices, {} triangles (generation {})",
            mesh.vertex_count(),
            mesh.triangle_count(),
            mesh.generation()
        );
        self.mesh = mesh;
        self.highlights.clear();
        self.last_pick = None;
    }

    pub fn rebuild(&mut self, config: &GridConfig, seed: u64) -> Result<(), GridConfigError> {
        let generation = self.mesh.generation() + 1;
        let mesh = TerrainMesh::build_seeded(config, seed, generation).inspect_err(|e| {
            log::warn!("rejected grid configuration {:?}: {}", config, e);
        })?;
        self.replace_mesh(mesh);
        Ok(())
    }

    pub fn advance(&mut self, camera: &Camera, dt: f32) -> Option<PickResult> {
        self.animator.step(&mut self.mesh);
        self.highlights.update(&mut self.mesh, dt);

        let hit = pick(&self.pointer, camera, &self.mesh);
        if let Some(hit) = &hit {
            self.highlights.on_pick(&mut self.mesh, hit);
        }

        let previous = self.last_pick.map(|p| p.triangle_index);
        let current = hit.map(|p| p.triangle_index);
        if previous != current {
            log::debug!("hovered triangle: {:?}", hit.map(|p| p.triangle));
        }

        self.last_pick = hit;
        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::config::{BASE_COLOR, HIGHLIGHT_COLOR};
    use glam::{Vec2, Vec3};

    fn scene() -> TerrainScene {
        TerrainScene::new(TerrainMesh::build_seeded(&GridConfig::default(), 21, 0).unwrap())
    }

    fn camera() -> Camera {
        let mut camera = Camera::default();
        camera.position = Vec3::new(0.0, 0.0, 5.0);
        camera.target = Vec3::ZERO;
        camera
    }

    #[test]
    fn frame_without_pointer_only_animates() {
        let mut scene = scene();
        let hit = scene.advance(&camera(), 1.0 / 60.0);
        assert!(hit.is_none());
        assert!(scene.mesh().positions_dirty());
        assert!(scene.mesh().colors().iter().all(|&c| c == BASE_COLOR));
        assert!(scene.time() > 0.0);
    }

    #[test]
    fn hovered_triangle_is_highlighted() {
        let mut scene = scene();
        *scene.pointer_mut() = PointerState::from_ndc(Vec2::ZERO);
        let hit = scene.advance(&camera(), 1.0 / 60.0).unwrap();

        for v in hit.triangle {
            assert_eq!(scene.mesh().colors()[v as usize], HIGHLIGHT_COLOR);
        }
        assert_eq!(scene.highlights().active_count(), 1);
        assert_eq!(scene.last_pick().map(|p| p.triangle), Some(hit.triangle));
    }

    #[test]
    fn highlight_fades_after_pointer_leaves() {
        let mut scene = scene();
        *scene.pointer_mut() = PointerState::from_ndc(Vec2::ZERO);
        let hit = scene.advance(&camera(), 0.016).unwrap();

        scene.pointer_mut().clear();
        for _ in 0..40 {
            scene.advance(&camera(), 0.016);
        }

        for v in hit.triangle {
            assert_eq!(scene.mesh().colors()[v as usize], BASE_COLOR);
        }
        assert_eq!(scene.highlights().active_count(), 0);
    }

    #[test]
    fn rebuild_discards_state() {
        let mut scene = scene();
        *scene.pointer_mut() = PointerState::from_ndc(Vec2::ZERO);
        scene.advance(&camera(), 0.016);
        let old_phases = scene.mesh().phases().to_vec();

        scene.rebuild(&GridConfig::new(10.0, 10.0, 8, 8), 99).unwrap();

        assert_eq!(scene.mesh().vertex_count(), 81);
        assert_eq!(scene.mesh().generation(), 1);
        assert_eq!(scene.highlights().active_count(), 0);
        assert!(scene.last_pick().is_none());
        assert!(scene.mesh().colors().iter().all(|&c| c == BASE_COLOR));
        assert_ne!(&scene.mesh().phases()[..4], &old_phases[..4]);
    }

    #[test]
    fn invalid_rebuild_keeps_previous_mesh() {
        let mut scene = scene();
        let before = scene.mesh().original_positions().to_vec();

        assert!(scene.rebuild(&GridConfig::new(-1.0, 10.0, 8, 8), 99).is_err());
        assert_eq!(scene.mesh().original_positions(), before.as_slice());
        assert_eq!(scene.mesh().generation(), 0);
    }
}
