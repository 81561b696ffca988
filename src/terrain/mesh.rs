use std::f32::consts::TAU;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::terrain::config::{BASE_COLOR, GridConfig, GridConfigError};

pub struct TerrainMesh {
    generation: u64,

    original_positions: Vec<Vec3>,
    phases: Vec<f32>,
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    indices: Vec<u32>,

    positions_dirty: bool,
    colors_dirty: bool,
}

impl TerrainMesh {
    pub fn build<R: Rng>(
        config: &GridConfig,
        rng: &mut R,
        generation: u64,
    ) -> Result<Self, GridConfigError> {
        config.validate()?;

        let columns = config.width_segments as usize + 1;
        let rows = config.height_segments as usize + 1;
        let vertex_count = columns * rows;

        let half_w = config.width / 2.0;
        let half_h = config.height / 2.0;
        let cell_w = config.width / config.width_segments as f32;
        let cell_h = config.height / config.height_segments as f32;

        let mut original_positions = Vec::with_capacity(vertex_count);
        let mut phases = Vec::with_capacity(vertex_count);

        for iy in 0..rows {
            let y = half_h - iy as f32 * cell_h;
            for ix in 0..columns {
                let x = -half_w + ix as f32 * cell_w;

                let jitter = Vec3::new(
                    rng.gen_range(0.0..1.0_f32) - 0.5,
                    rng.gen_range(0.0..1.0_f32) - 0.5,
                    rng.gen_range(0.0..1.0_f32),
                );
                original_positions.push(Vec3::new(x, y, 0.0) + jitter);
                phases.push(rng.gen_range(0.0..TAU));
            }
        }

        let mut indices = Vec::with_capacity(config.triangle_count() * 3);
        for iy in 0..rows - 1 {
            for ix in 0..columns - 1 {
                let a = (iy * columns + ix) as u32;
                let b = ((iy + 1) * columns + ix) as u32;
                let c = ((iy + 1) * columns + ix + 1) as u32;
                let d = (iy * columns + ix + 1) as u32;

                indices.extend_from_slice(&[a, b, d]);
                indices.extend_from_slice(&[b, c, d]);
            }
        }

        Ok(Self {
            generation,
            positions: original_positions.clone(),
            original_positions,
            phases,
            colors: vec![BASE_COLOR; vertex_count],
            indices,
            positions_dirty: true,
            colors_dirty: true,
        })
    }

    pub fn build_seeded(
        config: &GridConfig,
        seed: u64,
        generation: u64,
    ) -> Result<Self, GridConfigError> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::build(config, &mut rng, generation)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn original_positions(&self) -> &[Vec3] {
        &self.original_positions
    }

    pub fn phases(&self) -> &[f32] {
        &self.phases
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn set_color(&mut self, vertex: u32, color: Vec3) {
        self.colors[vertex as usize] = color;
        self.colors_dirty = true;
    }

    pub(crate) fn animation_view(&mut self) -> (&mut [Vec3], &[Vec3], &[f32]) {
        self.positions_dirty = true;
        (&mut self.positions, &self.original_positions, &self.phases)
    }

    pub fn positions_dirty(&self) -> bool {
        self.positions_dirty
    }

    pub fn colors_dirty(&self) -> bool {
        self.colors_dirty
    }

    pub fn take_positions_dirty(&mut self) -> bool {
        std::mem::take(&mut self.positions_dirty)
    }

    pub fn take_colors_dirty(&mut self) -> bool {
        std::mem::take(&mut self.colors_dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_and_triangle_counts_follow_segments() {
        for (ws, hs) in [(1, 1), (1, 7), (4, 3), (25, 25), (50, 1)] {
            let config = GridConfig::new(10.0, 6.0, ws, hs);
            let mesh = TerrainMesh::build_seeded(&config, 7, 0).unwrap();
            assert_eq!(mesh.vertex_count(), ((ws + 1) * (hs + 1)) as usize);
            assert_eq!(mesh.triangle_count(), (2 * ws * hs) as usize);
            assert_eq!(mesh.phases().len(), mesh.vertex_count());
            assert_eq!(mesh.colors().len(), mesh.vertex_count());
        }
    }

    #[test]
    fn indices_stay_in_bounds() {
        let mesh = TerrainMesh::build_seeded(&GridConfig::new(3.0, 5.0, 6, 9), 1, 0).unwrap();
        let count = mesh.vertex_count() as u32;
        assert!(mesh.indices().iter().all(|&i| i < count));
    }

    #[test]
    fn jitter_stays_within_cell_bounds() {
        let config = GridConfig::new(8.0, 4.0, 8, 4);
        let mesh = TerrainMesh::build_seeded(&config, 99, 0).unwrap();

        let columns = 9;
        for (i, p) in mesh.original_positions().iter().enumerate() {
            let ix = (i % columns) as f32;
            let iy = (i / columns) as f32;
            let lattice_x = -4.0 + ix;
            let lattice_y = 2.0 - iy;

            assert!(p.x >= lattice_x - 0.5 && p.x <= lattice_x + 0.5);
            assert!(p.y >= lattice_y - 0.5 && p.y <= lattice_y + 0.5);
            assert!(p.z >= 0.0 && p.z < 1.0);
        }
    }

    #[test]
    fn phases_and_colors_initialized() {
        let mesh = TerrainMesh::build_seeded(&GridConfig::default(), 3, 0).unwrap();
        assert!(mesh.phases().iter().all(|&p| (0.0..TAU).contains(&p)));
        assert!(mesh.colors().iter().all(|&c| c == BASE_COLOR));
        assert_eq!(mesh.positions(), mesh.original_positions());
    }

    #[test]
    fn same_seed_builds_same_mesh() {
        let config = GridConfig::new(5.0, 5.0, 5, 5);
        let a = TerrainMesh::build_seeded(&config, 42, 0).unwrap();
        let b = TerrainMesh::build_seeded(&config, 42, 1).unwrap();
        assert_eq!(a.phases(), b.phases());
        assert_eq!(a.original_positions(), b.original_positions());
        assert_eq!(a.vertex_count(), b.vertex_count());
    }

    #[test]
    fn quad_cells_split_into_expected_triangles() {
        let mesh = TerrainMesh::build_seeded(&GridConfig::new(2.0, 2.0, 2, 1), 0, 0).unwrap();
        assert_eq!(mesh.indices(), &[0, 3, 1, 3, 4, 1, 1, 4, 2, 4, 5, 2]);
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(TerrainMesh::build_seeded(&GridConfig::new(1.0, 1.0, 0, 1), 0, 0).is_err());
    }

    #[test]
    fn dirty_flags_are_consumed() {
        let mut mesh = TerrainMesh::build_seeded(&GridConfig::new(1.0, 1.0, 1, 1), 0, 0).unwrap();
        assert!(mesh.take_positions_dirty());
        assert!(!mesh.take_positions_dirty());
        assert!(mesh.take_colors_dirty());
        mesh.set_color(2, Vec3::ONE);
        assert!(mesh.colors_dirty());
        assert_eq!(mesh.colors()[2], Vec3::ONE);
    }
}
