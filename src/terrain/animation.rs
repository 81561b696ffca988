use std::f64::consts::TAU;

use crate::terrain::config::AnimationSettings;
use crate::terrain::mesh::TerrainMesh;

/// Time advances by a fixed step per frame, not by wall clock.
pub struct Animator {
    settings: AnimationSettings,
    time: f64,
}

impl Animator {
    pub fn new(settings: AnimationSettings) -> Self {
        Self { settings, time: 0.0 }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn step(&mut self, mesh: &mut TerrainMesh) {
        self.time += self.settings.time_step as f64;
        tick(mesh, self.time, self.settings.amplitude);
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(AnimationSettings::default())
    }
}

// Time is wrapped before narrowing; f32 stops resolving the step long before
// f64 does.
pub fn tick(mesh: &mut TerrainMesh, time: f64, amplitude: f32) {
    let base = time.rem_euclid(TAU) as f32;
    let (positions, originals, phases) = mesh.animation_view();

    for ((position, original), phase) in positions.iter_mut().zip(originals).zip(phases) {
        let angle = base + phase;
        position.x = original.x + angle.cos() * amplitude;
        position.y = original.y + angle.sin() * amplitude;
        position.z = original.z;
    }
}
