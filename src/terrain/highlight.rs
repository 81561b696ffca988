use glam::Vec3;

use crate::terrain::config::{Ease, HighlightSettings};
use crate::terrain::mesh::TerrainMesh;
use crate::terrain::picking::PickResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionState {
    Started,
    Running,
    Completed,
}

#[derive(Clone, Debug)]
pub struct Transition {
    triangle: [u32; 3],
    start: Vec3,
    target: Vec3,
    elapsed: f32,
    duration: f32,
    ease: Ease,
    state: TransitionState,
}

impl Transition {
    pub fn new(triangle: [u32; 3], start: Vec3, target: Vec3, duration: f32, ease: Ease) -> Self {
        Self {
            triangle,
            start,
            target,
            elapsed: 0.0,
            duration,
            ease,
            state: TransitionState::Started,
        }
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn key(&self) -> [u32; 3] {
        triangle_key(self.triangle)
    }

    pub fn color(&self) -> Vec3 {
        match self.state {
            TransitionState::Started => self.start,
            TransitionState::Completed => self.target,
            TransitionState::Running => {
                let progress = if self.duration > 0.0 {
                    self.elapsed / self.duration
                } else {
                    1.0
                };
                self.start.lerp(self.target, self.ease.apply(progress))
            }
        }
    }

    pub fn advance(&mut self, dt: f32) -> Vec3 {
        if self.state == TransitionState::Completed {
            return self.target;
        }

        self.elapsed += dt.max(0.0);
        self.state = if self.elapsed >= self.duration {
            TransitionState::Completed
        } else {
            TransitionState::Running
        };

        self.color()
    }
}

fn triangle_key(mut triangle: [u32; 3]) -> [u32; 3] {
    triangle.sort_unstable();
    triangle
}

/// A repick of a triangle that is still fading replaces its transition.
pub struct HighlightController {
    settings: HighlightSettings,
    transitions: Vec<Transition>,
}

impl HighlightController {
    pub fn new(settings: HighlightSettings) -> Self {
        Self {
            settings,
            transitions: Vec::new(),
        }
    }

    /// Applies to transitions started after the call.
    pub fn set_ease(&mut self, ease: Ease) {
        self.settings.ease = ease;
    }

    #[cfg(test)]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn active_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn on_pick(&mut self, mesh: &mut TerrainMesh, pick: &PickResult) {
        let highlight = self.settings.highlight_color;
        for &vertex in &pick.triangle {
            mesh.set_color(vertex, highlight);
        }

        let key = triangle_key(pick.triangle);
        self.transitions.retain(|t| t.key() != key);
        self.transitions.push(Transition::new(
            pick.triangle,
            highlight,
            self.settings.base_color,
            self.settings.duration,
            self.settings.ease,
        ));
    }

    pub fn update(&mut self, mesh: &mut TerrainMesh, dt: f32) {
        if self.transitions.is_empty() {
            return;
        }

        for transition in &mut self.transitions {
            let color = transition.advance(dt);
            for &vertex in &transition.triangle {
                mesh.set_color(vertex, color);
            }
        }

        self.transitions
            .retain(|t| t.state() != TransitionState::Completed);
        log::trace!("{} highlight transitions running", self.transitions.len());
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}

impl Default for HighlightController {
    fn default() -> Self {
        Self::new(HighlightSettings::default())
    }
}
