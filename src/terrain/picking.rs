use glam::{Mat4, Vec2, Vec3};

use crate::renderer::Camera;
use crate::terrain::mesh::TerrainMesh;
use crate::terrain::pointer::PointerState;

const PARALLEL_EPSILON: f32 = 1e-7;
const MIN_DISTANCE: f32 = 1e-5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// wgpu clip depth runs 0..1, so the near plane is z = 0.
    pub fn from_ndc(ndc: Vec2, origin: Vec3, view_projection: Mat4) -> Self {
        let inverse = view_projection.inverse();
        let near = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Self::new(origin, far - near)
    }

    pub fn from_camera(ndc: Vec2, camera: &Camera) -> Self {
        Self::from_ndc(ndc, camera.position, camera.view_projection_matrix())
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }

    /// Double-sided Möller–Trumbore.
    pub fn intersect_triangle(&self, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
        let edge1 = b - a;
        let edge2 = c - a;
        let p = self.direction.cross(edge2);
        let det = edge1.dot(p);
        if det.abs() < PARALLEL_EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = self.origin - a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = self.direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(q) * inv_det;
        (t > MIN_DISTANCE).then_some(t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickResult {
    pub triangle: [u32; 3],
    pub triangle_index: usize,
    pub distance: f32,
    pub point: Vec3,
}

pub fn pick(pointer: &PointerState, camera: &Camera, mesh: &TerrainMesh) -> Option<PickResult> {
    let ndc = pointer.ndc()?;
    let ray = Ray::from_camera(ndc, camera);
    nearest_hit(&ray, mesh.positions(), mesh.indices())
}

pub fn nearest_hit(ray: &Ray, positions: &[Vec3], indices: &[u32]) -> Option<PickResult> {
    let mut best: Option<PickResult> = None;

    for (triangle_index, tri) in indices.chunks_exact(3).enumerate() {
        let a = positions[tri[0] as usize];
        let b = positions[tri[1] as usize];
        let c = positions[tri[2] as usize];

        let Some(distance) = ray.intersect_triangle(a, b, c) else {
            continue;
        };

        if best.is_some_and(|hit| hit.distance <= distance) {
            continue;
        }

        best = Some(PickResult {
            triangle: [tri[0], tri[1], tri[2]],
            triangle_index,
            distance,
            point: ray.at(distance),
        });
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::config::GridConfig;

    fn camera_at(z: f32) -> Camera {
        let mut camera = Camera::default();
        camera.position = Vec3::new(0.0, 0.0, z);
        camera.target = Vec3::ZERO;
        camera.set_aspect(16.0, 9.0);
        camera
    }

    #[test]
    fn hits_triangle_from_either_side() {
        let a = Vec3::new(-1.0, -1.0, 0.0);
        let b = Vec3::new(1.0, -1.0, 0.0);
        let c = Vec3::new(0.0, 1.0, 0.0);

        let front = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let back = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);

        assert!((front.intersect_triangle(a, b, c).unwrap() - 5.0).abs() < 1e-5);
        assert!((back.intersect_triangle(a, b, c).unwrap() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn misses_outside_and_behind() {
        let a = Vec3::new(-1.0, -1.0, 0.0);
        let b = Vec3::new(1.0, -1.0, 0.0);
        let c = Vec3::new(0.0, 1.0, 0.0);

        let outside = Ray::new(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z);
        let behind = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        let parallel = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::X);

        assert_eq!(outside.intersect_triangle(a, b, c), None);
        assert_eq!(behind.intersect_triangle(a, b, c), None);
        assert_eq!(parallel.intersect_triangle(a, b, c), None);
    }

    #[test]
    fn nearest_triangle_wins() {
        let positions = vec![
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
        ];
        let indices = vec![0, 1, 2, 3, 4, 5];
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);

        let hit = nearest_hit(&ray, &positions, &indices).unwrap();
        assert_eq!(hit.triangle, [3, 4, 5]);
        assert_eq!(hit.triangle_index, 1);
        assert!((hit.distance - 4.0).abs() < 1e-5);
        assert!((hit.point.z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn center_ray_points_down_view_axis() {
        let camera = camera_at(5.0);
        let ray = Ray::from_camera(Vec2::ZERO, &camera);
        assert!(ray.direction.distance(Vec3::NEG_Z) < 1e-4);
        assert_eq!(ray.origin, Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn unset_pointer_never_picks() {
        let mesh = TerrainMesh::build_seeded(&GridConfig::default(), 1, 0).unwrap();
        let camera = camera_at(5.0);
        assert_eq!(pick(&PointerState::unset(), &camera, &mesh), None);
    }

    #[test]
    fn pointer_outside_surface_misses() {
        let mesh = TerrainMesh::build_seeded(&GridConfig::new(2.0, 2.0, 2, 2), 1, 0).unwrap();
        let camera = camera_at(5.0);
        let pointer = PointerState::from_ndc(Vec2::new(0.95, 0.95));
        assert_eq!(pick(&pointer, &camera, &mesh), None);
    }

    #[test]
    fn center_pointer_hits_surface() {
        let mesh = TerrainMesh::build_seeded(&GridConfig::new(2.0, 2.0, 2, 2), 1, 0).unwrap();
        let camera = camera_at(5.0);
        let hit = pick(&PointerState::from_ndc(Vec2::ZERO), &camera, &mesh).unwrap();
        let count = mesh.vertex_count() as u32;
        assert!(hit.triangle.iter().all(|&i| i < count));
        assert!(hit.point.x.abs() < 1e-3 && hit.point.y.abs() < 1e-3);
    }
}
