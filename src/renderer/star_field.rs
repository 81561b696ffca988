use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wgpu::util::DeviceExt;

pub const STAR_COUNT: usize = 10_000;
pub const STAR_EXTENT: f32 = 1000.0;
pub const STAR_ROTATION_STEP: f32 = 0.0005;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable, Debug, PartialEq)]
pub struct Star {
    pub position: [f32; 3],
}

pub fn generate_stars(count: usize, seed: u64) -> Vec<Star> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Star {
            position: std::array::from_fn(|_| rng.gen_range(-STAR_EXTENT..STAR_EXTENT)),
        })
        .collect()
}

pub struct StarField {
    buffer: wgpu::Buffer,
    count: u32,
    rotation_x: f32,
}

impl StarField {
    pub fn new(device: &wgpu::Device, seed: u64) -> Self {
        let stars = generate_stars(STAR_COUNT, seed);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Star Field Buffer"),
            contents: bytemuck::cast_slice(&stars),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            buffer,
            count: stars.len() as u32,
            rotation_x: 0.0,
        }
    }

    pub fn advance(&mut self) {
        self.rotation_x += STAR_ROTATION_STEP;
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.rotation_x)
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

pub fn star_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Star>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        }],
    }
}
