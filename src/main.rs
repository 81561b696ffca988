use std::sync::Arc;
use std::time::{Duration, Instant};

use env_logger::Env;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use glam::Vec2;

use terrain3d::renderer::{Camera, GpuState};
use terrain3d::terrain::{TerrainEngine, TerrainMesh, TerrainScene};
use terrain3d::ui::{FrameStats, UiActions, UiState, apply_theme, draw_help_overlay, draw_side_panel};

#[derive(Default)]
struct InputState {
    forward: f32,
    right: f32,
    up: f32,
    mouse_captured: bool,
    mouse_delta: Vec2,
}

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    egui_state: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    egui_ctx: egui::Context,

    camera: Camera,
    scene: TerrainScene,
    engine: TerrainEngine,
    ui_state: UiState,
    input: InputState,

    last_frame: Instant,
    frame_count: u32,
    fps_timer: Instant,
    fps: f32,

    last_vsync_state: bool,
    last_frame_time: Instant,
}

impl App {
    fn new() -> anyhow::Result<Self> {
        let ui_state = UiState::default();
        let mesh = TerrainMesh::build_seeded(&ui_state.grid, ui_state.seed, 0)?;

        Ok(Self {
            window: None,
            gpu: None,
            egui_state: None,
            egui_renderer: None,
            egui_ctx: egui::Context::default(),

            camera: Camera::default(),
            scene: TerrainScene::new(mesh),
            engine: TerrainEngine::new(1),
            ui_state,
            input: InputState::default(),

            last_frame: Instant::now(),
            frame_count: 0,
            fps_timer: Instant::now(),
            fps: 0.0,

            last_vsync_state: false,
            last_frame_time: Instant::now(),
        })
    }

    fn init_gpu(&mut self, window: Arc<Window>) -> anyhow::Result<()> {
        let gpu = pollster::block_on(GpuState::new(window.clone(), self.ui_state.seed))?;

        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            self.egui_ctx.viewport_id(),
            &window,
            Some(window.scale_factor() as f32),
            None,
            Some(2048),
        );

        let egui_renderer =
            egui_wgpu::Renderer::new(&gpu.device, gpu.config.format, None, 1, false);

        apply_theme(&self.egui_ctx);

        let size = window.inner_size();
        self.camera.set_aspect(size.width as f32, size.height as f32);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.egui_state = Some(egui_state);
        self.egui_renderer = Some(egui_renderer);
        Ok(())
    }

    fn update(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.frame_count += 1;
        if self.fps_timer.elapsed().as_secs_f32() >= 1.0 {
            self.fps = self.frame_count as f32 / self.fps_timer.elapsed().as_secs_f32();
            self.frame_count = 0;
            self.fps_timer = Instant::now();
        }

        self.camera.set_mode(self.ui_state.camera_mode);
        self.camera
            .process_keyboard(self.input.forward, self.input.right, self.input.up, dt);

        if self.input.mouse_captured {
            self.camera.process_mouse_movement(self.input.mouse_delta);
        }
        self.input.mouse_delta = Vec2::ZERO;

        if let Some(mesh) = self.engine.try_recv_mesh() {
            self.scene.replace_mesh(mesh);
        }

        self.scene.set_fade_ease(self.ui_state.fade_ease);
        self.scene.advance(&self.camera, dt);

        if let Some(gpu) = &mut self.gpu {
            gpu.stars.advance();
            gpu.upload_terrain(self.scene.mesh_mut());
        }
    }

    fn frame_stats(&self) -> FrameStats {
        let mesh = self.scene.mesh();
        FrameStats {
            fps: self.fps,
            vertices: mesh.vertex_count(),
            triangles: mesh.triangle_count(),
            active_highlights: self.scene.highlights().active_count(),
            hovered: self.scene.last_pick().map(|p| p.triangle),
            time: self.scene.time(),
        }
    }

    fn render(&mut self) {
        if self.ui_state.fps_cap_enabled {
            let frame_duration = Duration::from_secs_f64(1.0 / self.ui_state.fps_cap.max(1) as f64);
            let elapsed = self.last_frame_time.elapsed();
            if elapsed < frame_duration {
                std::thread::sleep(frame_duration - elapsed);
            }
        }
        self.last_frame_time = Instant::now();

        let (Some(window), Some(egui_state)) = (&self.window, &mut self.egui_state) else {
            return;
        };

        let raw_input = egui_state.take_egui_input(window);

        let stats = self.frame_stats();
        let last_error = self.engine.last_error();
        let camera_pos = self.camera.position.to_array();
        let camera_mode = self.camera.mode;

        let mut ui_actions = UiActions::default();

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            ui_actions = draw_side_panel(ctx, &mut self.ui_state, &stats, &last_error);

            if self.ui_state.show_help {
                draw_help_overlay(ctx, camera_mode, camera_pos);
            }
        });

        self.handle_ui_actions(ui_actions);

        let Some(gpu) = &mut self.gpu else { return };
        let Some(window) = &self.window else { return };
        let Some(egui_state) = &mut self.egui_state else {
            return;
        };
        let Some(egui_renderer) = &mut self.egui_renderer else {
            return;
        };

        egui_state.handle_platform_output(window, full_output.platform_output);

        if self.ui_state.vsync_enabled != self.last_vsync_state {
            gpu.set_vsync(self.ui_state.vsync_enabled);
            self.last_vsync_state = self.ui_state.vsync_enabled;
        }

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                gpu.resize(gpu.size);
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of GPU memory, skipping frame");
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gpu.update_camera(&self.camera);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, delta) in full_output.textures_delta.set {
            egui_renderer.update_texture(&gpu.device, &gpu.queue, id, &delta);
        }

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Main Encoder"),
            });

        egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        gpu.render_scene(&view, &mut encoder);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in full_output.textures_delta.free {
            egui_renderer.free_texture(&id);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        window.request_redraw();
    }

    fn handle_ui_actions(&mut self, actions: UiActions) {
        if actions.rebuild {
            // Rejections are surfaced through engine.last_error().
            let _ = self
                .engine
                .request_rebuild(self.ui_state.grid, self.ui_state.seed);
        }

        if actions.reset_camera {
            let aspect = self.camera.aspect;
            self.camera = Camera::default();
            self.camera.aspect = aspect;
            self.ui_state.camera_mode = self.camera.mode;
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        let value = if pressed { 1.0 } else { 0.0 };

        match key {
            KeyCode::KeyW | KeyCode::KeyZ => self.input.forward = value,
            KeyCode::KeyS => self.input.forward = -value,
            KeyCode::KeyA | KeyCode::KeyQ => self.input.right = -value,
            KeyCode::KeyD => self.input.right = value,
            KeyCode::Space => self.input.up = value,
            KeyCode::ShiftLeft | KeyCode::ControlLeft => self.input.up = -value,
            KeyCode::Escape if pressed => self.release_mouse(),
            KeyCode::KeyR if pressed => {
                self.ui_state.seed = rand::random();
                let _ = self
                    .engine
                    .request_rebuild(self.ui_state.grid, self.ui_state.seed);
            }
            _ => {}
        }
    }

    fn release_mouse(&mut self) {
        self.input.mouse_captured = false;
        if let Some(window) = &self.window {
            let _ = window.set_cursor_grab(winit::window::CursorGrabMode::None);
            window.set_cursor_visible(true);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Terrain 3D")
            .with_inner_size(PhysicalSize::new(1600, 900));

        let window = match event_loop.create_window(window_attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        if let Err(e) = self.init_gpu(window) {
            log::error!("GPU initialization failed: {:#}", e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(egui_state) = &mut self.egui_state {
            if let Some(window) = &self.window {
                let response = egui_state.on_window_event(window, &event);
                if response.consumed {
                    return;
                }
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                self.engine.stop();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size);
                    self.camera
                        .set_aspect(size.width as f32, size.height as f32);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if self.input.mouse_captured {
                    return;
                }
                if let Some(gpu) = &self.gpu {
                    self.scene.pointer_mut().update_from_screen(
                        position.x as f32,
                        position.y as f32,
                        gpu.size.width as f32,
                        gpu.size.height as f32,
                    );
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.handle_key(key, event.state == ElementState::Pressed);
                }
            }

            WindowEvent::MouseInput {
                button: MouseButton::Right,
                state,
                ..
            } => {
                if state == ElementState::Released {
                    self.release_mouse();
                    return;
                }

                self.input.mouse_captured = true;
                if let Some(window) = &self.window {
                    let _ = window.set_cursor_grab(winit::window::CursorGrabMode::Confined);
                    window.set_cursor_visible(false);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    winit::event::MouseScrollDelta::LineDelta(_, y) => y,
                    winit::event::MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
                self.camera.process_scroll(scroll);
            }

            WindowEvent::RedrawRequested => {
                self.update();
                self.render();
            }

            _ => {}
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: winit::event::DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.input.mouse_captured {
                self.input.mouse_delta.x += delta.0 as f32;
                self.input.mouse_delta.y += delta.1 as f32;
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new()?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
