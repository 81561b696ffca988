use egui::{Color32, Context, RichText, ScrollArea, Ui};

use crate::renderer::CameraMode;
use crate::terrain::Ease;
use crate::terrain::config::{SEGMENT_RANGE, WIDTH_RANGE};
use crate::ui::state::{FrameStats, UiState};
use crate::ui::theme::*;

#[derive(Default)]
pub struct UiActions {
    pub rebuild: bool,
    pub reset_camera: bool,
}

pub fn draw_side_panel(
    ctx: &Context,
    state: &mut UiState,
    stats: &FrameStats,
    last_error: &Option<String>,
) -> UiActions {
    let mut actions = UiActions::default();

    egui::SidePanel::right("control_panel")
        .min_width(280.0)
        .max_width(380.0)
        .default_width(300.0)
        .frame(egui::Frame::default().fill(BG_PANEL).inner_margin(16.0))
        .show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.heading(RichText::new("Terrain").strong());
                ui.add_space(4.0);
                ui.label(RichText::new("Animated surface & hover highlight").color(TEXT_MUTED).size(11.0));
                ui.add_space(16.0);

                section_header(ui, "PLANE");
                actions.rebuild |= grid_controls(ui, state);
                if let Some(err) = last_error {
                    error_box(ui, err);
                }
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    ui.label("Seed:");
                    actions.rebuild |= ui.add(egui::DragValue::new(&mut state.seed).speed(1.0)).changed();
                    if ui.button("Randomize").clicked() {
                        state.seed = rand::random();
                        actions.rebuild = true;
                    }
                });
                fade_controls(ui, &mut state.fade_ease);
                ui.add_space(16.0);

                ui.separator();
                ui.add_space(12.0);

                section_header(ui, "VIEW");
                camera_controls(ui, &mut state.camera_mode);
                if ui.button("Reset camera").clicked() {
                    actions.reset_camera = true;
                }
                ui.checkbox(&mut state.show_help, "Controls overlay");
                ui.add_space(16.0);

                perf_controls(ui, state);

                if state.show_stats {
                    ui.add_space(16.0);
                    stats_panel(ui, stats);
                }
            });
        });

    actions
}

fn section_header(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).color(TEXT_MUTED).size(11.0).strong());
    ui.add_space(4.0);
}

fn grid_controls(ui: &mut Ui, state: &mut UiState) -> bool {
    let mut changed = false;
    egui::Grid::new("plane").num_columns(2).spacing([8.0, 4.0]).show(ui, |ui| {
        ui.label("Width");
        changed |= ui.add(egui::Slider::new(&mut state.grid.width, WIDTH_RANGE)).changed();
        ui.end_row();

        ui.label("Height");
        changed |= ui.add(egui::Slider::new(&mut state.grid.height, WIDTH_RANGE)).changed();
        ui.end_row();

        ui.label("Width segs");
        changed |= ui.add(egui::Slider::new(&mut state.grid.width_segments, SEGMENT_RANGE)).changed();
        ui.end_row();

        ui.label("Height segs");
        changed |= ui.add(egui::Slider::new(&mut state.grid.height_segments, SEGMENT_RANGE)).changed();
        ui.end_row();
    });
    changed
}

fn error_box(ui: &mut Ui, err: &str) {
    ui.add_space(6.0);
    egui::Frame::default()
        .fill(Color32::from_rgb(40, 15, 15))
        .stroke(egui::Stroke::new(1.0, ACCENT_RED))
        .rounding(4.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.label(RichText::new(err).color(ACCENT_RED).size(11.0));
        });
}

fn fade_controls(ui: &mut Ui, ease: &mut Ease) {
    ui.horizontal(|ui| {
        ui.label("Fade:");
        if ui.selectable_label(*ease == Ease::QuadOut, "Ease out").clicked() {
            *ease = Ease::QuadOut;
        }
        if ui.selectable_label(*ease == Ease::Linear, "Linear").clicked() {
            *ease = Ease::Linear;
        }
    });
}

fn camera_controls(ui: &mut Ui, mode: &mut CameraMode) {
    ui.horizontal(|ui| {
        ui.label("Camera:");
        if ui.selectable_label(*mode == CameraMode::Orbital, "Orbital").clicked() {
            *mode = CameraMode::Orbital;
        }
        if ui.selectable_label(*mode == CameraMode::Free, "Free").clicked() {
            *mode = CameraMode::Free;
        }
    });
}

fn perf_controls(ui: &mut Ui, state: &mut UiState) {
    section_header(ui, "PERFORMANCE");
    ui.horizontal(|ui| {
        ui.checkbox(&mut state.vsync_enabled, "VSync");
        ui.checkbox(&mut state.show_stats, "Stats");
    });
    ui.horizontal(|ui| {
        ui.checkbox(&mut state.fps_cap_enabled, "FPS Cap:");
        ui.add_enabled(state.fps_cap_enabled,
            egui::DragValue::new(&mut state.fps_cap).range(30..=500).suffix(" fps"));
    });
}

fn stats_panel(ui: &mut Ui, stats: &FrameStats) {
    section_header(ui, "STATISTICS");
    egui::Frame::default()
        .fill(BG_WIDGET)
        .stroke(egui::Stroke::new(1.0, BORDER_SUBTLE))
        .rounding(6.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.style_mut().override_font_id = Some(egui::FontId::new(11.0, egui::FontFamily::Monospace));

            let fps_color = if stats.fps >= 60.0 { ACCENT_GREEN } else if stats.fps >= 30.0 { ACCENT_ORANGE } else { ACCENT_RED };

            egui::Grid::new("stats").num_columns(2).spacing([20.0, 4.0]).show(ui, |ui| {
                ui.label(RichText::new("FPS").color(TEXT_MUTED));
                ui.label(RichText::new(format!("{:.0}", stats.fps)).color(fps_color));
                ui.end_row();

                ui.label(RichText::new("Vertices").color(TEXT_MUTED));
                ui.label(RichText::new(stats.vertices.to_string()).color(TEXT_PRIMARY));
                ui.end_row();

                ui.label(RichText::new("Triangles").color(TEXT_MUTED));
                ui.label(RichText::new(stats.triangles.to_string()).color(TEXT_PRIMARY));
                ui.end_row();

                ui.label(RichText::new("Fading").color(TEXT_MUTED));
                ui.label(RichText::new(stats.active_highlights.to_string()).color(surface_highlight()));
                ui.end_row();

                ui.label(RichText::new("Time").color(TEXT_MUTED));
                ui.label(RichText::new(format!("{:.2}", stats.time)).color(TEXT_PRIMARY));
                ui.end_row();
            });

            ui.add_space(8.0);

            let hovered = match stats.hovered {
                Some([a, b, c]) => RichText::new(format!("{} {} {}", a, b, c)).color(surface_highlight()),
                None => RichText::new("none").color(TEXT_MUTED),
            };
            ui.horizontal(|ui| {
                ui.label(RichText::new("Hovered:").color(TEXT_MUTED));
                ui.label(hovered);
            });
        });
}

pub fn draw_help_overlay(ctx: &Context, mode: CameraMode, pos: [f32; 3]) {
    let controls = match mode {
        CameraMode::Orbital => "Hover - Highlight | RMB+Drag - Orbit | Scroll - Zoom",
        CameraMode::Free => "Hover - Highlight | WASD - Move | RMB+Drag - Look | Scroll - Speed",
    };

    egui::Area::new(egui::Id::new("help_overlay"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(12.0, -12.0))
        .show(ctx, |ui| {
            egui::Frame::default()
                .fill(Color32::from_black_alpha(180))
                .stroke(egui::Stroke::new(1.0, surface_base()))
                .rounding(6.0)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.style_mut().override_font_id = Some(egui::FontId::new(11.0, egui::FontFamily::Monospace));
                    ui.label(RichText::new(controls).color(TEXT_MUTED));
                    ui.label(RichText::new(format!("Pos: ({:.1}, {:.1}, {:.1})", pos[0], pos[1], pos[2])).color(TEXT_MUTED));
                });
        });
}
