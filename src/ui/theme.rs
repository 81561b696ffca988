use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

use crate::terrain::config::{BASE_COLOR, HIGHLIGHT_COLOR};

pub const BG_DEEP: Color32 = Color32::from_rgb(0, 0, 0);
pub const BG_PANEL: Color32 = Color32::from_rgb(4, 8, 16);
pub const BG_WIDGET: Color32 = Color32::from_rgb(10, 20, 36);
pub const BG_WIDGET_HOVER: Color32 = Color32::from_rgb(16, 32, 58);
pub const BG_WIDGET_ACTIVE: Color32 = Color32::from_rgb(22, 44, 80);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(170, 182, 200);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(104, 114, 132);
pub const TEXT_BRIGHT: Color32 = Color32::from_rgb(224, 232, 244);

pub const ACCENT_GREEN: Color32 = Color32::from_rgb(46, 172, 35);
pub const ACCENT_RED: Color32 = Color32::from_rgb(172, 35, 35);
pub const ACCENT_ORANGE: Color32 = Color32::from_rgb(172, 117, 35);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgba_premultiplied(40, 60, 110, 77);

pub fn surface_base() -> Color32 {
    to_color32(BASE_COLOR.to_array())
}

pub fn surface_highlight() -> Color32 {
    to_color32(HIGHLIGHT_COLOR.to_array())
}

fn to_color32(rgb: [f32; 3]) -> Color32 {
    let [r, g, b] = rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    Color32::from_rgb(r, g, b)
}

fn widget(bg: Color32, stroke: Stroke, fg: Color32, expansion: f32) -> egui::style::WidgetVisuals {
    egui::style::WidgetVisuals {
        bg_fill: bg,
        weak_bg_fill: bg,
        bg_stroke: stroke,
        rounding: Rounding::same(4.0),
        fg_stroke: Stroke::new(1.0, fg),
        expansion,
    }
}

pub fn apply_theme(ctx: &egui::Context) {
    let mut style = Style::default();
    let accent = surface_highlight();

    let mut visuals = Visuals::dark();
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.widgets = egui::style::Widgets {
        noninteractive: widget(BG_WIDGET, Stroke::new(1.0, BORDER_SUBTLE), TEXT_MUTED, 0.0),
        inactive: widget(BG_WIDGET, Stroke::new(1.0, BORDER_SUBTLE), TEXT_PRIMARY, 0.0),
        hovered: widget(BG_WIDGET_HOVER, Stroke::new(1.0, accent), TEXT_BRIGHT, 1.0),
        active: widget(BG_WIDGET_ACTIVE, Stroke::new(2.0, accent), TEXT_BRIGHT, 1.0),
        open: widget(BG_WIDGET_ACTIVE, Stroke::new(1.0, accent), TEXT_BRIGHT, 0.0),
    };
    visuals.selection = egui::style::Selection {
        bg_fill: accent.gamma_multiply(0.4),
        stroke: Stroke::new(1.0, accent),
    };
    visuals.hyperlink_color = accent;
    visuals.faint_bg_color = BG_PANEL;
    visuals.extreme_bg_color = BG_DEEP;
    visuals.warn_fg_color = ACCENT_ORANGE;
    visuals.error_fg_color = ACCENT_RED;
    visuals.window_fill = BG_PANEL;
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.panel_fill = BG_PANEL;
    visuals.slider_trailing_fill = true;
    style.visuals = visuals;

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    style.spacing.slider_width = 180.0;

    style.text_styles = [
        (TextStyle::Small, FontId::new(11.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(18.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace)),
    ]
    .into();

    ctx.set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_colors_match_mesh_palette() {
        assert_eq!(surface_base(), Color32::from_rgb(0, 48, 102));
        assert_eq!(surface_highlight(), Color32::from_rgb(26, 128, 255));
    }
}
