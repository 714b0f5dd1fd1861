//! Tema claro con acento verde

use egui::{Color32, CornerRadius, Stroke, Style, Visuals};

/// Paleta de colores
pub struct Colors;

impl Colors {
    pub const BG: Color32 = Color32::from_rgb(245, 246, 242);
    pub const BG_CARD: Color32 = Color32::from_rgb(255, 255, 255);
    pub const BG_HOVER: Color32 = Color32::from_rgb(232, 245, 233);
    pub const ACCENT: Color32 = Color32::from_rgb(76, 175, 80);
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(33, 33, 33);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(97, 97, 97);
    pub const SUCCESS: Color32 = Color32::from_rgb(46, 125, 50);
    pub const WARNING: Color32 = Color32::from_rgb(239, 108, 0);
    pub const ERROR: Color32 = Color32::from_rgb(198, 40, 40);
    pub const BORDER: Color32 = Color32::from_rgb(214, 217, 209);
}

pub fn light_theme() -> Style {
    let mut style = Style::default();
    let mut visuals = Visuals::light();

    visuals.panel_fill = Colors::BG;
    visuals.window_fill = Colors::BG_CARD;
    visuals.faint_bg_color = Colors::BG_HOVER;

    for widget in [
        &mut visuals.widgets.noninteractive,
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
    ] {
        widget.corner_radius = CornerRadius::same(6);
    }
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, Colors::TEXT_SECONDARY);
    visuals.widgets.hovered.bg_fill = Colors::BG_HOVER;

    visuals.widgets.active.bg_fill = Colors::ACCENT;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);
    visuals.widgets.active.corner_radius = CornerRadius::same(6);

    visuals.selection.bg_fill = Colors::ACCENT.gamma_multiply(0.4);
    visuals.selection.stroke = Stroke::new(1.0, Colors::ACCENT);

    style.visuals = visuals;
    style
}
