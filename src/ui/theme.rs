//! Shared palette and frame helpers for the battle-arena look.

use eframe::egui;
use egui::{Color32, CornerRadius, Frame, Margin, Stroke};

pub const DARK: Color32 = Color32::from_rgb(0x0b, 0x11, 0x21);
pub const PANEL: Color32 = Color32::from_rgb(0x0f, 0x17, 0x2a);
pub const BLUE: Color32 = Color32::from_rgb(0x00, 0xc2, 0xff);
pub const GOLD: Color32 = Color32::from_rgb(0xc9, 0xa0, 0x50);
pub const RED: Color32 = Color32::from_rgb(0xff, 0x2e, 0x2e);
pub const GREEN: Color32 = Color32::from_rgb(0x22, 0xc5, 0x5e);
pub const MUTED_TEXT: Color32 = Color32::from_rgb(0x94, 0xa3, 0xb8);
pub const FAINT_LINE: Color32 = Color32::from_rgb(0x33, 0x41, 0x55);

pub fn hero_color(rgb: [u8; 3]) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

/// Iman reads as hit points; its color shifts with how safe it is.
pub fn iman_color(iman: i32) -> Color32 {
    if iman >= 80 {
        GOLD
    } else if iman >= 55 {
        GREEN
    } else if iman >= 30 {
        Color32::from_rgb(0xea, 0xb3, 0x08)
    } else {
        RED
    }
}

pub fn card_frame() -> Frame {
    Frame::new()
        .fill(PANEL)
        .stroke(Stroke::new(1.0, FAINT_LINE))
        .corner_radius(CornerRadius::same(6))
        .inner_margin(Margin::symmetric(16, 12))
}

pub fn highlight_frame(accent: Color32) -> Frame {
    Frame::new()
        .fill(PANEL)
        .stroke(Stroke::new(2.0, accent))
        .corner_radius(CornerRadius::same(6))
        .inner_margin(Margin::symmetric(16, 12))
}

pub fn apply_visuals(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = DARK;
    visuals.window_fill = PANEL;
    visuals.override_text_color = Some(Color32::from_rgb(0xe2, 0xe8, 0xf0));
    visuals.selection.bg_fill = BLUE.linear_multiply(0.4);
    ctx.set_visuals(visuals);
}
