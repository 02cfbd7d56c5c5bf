//! Top status bar shared by the in-run screens.

use eframe::egui;
use egui::{Color32, ProgressBar, RichText, Stroke, Vec2};

use crate::model::player::{IMAN_MAX, PlayerState};
use crate::ui::app::App;
use crate::ui::theme;

pub fn show(ctx: &egui::Context, app: &mut App) {
    let player = app.session.player().clone();
    let hero_color = theme::hero_color(player.hero_id.hero().color);

    egui::TopBottomPanel::top("hud")
        .frame(
            egui::Frame::new()
                .fill(theme::PANEL)
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                hero_badge(ui, hero_color);
                ui.label(RichText::new(&player.name).strong());
                ui.label(
                    RichText::new(format!("LV {}", player.level_index + 1))
                        .color(theme::MUTED_TEXT)
                        .small(),
                );

                ui.separator();
                stat_bars(ui, &player);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let icon = if app.audio.muted() { "\u{1f507}" } else { "\u{1f50a}" };
                    if ui.button(icon).clicked() {
                        app.toggle_mute();
                    }
                });
            });
        });
}

fn hero_badge(ui: &mut egui::Ui, color: Color32) {
    let (rect, _) = ui.allocate_exact_size(Vec2::splat(18.0), egui::Sense::hover());
    ui.painter()
        .circle(rect.center(), 8.0, color, Stroke::new(1.0, Color32::WHITE));
}

fn stat_bars(ui: &mut egui::Ui, player: &PlayerState) {
    ui.label(RichText::new("IMAN").small().color(theme::MUTED_TEXT));
    ui.add(
        ProgressBar::new(player.iman as f32 / IMAN_MAX as f32)
            .desired_width(140.0)
            .fill(theme::iman_color(player.iman))
            .text(RichText::new(player.iman.to_string()).small()),
    );
    ui.label(
        RichText::new(format!("\u{2b50} {}", player.amal))
            .color(theme::GOLD)
            .strong(),
    );
    ui.label(
        RichText::new(format!("\u{26a0} {}", player.lalai))
            .color(theme::RED)
            .strong(),
    );
}
