use eframe::egui;
use egui::{Align, Layout, ProgressBar, RichText};

use crate::ui::app::App;
use crate::ui::theme;

pub fn draw(ctx: &egui::Context, app: &mut App) {
    let progress = app.ui.progress;
    let theme_label = app.session.theme();

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.with_layout(Layout::top_down(Align::Center), |ui| {
            ui.add_space(ui.available_height() * 0.35);
            ui.label(
                RichText::new("SUMMONING")
                    .size(26.0)
                    .strong()
                    .color(theme::BLUE),
            );
            ui.label(
                RichText::new(theme_label)
                    .small()
                    .color(theme::MUTED_TEXT),
            );
            ui.add_space(20.0);
            ui.add(
                ProgressBar::new(progress / 100.0)
                    .desired_width(360.0)
                    .fill(theme::BLUE),
            );
            ui.label(
                RichText::new(format!("{}%", progress.floor() as u32))
                    .strong()
                    .color(theme::GOLD),
            );
            ui.add_space(30.0);
            ui.label(
                RichText::new("PREPARING THE ARENA")
                    .small()
                    .color(theme::MUTED_TEXT),
            );
        });
    });
}
