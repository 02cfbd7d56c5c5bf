use eframe::egui;
use egui::{Align, Layout, RichText};

use crate::ui::app::App;
use crate::ui::screens::epic_button;
use crate::ui::theme;

pub fn draw(ctx: &egui::Context, app: &mut App) {
    let player = app.session.player().clone();
    let hero = player.hero_id.hero();
    let accent = theme::hero_color(hero.color);

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.with_layout(Layout::top_down(Align::Center), |ui| {
            ui.add_space(ui.available_height() * 0.12);
            ui.label(RichText::new(&player.name).size(28.0).strong().color(accent));
            ui.label(RichText::new(hero.title).color(theme::BLUE).small());
            ui.add_space(24.0);

            theme::card_frame().show(ui, |ui| {
                ui.set_width(420.0);
                ui.label(
                    RichText::new("MISSION BRIEF")
                        .small()
                        .strong()
                        .color(theme::BLUE),
                );
                ui.add_space(8.0);
                ui.label(
                    "Selamat datang di Arena Kehidupan. Setiap pilihanmu \
                     mempengaruhi Iman (HP) dan Amal (Gold).",
                );
                ui.add_space(6.0);
                ui.label(
                    RichText::new("Waspadai Lalai (Threats). Bertahanlah sampai akhir hari.")
                        .color(theme::RED),
                );
                ui.add_space(14.0);
                if epic_button(app, ui, "OPEN MAP  \u{27a1}", theme::GOLD).clicked() {
                    app.open_map();
                }
            });
        });
    });
}
