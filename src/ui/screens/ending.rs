use eframe::egui;
use egui::{Align, Layout, RichText, ScrollArea};

use crate::model::player::Verdict;
use crate::ui::app::App;
use crate::ui::screens::epic_button;
use crate::ui::theme;

pub fn draw(ctx: &egui::Context, app: &mut App) {
    let player = app.session.player().clone();
    let verdict = Verdict::from_iman(player.iman);
    let color = match verdict {
        Verdict::Victory => theme::GOLD,
        Verdict::Completed => theme::BLUE,
        Verdict::Defeat => theme::RED,
    };

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.with_layout(Layout::top_down(Align::Center), |ui| {
            ui.add_space(ui.available_height() * 0.06);
            ui.label(RichText::new(verdict.title()).size(44.0).strong().color(color));
            ui.label(
                RichText::new(format!("{} \u{2022} {}", player.name, player.rank().label()))
                    .color(theme::MUTED_TEXT),
            );
            ui.add_space(18.0);

            ui.horizontal(|ui| {
                ui.add_space(ui.available_width() / 2.0 - 140.0);
                final_stat(ui, "IMAN", player.iman.to_string(), theme::iman_color(player.iman));
                final_stat(ui, "AMAL", player.amal.to_string(), theme::GOLD);
                final_stat(ui, "LALAI", player.lalai.to_string(), theme::RED);
            });

            ui.add_space(18.0);
            theme::card_frame().show(ui, |ui| {
                ui.set_width(480.0);
                ui.label(verdict.assessment());
                ui.add_space(10.0);
                ui.label(
                    RichText::new(format!("\"{}\"", verdict.wisdom()))
                        .italics()
                        .color(theme::BLUE),
                );
            });

            if !player.history.is_empty() {
                ui.add_space(12.0);
                theme::card_frame().show(ui, |ui| {
                    ui.set_width(480.0);
                    ui.label(
                        RichText::new("JEJAK PILIHANMU")
                            .small()
                            .strong()
                            .color(theme::MUTED_TEXT),
                    );
                    ScrollArea::vertical().max_height(120.0).show(ui, |ui| {
                        for (i, entry) in player.history.iter().enumerate() {
                            ui.label(
                                RichText::new(format!("{}. {entry}", i + 1))
                                    .small()
                                    .color(theme::MUTED_TEXT),
                            );
                        }
                    });
                });
            }

            ui.add_space(16.0);
            if epic_button(app, ui, "MAIN LAGI", theme::GOLD).clicked() {
                app.restart();
            }
        });
    });
}

fn final_stat(ui: &mut egui::Ui, label: &str, value: String, color: egui::Color32) {
    theme::highlight_frame(color).show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.set_width(70.0);
            ui.label(RichText::new(label).small().color(theme::MUTED_TEXT));
            ui.label(RichText::new(value).size(22.0).strong().color(color));
        });
    });
}
