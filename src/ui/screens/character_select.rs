use eframe::egui;
use egui::{Align, Layout, ProgressBar, RichText};

use crate::audio::cues::Cue;
use crate::model::hero::{HeroId, HEROES};
use crate::ui::app::App;
use crate::ui::screens::{epic_button, track_hover};
use crate::ui::theme;

pub fn draw(ctx: &egui::Context, app: &mut App) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.with_layout(Layout::top_down(Align::Center), |ui| {
            ui.add_space(30.0);
            ui.label(
                RichText::new("PILIH PAHLAWANMU")
                    .size(30.0)
                    .strong()
                    .color(theme::GOLD),
            );
            ui.add_space(20.0);

            let selected = app.ui.selected_hero;
            let hero = selected.hero();
            let accent = theme::hero_color(hero.color);

            theme::highlight_frame(accent).show(ui, |ui| {
                ui.set_width(360.0);
                ui.label(RichText::new(hero.name).size(24.0).strong().color(accent));
                ui.label(
                    RichText::new(hero.title)
                        .small()
                        .color(theme::BLUE),
                );
                ui.add_space(10.0);
                stat_bar(ui, "KETEGUHAN", hero.stats.keteguhan, accent);
                stat_bar(ui, "ILMU", hero.stats.ilmu, theme::BLUE);
                stat_bar(ui, "AMAL", hero.stats.amal, theme::GREEN);
                ui.add_space(10.0);
                ui.separator();
                ui.label(
                    RichText::new(format!("\"{}\"", hero.description))
                        .italics()
                        .color(theme::MUTED_TEXT),
                );
            });

            ui.add_space(18.0);
            ui.horizontal(|ui| {
                ui.add_space(ui.available_width() / 2.0 - 3.0 * 60.0 / 2.0 - 40.0);
                for candidate in HeroId::ALL {
                    hero_tile(app, ui, candidate);
                }
            });

            ui.add_space(18.0);
            if epic_button(app, ui, "LOCK IN HERO", theme::GOLD).clicked() {
                app.confirm_hero();
            }
        });
    });
}

fn hero_tile(app: &mut App, ui: &mut egui::Ui, candidate: HeroId) {
    let hero = candidate.hero();
    let accent = theme::hero_color(hero.color);
    let is_selected = app.ui.selected_hero == candidate;
    let label = RichText::new(hero.name)
        .strong()
        .color(if is_selected { accent } else { theme::MUTED_TEXT });
    let response = ui.add_sized(
        [110.0, 42.0],
        egui::Button::new(label).stroke(egui::Stroke::new(
            if is_selected { 2.0 } else { 1.0 },
            if is_selected { accent } else { theme::FAINT_LINE },
        )),
    );
    track_hover(app, &response);
    if response.clicked() && !is_selected {
        app.ui.selected_hero = candidate;
        app.audio.play(Cue::Click);
    }
}

fn stat_bar(ui: &mut egui::Ui, label: &str, value: u8, color: egui::Color32) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [90.0, 16.0],
            egui::Label::new(RichText::new(label).small().color(theme::MUTED_TEXT)),
        );
        ui.add(
            ProgressBar::new(value as f32 / 100.0)
                .desired_width(200.0)
                .fill(color),
        );
    });
}
