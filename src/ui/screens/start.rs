use eframe::egui;
use egui::{Align, Layout, RichText, TextEdit};

use crate::audio::cues::Cue;
use crate::ui::app::App;
use crate::ui::screens::epic_button;
use crate::ui::theme;

pub fn draw(ctx: &egui::Context, app: &mut App) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let mut scale = app.settings.ui_scale;

        ui.with_layout(Layout::top_down(Align::Center), |ui| {
            ui.add_space(ui.available_height() * 0.18);

            ui.label(
                RichText::new("JEJAK AMAL")
                    .size(52.0)
                    .strong()
                    .color(theme::GOLD),
            );
            ui.label(
                RichText::new("LEGENDS")
                    .size(30.0)
                    .color(theme::BLUE),
            );
            ui.label(
                RichText::new("Arena Kehidupan: Setiap Pilihan Adalah Pertarungan")
                    .italics()
                    .color(theme::MUTED_TEXT),
            );
            ui.add_space(28.0);

            let edit = ui.add_sized(
                [260.0, 28.0],
                TextEdit::singleline(&mut app.ui.name_input)
                    .hint_text("MASUKKAN NAMA PAHLAWAN")
                    .char_limit(12)
                    .horizontal_align(Align::Center),
            );
            if edit.changed() {
                app.audio.play(Cue::Typing);
            }
            ui.add_space(12.0);

            let clicked = epic_button(app, ui, "MULAI PETUALANGAN", theme::GOLD).clicked();
            let entered = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if clicked || entered {
                app.start_game();
            }

            if let Some(last_run) = app.session.history().latest().cloned() {
                ui.add_space(24.0);
                theme::card_frame().show(ui, |ui| {
                    ui.label(RichText::new("LAST RUN").small().color(theme::MUTED_TEXT));
                    ui.label(RichText::new(&last_run.name).strong());
                    ui.label(
                        RichText::new(last_run.rank().label())
                            .color(theme::GOLD)
                            .small(),
                    );
                    ui.label(
                        RichText::new(format!("Iman: {}", last_run.iman))
                            .small()
                            .color(theme::MUTED_TEXT),
                    );
                });
            }
        });

        ui.with_layout(Layout::bottom_up(Align::Center), |ui| {
            ui.add_space(8.0);
            ui.label(
                RichText::new("Media Pembelajaran PAI \u{2022} MGMP PAI SMP")
                    .small()
                    .color(theme::MUTED_TEXT),
            );
            ui.horizontal(|ui| {
                ui.add_space(ui.available_width() / 2.0 - 130.0);
                let icon = if app.audio.muted() { "\u{1f507}" } else { "\u{1f50a}" };
                if ui.button(icon).clicked() {
                    app.toggle_mute();
                }
                ui.label(RichText::new("UI Scale").small());
                if ui
                    .add(egui::Slider::new(&mut scale, 0.75..=2.0).show_value(false))
                    .changed()
                {
                    app.set_ui_scale(scale);
                }
            });
        });
    });
}
