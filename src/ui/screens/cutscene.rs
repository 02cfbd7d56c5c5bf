//! Mentor debrief between stages, revealed line by line.

use eframe::egui;
use egui::{Align, Color32, Layout, RichText, Sense, Stroke, Vec2};

use crate::ui::app::App;
use crate::ui::screens::epic_button;
use crate::ui::theme;

pub fn draw(ctx: &egui::Context, app: &mut App) {
    let Some(feedback) = app.session.npc_feedback().cloned() else {
        return;
    };
    let dialogue_done = app.ui.mentor_typer.is_done();

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.with_layout(Layout::top_down(Align::Center), |ui| {
            ui.add_space(ui.available_height() * 0.08);
            mentor_avatar(ui);
            ui.add_space(20.0);

            theme::highlight_frame(theme::BLUE).show(ui, |ui| {
                ui.set_width(480.0);
                ui.label(
                    RichText::new("MENTOR ADVICE")
                        .small()
                        .strong()
                        .color(theme::BLUE),
                );
                ui.add_space(10.0);

                let dialogue = ui.label(
                    RichText::new(format!("\"{}\"", app.ui.mentor_typer.visible())).size(15.0),
                );
                if dialogue.interact(Sense::click()).clicked() {
                    app.ui.mentor_typer.skip();
                }

                if dialogue_done {
                    ui.add_space(12.0);
                    egui::Frame::new()
                        .fill(theme::BLUE.linear_multiply(0.08))
                        .stroke(Stroke::new(1.0, theme::BLUE))
                        .inner_margin(egui::Margin::symmetric(12, 8))
                        .show(ui, |ui| {
                            ui.label(
                                RichText::new(format!("\u{2b50} \"{}\"", feedback.wisdom))
                                    .italics()
                                    .color(theme::BLUE),
                            );
                        });
                }

                ui.add_space(14.0);
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if epic_button(app, ui, "NEXT STAGE", theme::GOLD).clicked() {
                        app.next_stage();
                    }
                });
            });
        });
    });
}

fn mentor_avatar(ui: &mut egui::Ui) {
    let (rect, _) = ui.allocate_exact_size(Vec2::splat(90.0), Sense::hover());
    let painter = ui.painter();
    painter.circle(
        rect.center(),
        42.0,
        theme::PANEL,
        Stroke::new(2.0, theme::BLUE),
    );
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "USTADZ",
        egui::FontId::proportional(14.0),
        Color32::WHITE,
    );
}
