use std::time::{SystemTime, UNIX_EPOCH};

use eframe::egui;
use egui::{Align, Layout, RichText};

use crate::ui::app::App;
use crate::ui::screens::{epic_button, hud};
use crate::ui::theme;

pub fn draw(ctx: &egui::Context, app: &mut App) {
    hud::show(ctx, app);

    let Some(choice) = app.session.last_choice().cloned() else {
        return;
    };
    let is_good = choice.impact.iman > 0;
    let is_bad = choice.impact.iman < 0;
    let shaking = app.ui.shake_until.is_some();

    let (headline, color) = if is_good {
        ("VICTORY", theme::GREEN)
    } else if is_bad {
        ("DAMAGE", theme::RED)
    } else {
        ("NEUTRAL", theme::MUTED_TEXT)
    };

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.with_layout(Layout::top_down(Align::Center), |ui| {
            ui.add_space(ui.available_height() * 0.1);

            // Quick horizontal judder while the hit lands.
            let dx = if shaking {
                let millis = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .unwrap_or_default()
                    .subsec_millis() as f32;
                (millis / 25.0).sin() * 6.0
            } else {
                0.0
            };
            ui.horizontal(|ui| {
                ui.add_space((ui.available_width() / 2.0 - 110.0 + dx).max(0.0));
                ui.label(RichText::new(headline).size(48.0).strong().color(color));
            });

            ui.add_space(16.0);
            theme::card_frame().show(ui, |ui| {
                ui.set_width(440.0);
                ui.label(
                    RichText::new("ACTION REPORT")
                        .small()
                        .strong()
                        .color(theme::BLUE),
                );
                ui.add_space(8.0);
                ui.label(RichText::new(format!("\"{}\"", choice.feedback)).italics());
                ui.add_space(12.0);

                ui.horizontal(|ui| {
                    ui.add_space(ui.available_width() / 2.0 - 90.0);
                    if choice.impact.iman != 0 {
                        stat_chip(
                            ui,
                            "IMAN",
                            format!("{:+}", choice.impact.iman),
                            if is_good { theme::GREEN } else { theme::RED },
                        );
                    }
                    if choice.impact.amal > 0 {
                        stat_chip(ui, "GOLD", format!("+{}", choice.impact.amal), theme::GOLD);
                    }
                    if choice.impact.lalai > 0 {
                        stat_chip(ui, "LALAI", format!("+{}", choice.impact.lalai), theme::RED);
                    }
                });

                ui.add_space(14.0);
                if epic_button(app, ui, "CONTINUE", theme::BLUE).clicked() {
                    app.proceed_to_mentor();
                }
            });
        });
    });
}

fn stat_chip(ui: &mut egui::Ui, label: &str, value: String, color: egui::Color32) {
    theme::highlight_frame(color).show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.set_width(60.0);
            ui.label(RichText::new(label).small().color(theme::MUTED_TEXT));
            ui.label(RichText::new(value).size(20.0).strong().color(color));
        });
    });
}
