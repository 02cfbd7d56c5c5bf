//! The battle screen: level backdrop, scenario text revealed by the
//! typewriter, and the three choices as attackable targets.

use eframe::egui;
use egui::{Align2, Color32, FontId, Pos2, Rect, RichText, Sense, Stroke, Vec2};

use crate::audio::cues::Cue;
use crate::model::level::Choice;
use crate::ui::app::App;
use crate::ui::screens::hud;
use crate::ui::theme;

pub fn draw(ctx: &egui::Context, app: &mut App) {
    hud::show(ctx, app);

    let Some(level) = app.session.current_level().cloned() else {
        return;
    };
    let level_index = app.session.player().level_index;
    let attacking = app
        .ui
        .pending_attack
        .as_ref()
        .map(|p| p.choice.id.clone());

    egui::CentralPanel::default().show(ctx, |ui| {
        draw_stage(ui, app, level_index, &level.location);

        ui.add_space(10.0);
        let scenario_card = theme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                RichText::new(app.ui.scenario_typer.visible())
                    .size(16.0)
                    .color(Color32::from_rgb(0xf1, 0xf5, 0xf9)),
            );
        });
        if scenario_card
            .response
            .interact(Sense::click())
            .clicked()
        {
            app.ui.scenario_typer.skip();
        }

        ui.add_space(12.0);
        ui.columns(3, |columns| {
            for (column, choice) in columns.iter_mut().zip(level.choices.iter()) {
                let is_attacked = attacking.as_deref() == Some(choice.id.as_str());
                choice_card(column, app, choice, is_attacked, attacking.is_some());
            }
        });
    });
}

fn draw_stage(ui: &mut egui::Ui, app: &App, level_index: usize, location: &str) {
    let height = (ui.available_height() * 0.38).max(140.0);
    let (rect, _) = ui.allocate_exact_size(Vec2::new(ui.available_width(), height), Sense::hover());
    let painter = ui.painter_at(rect);

    match app.backdrops.texture(level_index) {
        Some(texture) => {
            painter.image(
                texture.id(),
                rect,
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::from_gray(150),
            );
        }
        None => {
            painter.rect_filled(rect, 8.0, theme::PANEL);
        }
    }

    painter.text(
        rect.center_bottom() - Vec2::new(0.0, 16.0),
        Align2::CENTER_CENTER,
        location.to_uppercase(),
        FontId::proportional(13.0),
        theme::GOLD,
    );
}

fn choice_card(
    ui: &mut egui::Ui,
    app: &mut App,
    choice: &Choice,
    is_attacked: bool,
    any_attacking: bool,
) {
    let stroke = if is_attacked {
        Stroke::new(2.0, theme::RED)
    } else {
        Stroke::new(1.0, theme::FAINT_LINE)
    };
    let text = RichText::new(&choice.text).size(13.0);
    let response = ui.add_enabled(
        !any_attacking,
        egui::Button::new(text)
            .wrap()
            .stroke(stroke)
            .min_size(Vec2::new(ui.available_width(), 90.0)),
    );
    // Metallic hover blip instead of the soft menu one; these are
    // targets, not buttons.
    if response.hovered() {
        if app.ui.hovered != Some(response.id) {
            app.ui.hovered = Some(response.id);
            app.audio.play(Cue::BattleTyping);
        }
    } else if app.ui.hovered == Some(response.id) {
        app.ui.hovered = None;
    }
    if response.clicked() {
        app.attack(choice.clone());
    }
}
