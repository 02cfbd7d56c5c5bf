//! Stage-select board: six nodes on a battle map, connected in order.
//! Only the current node is attackable.

use eframe::egui;
use egui::{
    Align, Align2, Color32, FontId, Layout, Pos2, Rect, RichText, Sense, Stroke, Vec2,
};

use crate::audio::cues::Cue;
use crate::model::player::LEVEL_COUNT;
use crate::ui::app::App;
use crate::ui::screens::{epic_button, hud, track_hover};
use crate::ui::theme;

/// Node positions as (x, y) percentages of the board.
const MAP_NODES: [(f32, f32); LEVEL_COUNT] = [
    (15.0, 75.0),
    (25.0, 50.0),
    (45.0, 35.0),
    (65.0, 55.0),
    (80.0, 30.0),
    (85.0, 70.0),
];

pub fn draw(ctx: &egui::Context, app: &mut App) {
    hud::show(ctx, app);

    let current = app.session.player().level_index;
    let hero_color = theme::hero_color(app.session.player().hero_id.hero().color);

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new(app.session.theme())
                    .strong()
                    .color(theme::BLUE),
            );
        });

        let board = Rect::from_min_size(
            ui.cursor().min + Vec2::new(20.0, 10.0),
            Vec2::new(
                ui.available_width() - 40.0,
                (ui.available_height() - 90.0).max(200.0),
            ),
        );
        let painter = ui.painter_at(board);
        painter.rect_filled(board, 12.0, theme::PANEL);

        let center_of = |i: usize| {
            let (x, y) = MAP_NODES[i];
            Pos2::new(
                board.min.x + board.width() * x / 100.0,
                board.min.y + board.height() * y / 100.0,
            )
        };

        // Energy lines between consecutive nodes; solid once traveled.
        for i in 0..LEVEL_COUNT - 1 {
            let unlocked = i < current;
            painter.line_segment(
                [center_of(i), center_of(i + 1)],
                Stroke::new(
                    if unlocked { 3.0 } else { 1.5 },
                    if unlocked { theme::BLUE } else { theme::FAINT_LINE },
                ),
            );
        }

        for i in 0..LEVEL_COUNT {
            let center = center_of(i);
            let hit = Rect::from_center_size(center, Vec2::splat(52.0));
            let response = ui.interact(hit, ui.id().with(("map-node", i)), Sense::click());
            track_hover(app, &response);

            if i < current {
                painter.circle(center, 18.0, theme::GOLD, Stroke::new(2.0, Color32::WHITE));
                painter.text(
                    center,
                    Align2::CENTER_CENTER,
                    "\u{2714}",
                    FontId::proportional(16.0),
                    Color32::WHITE,
                );
            } else if i == current {
                painter.circle(
                    center,
                    24.0,
                    Color32::from_black_alpha(160),
                    Stroke::new(2.0, theme::BLUE),
                );
                painter.circle(center, 14.0, hero_color, Stroke::new(2.0, Color32::WHITE));
                painter.text(
                    center - Vec2::new(0.0, 38.0),
                    Align2::CENTER_CENTER,
                    "BATTLE!",
                    FontId::proportional(11.0),
                    theme::RED,
                );
            } else {
                painter.circle(
                    center,
                    15.0,
                    theme::DARK,
                    Stroke::new(1.0, theme::FAINT_LINE),
                );
                painter.text(
                    center,
                    Align2::CENTER_CENTER,
                    (i + 1).to_string(),
                    FontId::proportional(12.0),
                    theme::MUTED_TEXT,
                );
            }

            if response.clicked() {
                if i == current {
                    app.start_level();
                } else {
                    app.audio.play(Cue::Error);
                }
            }
        }

        ui.advance_cursor_after_rect(board);
        ui.add_space(12.0);
        ui.with_layout(Layout::top_down(Align::Center), |ui| {
            if epic_button(app, ui, "\u{2694} ENTER BATTLE", theme::GOLD).clicked() {
                app.start_level();
            }
        });
    });
}
