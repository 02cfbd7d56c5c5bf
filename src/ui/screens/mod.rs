//! One draw function per game phase, dispatched from the app loop.

mod character_select;
mod consequence;
mod cutscene;
mod ending;
mod gameplay;
mod hud;
mod intro;
mod loading;
mod map;
mod start;

use eframe::egui;
use egui::{Color32, CornerRadius, Response, RichText, Ui};

use crate::audio::cues::Cue;
use crate::model::phase::GamePhase;
use crate::ui::app::App;

pub fn draw(ctx: &egui::Context, app: &mut App) {
    match app.session.phase() {
        GamePhase::StartScreen => start::draw(ctx, app),
        GamePhase::CharacterSelect => character_select::draw(ctx, app),
        GamePhase::IntroStory => intro::draw(ctx, app),
        GamePhase::Map => map::draw(ctx, app),
        GamePhase::Processing => loading::draw(ctx, app),
        GamePhase::Gameplay => gameplay::draw(ctx, app),
        GamePhase::Consequence => consequence::draw(ctx, app),
        GamePhase::Cutscene => cutscene::draw(ctx, app),
        GamePhase::Ending => ending::draw(ctx, app),
    }
}

/// Filled accent button with a one-shot hover blip.
fn epic_button(app: &mut App, ui: &mut Ui, label: &str, accent: Color32) -> Response {
    let response = ui.add(
        egui::Button::new(RichText::new(label).strong().color(Color32::BLACK))
            .fill(accent)
            .corner_radius(CornerRadius::same(4)),
    );
    track_hover(app, &response);
    response
}

fn track_hover(app: &mut App, response: &Response) {
    if response.hovered() {
        if app.ui.hovered != Some(response.id) {
            app.ui.hovered = Some(response.id);
            app.audio.play(Cue::Hover);
        }
    } else if app.ui.hovered == Some(response.id) {
        app.ui.hovered = None;
    }
}
