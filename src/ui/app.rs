use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::{Duration, Instant};

use eframe::egui;
use log::warn;

use crate::audio::cues::Cue;
use crate::audio::director::AudioDirector;
use crate::engine::content::ContentProvider;
use crate::engine::engine::Engine;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::engine::session::GameSession;
use crate::model::hero::HeroId;
use crate::model::level::Choice;
use crate::model::phase::{GamePhase, Mood};
use crate::ui::backdrop::BackdropStore;
use crate::ui::screens;
use crate::ui::settings::UiSettings;
use crate::ui::theme;
use crate::ui::typewriter::Typewriter;

/// Choice struck on the battle board; its effect lands after the
/// strike animation has had its moment.
pub(crate) struct PendingAttack {
    pub choice: Choice,
    pub strike_at: Instant,
}

pub(crate) struct UiState {
    pub name_input: String,
    pub selected_hero: HeroId,
    pub alert: Option<String>,
    pub progress: f32,
    pub last_progress_tick: Instant,
    pub scenario_typer: Typewriter,
    pub mentor_typer: Typewriter,
    pub pending_attack: Option<PendingAttack>,
    pub battle_callout_at: Option<Instant>,
    pub shake_until: Option<Instant>,
    pub last_phase: Option<GamePhase>,
    pub last_mood: Option<Mood>,
    /// Widget currently under the pointer, for one-shot hover cues.
    pub hovered: Option<egui::Id>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            name_input: String::new(),
            selected_hero: HeroId::Warrior,
            alert: None,
            progress: 0.0,
            last_progress_tick: Instant::now(),
            scenario_typer: Typewriter::new(35),
            mentor_typer: Typewriter::new(30),
            pending_attack: None,
            battle_callout_at: None,
            shake_until: None,
            last_phase: None,
            last_mood: None,
            hovered: None,
        }
    }
}

pub struct App {
    pub(crate) session: GameSession,
    pub(crate) audio: AudioDirector,
    pub(crate) settings: UiSettings,
    pub(crate) backdrops: BackdropStore,
    pub(crate) ui: UiState,
    cmd_tx: Sender<EngineCommand>,
    resp_rx: Receiver<EngineResponse>,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        theme::apply_visuals(&cc.egui_ctx);
        let settings = UiSettings::load();

        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        std::thread::spawn(move || {
            let mut engine = Engine::new(cmd_rx, resp_tx, ContentProvider::from_env());
            engine.run();
        });

        Self {
            session: GameSession::default(),
            audio: AudioDirector::new(settings.muted),
            settings,
            backdrops: BackdropStore::new(),
            ui: UiState::default(),
            cmd_tx,
            resp_rx,
        }
    }

    fn send(&mut self, cmd: EngineCommand) {
        if self.cmd_tx.send(cmd).is_ok() {
            return;
        }
        warn!("engine worker is gone");
        if self.session.level_fetch_aborted() {
            self.audio.play(Cue::Error);
            self.ui.alert = Some("Network Error. Retry.".into());
        }
    }

    pub(crate) fn start_game(&mut self) {
        let name = self.ui.name_input.clone();
        if self.session.start_game(&name) {
            self.audio.play(Cue::Confirm);
        }
    }

    pub(crate) fn confirm_hero(&mut self) {
        if self.session.confirm_hero(self.ui.selected_hero) {
            self.audio.play(Cue::Confirm);
            self.audio.announce("Welcome to Jejak Amal Legends.");
        }
    }

    pub(crate) fn open_map(&mut self) {
        if self.session.enter_map() {
            self.audio.play(Cue::Click);
        }
    }

    pub(crate) fn start_level(&mut self) {
        if !self.session.begin_level_fetch() {
            return;
        }
        self.audio.play(Cue::Click);
        self.ui.pending_attack = None;
        let token = self.session.run_token();
        let level_index = self.session.player().level_index;
        self.send(EngineCommand::FetchLevel { token, level_index });
    }

    /// Queue a strike; the stat change lands 600 ms later so the hit
    /// reads as an attack, not a menu click.
    pub(crate) fn attack(&mut self, choice: Choice) {
        if self.session.phase() != GamePhase::Gameplay || self.ui.pending_attack.is_some() {
            return;
        }
        self.audio.play(Cue::AttackSlash);
        self.ui.pending_attack = Some(PendingAttack {
            choice,
            strike_at: Instant::now() + Duration::from_millis(600),
        });
    }

    pub(crate) fn proceed_to_mentor(&mut self) {
        let Some(last_choice) = self.session.last_choice().map(|c| c.text.clone()) else {
            return;
        };
        if !self.session.begin_mentor_fetch() {
            return;
        }
        self.audio.play(Cue::Click);
        let token = self.session.run_token();
        let player = self.session.player().clone();
        self.send(EngineCommand::FetchMentor {
            token,
            player,
            last_choice,
        });
    }

    pub(crate) fn next_stage(&mut self) {
        if self.session.advance() {
            self.audio.play(Cue::Click);
        }
    }

    pub(crate) fn restart(&mut self) {
        if self.session.restart() {
            self.audio.play(Cue::Click);
            self.ui.name_input.clear();
            self.ui.selected_hero = HeroId::Warrior;
            self.ui.pending_attack = None;
        }
    }

    pub(crate) fn toggle_mute(&mut self) {
        self.audio.toggle_mute();
        self.settings.muted = self.audio.muted();
        self.settings.save();
    }

    pub(crate) fn set_ui_scale(&mut self, scale: f32) {
        if (scale - self.settings.ui_scale).abs() > f32::EPSILON {
            self.settings.ui_scale = scale;
            self.settings.save();
        }
    }

    fn pump_responses(&mut self) {
        loop {
            match self.resp_rx.try_recv() {
                Ok(EngineResponse::LevelReady { token, level }) => {
                    let scenario = level.scenario.clone();
                    if self.session.level_ready(token, level) {
                        self.ui.scenario_typer.start(&scenario, Instant::now());
                    }
                }
                Ok(EngineResponse::MentorReady { token, feedback }) => {
                    let dialogue = feedback.dialogue.clone();
                    if self.session.mentor_ready(token, feedback) {
                        self.ui.mentor_typer.start(&dialogue, Instant::now());
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.session.level_fetch_aborted() {
                        self.audio.play(Cue::Error);
                        self.ui.alert = Some("Network Error. Retry.".into());
                    }
                    break;
                }
            }
        }
    }

    fn land_pending_attack(&mut self, now: Instant) {
        let due = self
            .ui
            .pending_attack
            .as_ref()
            .is_some_and(|p| now >= p.strike_at);
        if !due {
            return;
        }
        let Some(pending) = self.ui.pending_attack.take() else {
            return;
        };
        if pending.choice.impact.iman < 0 {
            self.audio.play(Cue::Error);
            self.audio.announce("An ally has been slain.");
            self.ui.shake_until = Some(now + Duration::from_millis(500));
        } else {
            self.audio.play(Cue::Confirm);
        }
        self.session.apply_choice(pending.choice);
    }

    fn tick_loading(&mut self, now: Instant) {
        if self.session.phase() != GamePhase::Processing {
            return;
        }
        if now.duration_since(self.ui.last_progress_tick) < Duration::from_millis(50) {
            return;
        }
        self.ui.last_progress_tick = now;
        let remaining = 100.0 - self.ui.progress;
        let increment = (remaining * 0.15 * rand::random::<f32>() + 0.5).max(0.8);
        self.ui.progress = (self.ui.progress + increment).min(100.0);
        self.audio.set_charge_progress(self.ui.progress);
    }

    /// One-time effects on entering a phase.
    fn on_phase_entered(&mut self, phase: GamePhase, now: Instant) {
        match phase {
            GamePhase::Processing => {
                self.ui.progress = 0.0;
                self.ui.last_progress_tick = now;
                self.audio.start_charge();
            }
            GamePhase::Gameplay => {
                self.ui.battle_callout_at = Some(now + Duration::from_millis(500));
            }
            GamePhase::Ending => {
                if self.session.player().iman >= 55 {
                    self.audio.play(Cue::Victory);
                    self.audio.announce("Victory!");
                } else {
                    self.audio.play(Cue::Error);
                    self.audio.announce("Defeat.");
                }
            }
            _ => {}
        }
    }

    fn sync_phase_and_mood(&mut self, now: Instant) {
        let phase = self.session.phase();
        if self.ui.last_phase != Some(phase) {
            if self.ui.last_phase == Some(GamePhase::Processing) {
                self.audio.finish_charge();
            }
            self.ui.last_phase = Some(phase);
            self.on_phase_entered(phase, now);
        }

        let mood = self.session.mood();
        if self.ui.last_mood != Some(mood) {
            self.ui.last_mood = Some(mood);
        }
        // Re-applied every frame so a track that finished downloading
        // after the phase change still starts.
        self.audio.play_bgm(mood);
    }

    fn tick_timers(&mut self, now: Instant) {
        self.land_pending_attack(now);

        if self
            .ui
            .battle_callout_at
            .is_some_and(|at| now >= at)
        {
            self.ui.battle_callout_at = None;
            if self.session.phase() == GamePhase::Gameplay {
                self.audio.play(Cue::BattleStart);
                self.audio.announce("Launch Attack!");
            }
        }

        if self.ui.shake_until.is_some_and(|until| now >= until) {
            self.ui.shake_until = None;
        }

        match self.session.phase() {
            GamePhase::Gameplay => {
                self.ui.scenario_typer.tick(now);
            }
            GamePhase::Cutscene => {
                if self.ui.mentor_typer.tick(now) > 0 {
                    self.audio.play(Cue::MechanicalClick);
                }
            }
            _ => {}
        }

        self.tick_loading(now);
    }

    fn draw_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.ui.alert.clone() else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new("Alert")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.audio.play(Cue::Click);
            self.ui.alert = None;
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.settings.ui_scale);

        let now = Instant::now();
        self.audio.poll();
        self.backdrops.poll(ctx);
        self.pump_responses();
        self.tick_timers(now);
        self.sync_phase_and_mood(now);

        screens::draw(ctx, self);
        self.draw_alert(ctx);

        // Timers and typewriters advance without input events.
        ctx.request_repaint_after(Duration::from_millis(33));
    }
}
