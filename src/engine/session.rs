use crate::model::level::{theme_for, Choice, GameLevel, NpcFeedback};
use crate::model::hero::HeroId;
use crate::model::phase::{GamePhase, Mood};
use crate::model::player::{GameHistory, PlayerState, LEVEL_COUNT};

/// The game's finite state machine, independent of any rendering.
///
/// Owns the live `PlayerState` plus the transient per-phase payloads
/// (current level, mentor feedback, last choice). Every action method
/// checks the current phase and returns whether the transition was
/// accepted; an illegal (phase, action) pair is refused with no state
/// change at all.
pub struct GameSession {
    phase: GamePhase,
    player: PlayerState,
    history: GameHistory,
    current_level: Option<GameLevel>,
    npc_feedback: Option<NpcFeedback>,
    last_choice: Option<Choice>,
    run_token: u64,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            phase: GamePhase::StartScreen,
            player: PlayerState::new(""),
            history: GameHistory::default(),
            current_level: None,
            npc_feedback: None,
            last_choice: None,
            run_token: 0,
        }
    }
}

impl GameSession {
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn history(&self) -> &GameHistory {
        &self.history
    }

    pub fn current_level(&self) -> Option<&GameLevel> {
        self.current_level.as_ref()
    }

    pub fn npc_feedback(&self) -> Option<&NpcFeedback> {
        self.npc_feedback.as_ref()
    }

    pub fn last_choice(&self) -> Option<&Choice> {
        self.last_choice.as_ref()
    }

    /// Identifies the current run. Fetches launched by the engine carry
    /// this token; a resolution whose token no longer matches (the run
    /// was restarted meanwhile) is dropped instead of applied.
    pub fn run_token(&self) -> u64 {
        self.run_token
    }

    pub fn theme(&self) -> &'static str {
        theme_for(self.player.level_index)
    }

    pub fn mood(&self) -> Mood {
        Mood::for_phase(self.phase, self.player.iman)
    }

    /// Begin a fresh run. Refused on an empty (trimmed) name; this is
    /// plain local validation, not an error state.
    pub fn start_game(&mut self, name: &str) -> bool {
        if self.phase != GamePhase::StartScreen || name.trim().is_empty() {
            return false;
        }
        self.player = PlayerState::new(name.trim());
        self.phase = GamePhase::CharacterSelect;
        true
    }

    pub fn confirm_hero(&mut self, hero_id: HeroId) -> bool {
        if self.phase != GamePhase::CharacterSelect {
            return false;
        }
        self.player.hero_id = hero_id;
        self.phase = GamePhase::IntroStory;
        true
    }

    pub fn enter_map(&mut self) -> bool {
        if self.phase != GamePhase::IntroStory {
            return false;
        }
        self.phase = GamePhase::Map;
        true
    }

    /// Map -> Processing, ahead of the level fetch.
    pub fn begin_level_fetch(&mut self) -> bool {
        if self.phase != GamePhase::Map {
            return false;
        }
        self.phase = GamePhase::Processing;
        true
    }

    /// Level fetch resolved. Stale tokens are dropped here.
    pub fn level_ready(&mut self, token: u64, level: GameLevel) -> bool {
        if token != self.run_token || self.phase != GamePhase::Processing {
            return false;
        }
        self.current_level = Some(level);
        self.phase = GamePhase::Gameplay;
        true
    }

    /// The fetch path itself broke (worker gone, channel closed). Falls
    /// back out of Processing to the start screen; the UI surfaces a
    /// retry alert.
    pub fn level_fetch_aborted(&mut self) -> bool {
        if self.phase != GamePhase::Processing {
            return false;
        }
        self.phase = GamePhase::StartScreen;
        true
    }

    pub fn apply_choice(&mut self, choice: Choice) -> bool {
        if self.phase != GamePhase::Gameplay {
            return false;
        }
        self.player.apply_choice(&choice);
        self.last_choice = Some(choice);
        self.phase = GamePhase::Consequence;
        true
    }

    /// Consequence -> Processing, ahead of the mentor fetch.
    pub fn begin_mentor_fetch(&mut self) -> bool {
        if self.phase != GamePhase::Consequence {
            return false;
        }
        self.phase = GamePhase::Processing;
        true
    }

    /// Mentor fetch resolved. The provider never hard-fails this path,
    /// so there is no aborted counterpart.
    pub fn mentor_ready(&mut self, token: u64, feedback: NpcFeedback) -> bool {
        if token != self.run_token || self.phase != GamePhase::Processing {
            return false;
        }
        self.npc_feedback = Some(feedback);
        self.phase = GamePhase::Cutscene;
        true
    }

    /// Leave the cutscene: either on to the next stage, or to the
    /// ending once all levels are done. The level pointer is untouched
    /// on the ending edge.
    pub fn advance(&mut self) -> bool {
        if self.phase != GamePhase::Cutscene {
            return false;
        }
        if self.player.level_index + 1 >= LEVEL_COUNT {
            self.phase = GamePhase::Ending;
        } else {
            self.player.level_index += 1;
            self.phase = GamePhase::Map;
        }
        true
    }

    /// Archive the finished run and reset everything for a new one.
    /// Always legal from the ending screen.
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::Ending {
            return false;
        }
        self.history.record(self.player.clone());
        self.player = PlayerState::new("");
        self.current_level = None;
        self.npc_feedback = None;
        self.last_choice = None;
        self.run_token += 1;
        self.phase = GamePhase::StartScreen;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::level::{Choice, ChoiceKind};
    use crate::model::player::{Impact, INITIAL_IMAN};

    fn level(id: u32) -> GameLevel {
        GameLevel {
            id,
            title: "t".into(),
            scenario: "s".into(),
            location: "l".into(),
            choices: vec![choice(5, 5, 0), choice(0, 0, 5), choice(-10, 0, 10)],
        }
    }

    fn choice(iman: i32, amal: i32, lalai: i32) -> Choice {
        Choice {
            id: format!("c{iman}"),
            text: format!("choice {iman}"),
            kind: ChoiceKind::Neutral,
            impact: Impact { iman, amal, lalai },
            feedback: "f".into(),
        }
    }

    fn feedback() -> NpcFeedback {
        NpcFeedback {
            dialogue: "d".into(),
            wisdom: "w".into(),
        }
    }

    /// Drive one level from the map through the cutscene.
    fn play_level(s: &mut GameSession, pick: Choice) {
        let token = s.run_token();
        assert!(s.begin_level_fetch());
        assert!(s.level_ready(token, level(s.player().level_index as u32 + 1)));
        assert!(s.apply_choice(pick));
        assert!(s.begin_mentor_fetch());
        assert!(s.mentor_ready(token, feedback()));
    }

    #[test]
    fn empty_name_is_refused_without_phase_change() {
        let mut s = GameSession::default();
        assert!(!s.start_game(""));
        assert!(!s.start_game("   "));
        assert_eq!(s.phase(), GamePhase::StartScreen);
        assert!(s.start_game("  Aisyah "));
        assert_eq!(s.player().name, "Aisyah");
        assert_eq!(s.phase(), GamePhase::CharacterSelect);
    }

    #[test]
    fn full_run_reaches_ending_after_six_levels() {
        let mut s = GameSession::default();
        assert!(s.start_game("Budi"));
        assert!(s.confirm_hero(HeroId::Scholar));
        assert!(s.enter_map());

        for i in 0..LEVEL_COUNT {
            assert_eq!(s.player().level_index, i);
            play_level(&mut s, choice(10, 10, 0));
            assert!(s.advance());
        }

        assert_eq!(s.phase(), GamePhase::Ending);
        assert_eq!(s.player().level_index, LEVEL_COUNT - 1);
        assert_eq!(s.player().hero_id, HeroId::Scholar);
        assert_eq!(s.player().history.len(), LEVEL_COUNT);
    }

    #[test]
    fn advance_below_last_level_increments_and_returns_to_map() {
        let mut s = GameSession::default();
        s.start_game("A");
        s.confirm_hero(HeroId::Warrior);
        s.enter_map();
        for _ in 0..5 {
            play_level(&mut s, choice(0, 0, 0));
            assert!(s.advance());
        }
        // Five advances from index 0 leave us at index 5, back on the map.
        assert_eq!(s.player().level_index, 5);
        assert_eq!(s.phase(), GamePhase::Map);

        play_level(&mut s, choice(0, 0, 0));
        assert!(s.advance());
        assert_eq!(s.phase(), GamePhase::Ending);
        assert_eq!(s.player().level_index, 5);
    }

    #[test]
    fn level_fetch_abort_returns_to_start_screen() {
        let mut s = GameSession::default();
        s.start_game("A");
        s.confirm_hero(HeroId::Warrior);
        s.enter_map();
        assert!(s.begin_level_fetch());
        assert!(s.level_fetch_aborted());
        assert_eq!(s.phase(), GamePhase::StartScreen);
    }

    #[test]
    fn stale_token_resolutions_are_dropped() {
        let mut s = GameSession::default();
        s.start_game("A");
        s.confirm_hero(HeroId::Warrior);
        s.enter_map();
        let old_token = s.run_token();
        for _ in 0..LEVEL_COUNT {
            play_level(&mut s, choice(10, 0, 0));
            s.advance();
        }
        assert!(s.restart());
        assert_eq!(s.run_token(), old_token + 1);

        // A slow fetch from the previous run resolves now; it must not
        // leak into the new session.
        s.start_game("B");
        s.confirm_hero(HeroId::Guardian);
        s.enter_map();
        s.begin_level_fetch();
        assert!(!s.level_ready(old_token, level(1)));
        assert_eq!(s.phase(), GamePhase::Processing);
        assert!(s.level_ready(s.run_token(), level(1)));
    }

    #[test]
    fn restart_archives_exact_snapshot_and_resets_defaults() {
        let mut s = GameSession::default();
        s.start_game("Citra");
        s.confirm_hero(HeroId::Guardian);
        s.enter_map();
        for _ in 0..LEVEL_COUNT {
            play_level(&mut s, choice(-10, 0, 10));
            s.advance();
        }
        let snapshot = s.player().clone();
        assert!(s.restart());

        assert_eq!(s.history().latest(), Some(&snapshot));
        let p = s.player();
        assert_eq!(p.iman, INITIAL_IMAN);
        assert_eq!(p.amal, 0);
        assert_eq!(p.lalai, 0);
        assert_eq!(p.level_index, 0);
        assert!(p.history.is_empty());
        assert!(s.current_level().is_none());
        assert!(s.npc_feedback().is_none());
        assert!(s.last_choice().is_none());
        assert_eq!(s.phase(), GamePhase::StartScreen);
    }

    #[test]
    fn illegal_actions_are_refused_everywhere() {
        let mut s = GameSession::default();
        // Nothing but start_game works on the start screen.
        assert!(!s.confirm_hero(HeroId::Warrior));
        assert!(!s.enter_map());
        assert!(!s.begin_level_fetch());
        assert!(!s.apply_choice(choice(5, 0, 0)));
        assert!(!s.begin_mentor_fetch());
        assert!(!s.advance());
        assert!(!s.restart());
        assert_eq!(s.phase(), GamePhase::StartScreen);

        s.start_game("A");
        // Cannot re-enter start or jump ahead from character select.
        assert!(!s.start_game("B"));
        assert!(!s.begin_level_fetch());
        assert!(!s.advance());
        assert_eq!(s.phase(), GamePhase::CharacterSelect);

        s.confirm_hero(HeroId::Warrior);
        s.enter_map();
        s.begin_level_fetch();
        // Choices are not accepted while still processing.
        assert!(!s.apply_choice(choice(5, 0, 0)));
        assert_eq!(s.phase(), GamePhase::Processing);
    }

    #[test]
    fn stats_flow_through_applied_choices() {
        let mut s = GameSession::default();
        s.start_game("A");
        s.confirm_hero(HeroId::Warrior);
        s.enter_map();
        play_level(&mut s, choice(15, 20, 0));
        assert_eq!(s.player().iman, INITIAL_IMAN + 15);
        assert_eq!(s.player().amal, 20);
        assert_eq!(s.last_choice().map(|c| c.impact.iman), Some(15));
    }
}
