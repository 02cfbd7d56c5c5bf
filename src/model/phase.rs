use serde::{Deserialize, Serialize};

/// Which screen the game is currently showing. Exactly one phase is
/// active at a time; all transitions go through the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    StartScreen,
    CharacterSelect,
    IntroStory,
    Map,
    /// Transient state while a content fetch is in flight.
    Processing,
    Gameplay,
    Consequence,
    Cutscene,
    Ending,
}

/// Background-music mood. One track per mood, at most one active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Lobby,
    Battle,
    Calm,
    Victory,
    Defeat,
}

impl Mood {
    /// The ending track depends on how the run went, so the mapping
    /// takes the current iman value alongside the phase.
    pub fn for_phase(phase: GamePhase, iman: i32) -> Self {
        match phase {
            GamePhase::StartScreen
            | GamePhase::CharacterSelect
            | GamePhase::IntroStory
            | GamePhase::Map
            | GamePhase::Processing => Mood::Lobby,
            GamePhase::Gameplay | GamePhase::Consequence => Mood::Battle,
            GamePhase::Cutscene => Mood::Calm,
            GamePhase::Ending => {
                if iman >= 55 {
                    Mood::Victory
                } else {
                    Mood::Defeat
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lobby_covers_every_pre_battle_screen() {
        for phase in [
            GamePhase::StartScreen,
            GamePhase::CharacterSelect,
            GamePhase::IntroStory,
            GamePhase::Map,
            GamePhase::Processing,
        ] {
            assert_eq!(Mood::for_phase(phase, 55), Mood::Lobby);
        }
    }

    #[test]
    fn battle_and_calm_moods() {
        assert_eq!(Mood::for_phase(GamePhase::Gameplay, 10), Mood::Battle);
        assert_eq!(Mood::for_phase(GamePhase::Consequence, 90), Mood::Battle);
        assert_eq!(Mood::for_phase(GamePhase::Cutscene, 0), Mood::Calm);
    }

    #[test]
    fn ending_mood_splits_on_iman() {
        assert_eq!(Mood::for_phase(GamePhase::Ending, 55), Mood::Victory);
        assert_eq!(Mood::for_phase(GamePhase::Ending, 54), Mood::Defeat);
    }
}
