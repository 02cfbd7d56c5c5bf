use crate::model::level::{GameLevel, NpcFeedback};
use crate::model::player::PlayerState;

/// Work sent to the engine worker thread. Every fetch carries the run
/// token it was launched under; the session drops stale resolutions.
pub enum EngineCommand {
    FetchLevel {
        token: u64,
        level_index: usize,
    },
    FetchMentor {
        token: u64,
        player: PlayerState,
        last_choice: String,
    },
}

pub enum EngineResponse {
    LevelReady { token: u64, level: GameLevel },
    MentorReady { token: u64, feedback: NpcFeedback },
}
