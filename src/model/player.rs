use serde::{Deserialize, Serialize};

use crate::model::hero::HeroId;
use crate::model::level::Choice;

pub const INITIAL_IMAN: i32 = 55;
pub const IMAN_MIN: i32 = 0;
pub const IMAN_MAX: i32 = 100;
pub const LEVEL_COUNT: usize = 6;

/// Stat deltas attached to a single choice. Iman may swing either way;
/// amal and lalai are non-negative by convention but remote content is
/// not trusted to honor that, so they stay signed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Impact {
    pub iman: i32,
    pub amal: i32,
    pub lalai: i32,
}

/// The live run state. Owned by the session for the duration of one
/// playthrough, snapshotted into `GameHistory` on restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub iman: i32,
    pub amal: u32,
    pub lalai: u32,
    pub level_index: usize,
    pub history: Vec<String>,
    pub hero_id: HeroId,
}

impl PlayerState {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            iman: INITIAL_IMAN,
            amal: 0,
            lalai: 0,
            level_index: 0,
            history: Vec::new(),
            hero_id: HeroId::Warrior,
        }
    }

    /// Apply one chosen option: iman is clamped into range at the point
    /// of mutation, amal/lalai saturate and never decrease, and the
    /// choice text is appended to the run log.
    pub fn apply_choice(&mut self, choice: &Choice) {
        self.iman = (self.iman + choice.impact.iman).clamp(IMAN_MIN, IMAN_MAX);
        self.amal = self.amal.saturating_add_signed(choice.impact.amal.max(0));
        self.lalai = self.lalai.saturating_add_signed(choice.impact.lalai.max(0));
        self.history.push(choice.text.clone());
    }

    pub fn rank(&self) -> Rank {
        Rank::from_iman(self.iman)
    }
}

/// Final standing, a pure function of iman.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    Warrior,
    Legend,
    Mythic,
}

impl Rank {
    pub fn from_iman(iman: i32) -> Self {
        if iman >= 80 {
            Rank::Mythic
        } else if iman >= 55 {
            Rank::Legend
        } else {
            Rank::Warrior
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Mythic => "MYTHIC",
            Rank::Legend => "LEGEND",
            Rank::Warrior => "WARRIOR",
        }
    }
}

/// Ending screen verdict, with the mentor's fixed final assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Victory,
    Completed,
    Defeat,
}

impl Verdict {
    pub fn from_iman(iman: i32) -> Self {
        if iman >= 80 {
            Verdict::Victory
        } else if iman >= 55 {
            Verdict::Completed
        } else {
            Verdict::Defeat
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Verdict::Victory => "VICTORY",
            Verdict::Completed => "COMPLETED",
            Verdict::Defeat => "DEFEAT",
        }
    }

    pub fn assessment(self) -> &'static str {
        match self {
            Verdict::Victory => {
                "Masya Allah! Kamu adalah kesatria sejati. Imanmu kokoh, amalmu \
                 menggunung. Pertahankan istiqamah ini!"
            }
            Verdict::Completed => {
                "Perjuangan yang hebat! Meski ada sedikit kelalaian, kamu berhasil \
                 bertahan. Teruslah belajar dan perbaiki diri."
            }
            Verdict::Defeat => {
                "Jangan putus asa. Kekalahan hari ini adalah pelajaran untuk esok. \
                 Perbanyak istighfar dan mulai lagi dengan niat yang kuat."
            }
        }
    }

    pub fn wisdom(self) -> &'static str {
        match self {
            Verdict::Victory => "Sebaik-baik manusia adalah yang paling bermanfaat bagi orang lain.",
            Verdict::Completed => "Bertaqwalah kepada Allah di mana saja engkau berada.",
            Verdict::Defeat => "Sesungguhnya Allah menyukai orang-orang yang bertaubat.",
        }
    }
}

/// Completed runs, newest first. Session-lifetime only.
#[derive(Debug, Clone, Default)]
pub struct GameHistory {
    runs: Vec<PlayerState>,
}

impl GameHistory {
    pub fn record(&mut self, run: PlayerState) {
        self.runs.insert(0, run);
    }

    pub fn latest(&self) -> Option<&PlayerState> {
        self.runs.first()
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::level::{Choice, ChoiceKind};

    fn choice(iman: i32, amal: i32, lalai: i32) -> Choice {
        Choice {
            id: "t".into(),
            text: "test choice".into(),
            kind: ChoiceKind::Neutral,
            impact: Impact { iman, amal, lalai },
            feedback: String::new(),
        }
    }

    #[test]
    fn iman_clamps_at_zero_for_huge_negative_delta() {
        let mut p = PlayerState::new("A");
        p.apply_choice(&choice(-1000, 0, 0));
        assert_eq!(p.iman, 0);
    }

    #[test]
    fn iman_clamps_at_hundred() {
        let mut p = PlayerState::new("A");
        p.apply_choice(&choice(1000, 0, 0));
        assert_eq!(p.iman, 100);
        p.apply_choice(&choice(15, 0, 0));
        assert_eq!(p.iman, 100);
    }

    #[test]
    fn amal_and_lalai_never_decrease() {
        let mut p = PlayerState::new("A");
        let seq = [(5, 10, 0), (-10, 0, 15), (0, 5, 5), (-20, 0, 0)];
        let mut last_amal = 0;
        let mut last_lalai = 0;
        for (i, a, l) in seq {
            p.apply_choice(&choice(i, a, l));
            assert!(p.amal >= last_amal);
            assert!(p.lalai >= last_lalai);
            last_amal = p.amal;
            last_lalai = p.lalai;
        }
        assert_eq!(p.amal, 15);
        assert_eq!(p.lalai, 20);
        assert_eq!(p.history.len(), 4);
    }

    #[test]
    fn negative_amal_delta_is_ignored() {
        let mut p = PlayerState::new("A");
        p.apply_choice(&choice(0, 10, 0));
        p.apply_choice(&choice(0, -5, -5));
        assert_eq!(p.amal, 10);
        assert_eq!(p.lalai, 0);
    }

    #[test]
    fn rank_derivation_table() {
        let cases = [
            (0, Rank::Warrior),
            (54, Rank::Warrior),
            (55, Rank::Legend),
            (79, Rank::Legend),
            (80, Rank::Mythic),
            (100, Rank::Mythic),
        ];
        for (iman, rank) in cases {
            assert_eq!(Rank::from_iman(iman), rank, "iman={iman}");
        }
    }

    #[test]
    fn verdict_derivation_table() {
        assert_eq!(Verdict::from_iman(100).title(), "VICTORY");
        assert_eq!(Verdict::from_iman(80).title(), "VICTORY");
        assert_eq!(Verdict::from_iman(79).title(), "COMPLETED");
        assert_eq!(Verdict::from_iman(55).title(), "COMPLETED");
        assert_eq!(Verdict::from_iman(54).title(), "DEFEAT");
        assert_eq!(Verdict::from_iman(0).title(), "DEFEAT");
    }

    #[test]
    fn history_records_newest_first() {
        let mut h = GameHistory::default();
        h.record(PlayerState::new("first"));
        h.record(PlayerState::new("second"));
        assert_eq!(h.len(), 2);
        assert_eq!(h.latest().map(|p| p.name.as_str()), Some("second"));
    }
}
