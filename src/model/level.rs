use serde::{Deserialize, Serialize};

use crate::model::player::Impact;

/// Tone tag on a choice. Reliable for fallback content; remote content
/// is asked for one of each but not strictly validated against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoiceKind {
    Good,
    Neutral,
    Bad,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: ChoiceKind,
    pub impact: Impact,
    /// Short immediate consequence line shown after picking.
    pub feedback: String,
}

/// One stage of the run. Produced fresh per level, remotely or from the
/// fallback table; never kept past the phase that consumed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLevel {
    pub id: u32,
    pub title: String,
    pub scenario: String,
    pub location: String,
    pub choices: Vec<Choice>,
}

/// Mentor commentary shown in the cutscene. Ephemeral, replaced on
/// every cutscene entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcFeedback {
    pub dialogue: String,
    pub wisdom: String,
}

pub const LEVEL_THEMES: [&str; 6] = [
    "Subuh & Pribadi (Hubungan dengan Allah)",
    "SMPN 3 Pacet & Akademik (Amanah Ilmu)",
    "Dunia Digital & Gadget (Godaan Maya)",
    "Pergaulan Sosial (Adab Sesama)",
    "Keluarga & Birrul Walidain (Bakti)",
    "Muhasabah Diri (Refleksi Internal)",
];

pub fn theme_for(level_index: usize) -> &'static str {
    LEVEL_THEMES
        .get(level_index)
        .copied()
        .unwrap_or("Tantangan Kehidupan")
}
