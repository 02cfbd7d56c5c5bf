use serde::{Deserialize, Serialize};

/// The three playable archetypes. Picked once at character select and
/// immutable for the rest of the run; purely cosmetic beyond display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeroId {
    Warrior,
    Guardian,
    Scholar,
}

impl HeroId {
    pub const ALL: [HeroId; 3] = [HeroId::Warrior, HeroId::Guardian, HeroId::Scholar];

    pub fn hero(self) -> &'static Hero {
        match self {
            HeroId::Warrior => &HEROES[0],
            HeroId::Guardian => &HEROES[1],
            HeroId::Scholar => &HEROES[2],
        }
    }
}

/// Display-only flavor stats on a 0-100 scale.
#[derive(Debug, Clone, Copy)]
pub struct HeroStats {
    pub keteguhan: u8,
    pub ilmu: u8,
    pub amal: u8,
}

#[derive(Debug, Clone)]
pub struct Hero {
    pub id: HeroId,
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Accent color as RGB; the UI layer converts it.
    pub color: [u8; 3],
    pub stats: HeroStats,
}

pub static HEROES: [Hero; 3] = [
    Hero {
        id: HeroId::Warrior,
        name: "Al-Fatih",
        title: "The Brave",
        description: "Pejuang tangguh yang menyeimbangkan dunia dan akhirat. Cocok untuk pemula.",
        color: [0xFF, 0x2E, 0x2E],
        stats: HeroStats {
            keteguhan: 70,
            ilmu: 60,
            amal: 80,
        },
    },
    Hero {
        id: HeroId::Guardian,
        name: "Ash-Shiddiq",
        title: "The Truthful",
        description: "Pelindung kebenaran dengan keteguhan iman yang tak tergoyahkan.",
        color: [0xC9, 0xA0, 0x50],
        stats: HeroStats {
            keteguhan: 95,
            ilmu: 50,
            amal: 60,
        },
    },
    Hero {
        id: HeroId::Scholar,
        name: "Al-Hakim",
        title: "The Wise",
        description: "Pencari ilmu yang menggunakan kebijaksanaan untuk menyelesaikan masalah.",
        color: [0x00, 0xC2, 0xFF],
        stats: HeroStats {
            keteguhan: 60,
            ilmu: 95,
            amal: 70,
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_id_resolves_to_its_own_entry() {
        for id in HeroId::ALL {
            assert_eq!(id.hero().id, id);
        }
    }
}
