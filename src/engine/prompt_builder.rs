//! Prompt text for the two generation calls. Intentionally dumb: only
//! formats strings, no parsing or networking.

use crate::model::player::PlayerState;

pub fn level_prompt(level_index: usize, theme: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str("Kamu adalah Game Master untuk RPG Islami \"Jejak Amal Harian\".\n");
    prompt.push_str(&format!(
        "Buat level ke-{} dengan tema: \"{}\".\n\n",
        level_index + 1,
        theme
    ));

    prompt.push_str("Konteks:\n");
    prompt.push_str("- Target: Siswa SMP.\n");
    prompt.push_str(
        "- Gaya Bahasa: Menarik, tidak kaku, situasi realistis sehari-hari (Relatable).\n",
    );
    prompt.push_str("- Format: Roblox-style scenario (visual description).\n\n");

    prompt.push_str("Tugas:\n");
    prompt.push_str("1. Buat skenario dilema moral yang realistis.\n");
    prompt.push_str("2. Berikan 3 pilihan:\n");
    prompt.push_str("   - Good: Pilihan ideal (tapi mungkin sulit/tidak populer).\n");
    prompt.push_str("   - Neutral: Pilihan biasa/standar.\n");
    prompt.push_str("   - Bad: Pilihan menggoda/salah (menambah kelalaian).\n");
    prompt.push_str("3. Tentukan impact stats secara logis.\n");

    prompt
}

pub fn mentor_prompt(player: &PlayerState, last_choice: &str, theme: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "Berperan sebagai Ustadz Hasan, mentor yang bijak, hangat, dan tidak \
         menghakimi di game RPG.\n\n",
    );

    prompt.push_str("Situasi:\n");
    prompt.push_str(&format!("- Pemain: {}\n", player.name));
    prompt.push_str(&format!("- Tema Level: {}\n", theme));
    prompt.push_str(&format!(
        "- Pilihan yang baru diambil pemain: \"{}\"\n",
        last_choice
    ));
    prompt.push_str(&format!(
        "- Stats Pemain saat ini: Iman={}, Amal={}, Lalai={}.\n\n",
        player.iman, player.amal, player.lalai
    ));

    prompt.push_str("Tugas:\n");
    prompt.push_str(
        "1. Berikan komentar evaluasi singkat (dialogue). Jika pilihan buruk, \
         ajak refleksi. Jika baik, apresiasi.\n",
    );
    prompt.push_str(
        "2. Berikan satu \"Wisdom\" (kata mutiara/hadits pendek) yang relevan.\n",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_prompt_names_the_theme_and_one_based_index() {
        let p = level_prompt(2, "Dunia Digital & Gadget (Godaan Maya)");
        assert!(p.contains("level ke-3"));
        assert!(p.contains("Dunia Digital"));
    }

    #[test]
    fn mentor_prompt_embeds_player_stats_and_choice() {
        let mut player = PlayerState::new("Siti");
        player.iman = 70;
        player.amal = 25;
        let p = mentor_prompt(&player, "Tolak tegas", "Amanah Ilmu");
        assert!(p.contains("Pemain: Siti"));
        assert!(p.contains("Iman=70, Amal=25, Lalai=0"));
        assert!(p.contains("\"Tolak tegas\""));
    }
}
