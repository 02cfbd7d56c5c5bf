//! Hard-coded substitute content used whenever remote generation is
//! unavailable or fails. One entry per level theme plus a generic
//! catch-all; the mentor pair is a single constant.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::level::{Choice, ChoiceKind, GameLevel, NpcFeedback};
use crate::model::player::Impact;

fn choice(
    id: &str,
    text: &str,
    kind: ChoiceKind,
    (iman, amal, lalai): (i32, i32, i32),
    feedback: &str,
) -> Choice {
    Choice {
        id: id.into(),
        text: text.into(),
        kind,
        impact: Impact { iman, amal, lalai },
        feedback: feedback.into(),
    }
}

fn table_entry(level_index: usize) -> Option<(&'static str, &'static str, &'static str, [Choice; 3])> {
    use ChoiceKind::{Bad, Good, Neutral};
    let entry = match level_index {
        0 => (
            "Fajar Menjelang",
            "Suara adzan Subuh sayup-sayup terdengar di tengah dinginnya pagi. \
             Kasurmu terasa sangat nyaman dan berat untuk ditinggalkan.",
            "Kamar Tidur",
            [
                choice(
                    "a",
                    "Lawan kantuk, wudhu air dingin, ke Masjid.",
                    Good,
                    (15, 20, 0),
                    "Langkah beratmu diganjar pahala berlipat.",
                ),
                choice(
                    "b",
                    "Shalat di kamar saja, masih ngantuk.",
                    Neutral,
                    (5, 5, 0),
                    "Kewajiban tertunaikan, namun kehilangan fadhilah jamaah.",
                ),
                choice(
                    "c",
                    "Tarik selimut lagi, '5 menit lagi...'",
                    Bad,
                    (-10, 0, 15),
                    "Syaitan berhasil mengikatmu dengan buhul kemalasan.",
                ),
            ],
        ),
        1 => (
            "Ujian Kejujuran",
            "Saat ujian berlangsung, teman sebangkumu menyodorkan kertas jawaban. \
             Pengawas sedang lengah main HP.",
            "Kelas IX-A",
            [
                choice(
                    "a",
                    "Tolak tegas dan kerjakan sendiri sebisanya.",
                    Good,
                    (10, 10, 0),
                    "Kejujuran adalah mata uang yang berlaku di mana saja.",
                ),
                choice(
                    "b",
                    "Pura-pura tidak lihat.",
                    Neutral,
                    (0, 0, 5),
                    "Diammu menyelamatkan diri, tapi tidak mengubah keadaan.",
                ),
                choice(
                    "c",
                    "Ambil contekannya, lumayan nilai bagus.",
                    Bad,
                    (-15, 0, 10),
                    "Nilai tinggi di kertas, nilai nol di mata Tuhan.",
                ),
            ],
        ),
        2 => (
            "Notifikasi Menggoda",
            "Sedang asyik tadarus Al-Qur'an, HP bergetar terus menerus. \
             Teman-teman mengajak 'Mabar' Rank Match.",
            "Ruang Tengah",
            [
                choice(
                    "a",
                    "Abaikan HP, selesaikan target tadarus.",
                    Good,
                    (10, 15, 0),
                    "Prioritasmu menentukan kualitasmu.",
                ),
                choice(
                    "b",
                    "Balas chat sebentar, lalu lanjut baca.",
                    Neutral,
                    (0, 5, 5),
                    "Fokusmu terpecah, kekhusyukan berkurang.",
                ),
                choice(
                    "c",
                    "Langsung login game, tadarus nanti saja.",
                    Bad,
                    (-10, 0, 15),
                    "Dunia maya melalaikanmu dari dunia nyata dan akhirat.",
                ),
            ],
        ),
        3 => (
            "Ghibah Circle",
            "Saat istirahat, teman-temanmu mulai membicarakan aib seseorang yang \
             tidak hadir.",
            "Kantin Sekolah",
            [
                choice(
                    "a",
                    "Ingatkan teman: 'Eh, jangan ghibah, dosa.'",
                    Good,
                    (15, 10, 0),
                    "Mencegah kemungkaran selemah-lemahnya dengan lisan.",
                ),
                choice(
                    "b",
                    "Pergi diam-diam dari situ.",
                    Neutral,
                    (5, 0, 0),
                    "Menghindar selamat, tapi belum tentu menyelamatkan teman.",
                ),
                choice(
                    "c",
                    "Ikut nimbrung seru, 'Eh iya kah?'",
                    Bad,
                    (-15, 0, 10),
                    "Lisanmu memakan bangkai saudaramu sendiri.",
                ),
            ],
        ),
        4 => (
            "Perintah Ibu",
            "Ibu memintamu membelikan garam di warung, padahal kamu sedang capek \
             sekali pulang sekolah.",
            "Dapur",
            [
                choice(
                    "a",
                    "Langsung berangkat: 'Siap Bu!'",
                    Good,
                    (10, 20, 0),
                    "Ridho Allah terletak pada ridho orang tua.",
                ),
                choice(
                    "b",
                    "Nanti dulu Bu, istirahat sebentar.",
                    Neutral,
                    (0, 5, 5),
                    "Menunda kebaikan bisa menghilangkan keberkahan.",
                ),
                choice(
                    "c",
                    "Menggerutu: 'Ah, capek Bu!'",
                    Bad,
                    (-20, 0, 10),
                    "Satu kata 'Ah' bisa menghapus ribuan kebaikan.",
                ),
            ],
        ),
        5 => (
            "Malam Renungan",
            "Malam hari sebelum tidur. Hari ini banyak kejadian berlalu.",
            "Kamar",
            [
                choice(
                    "a",
                    "Ambil wudhu, shalat witir, istighfar.",
                    Good,
                    (20, 20, 0),
                    "Menutup hari dengan cahaya.",
                ),
                choice(
                    "b",
                    "Langsung tidur baca doa.",
                    Neutral,
                    (5, 5, 0),
                    "Standar yang baik.",
                ),
                choice(
                    "c",
                    "Scroll sosmed sampai ketiduran.",
                    Bad,
                    (-5, 0, 10),
                    "Waktu terbuang sia-sia hingga mimpi menjemput.",
                ),
            ],
        ),
        _ => return None,
    };
    Some(entry)
}

fn generic_entry() -> (&'static str, &'static str, &'static str, [Choice; 3]) {
    use ChoiceKind::{Bad, Good, Neutral};
    (
        "Tantangan Kehidupan",
        "Kamu dihadapkan pada pilihan sulit yang menguji keimananmu hari ini.",
        "Dunia Fana",
        [
            choice(
                "gen1",
                "Pilih jalan ketaatan meski berat.",
                Good,
                (10, 10, 0),
                "Jalan mendaki menuju surga.",
            ),
            choice(
                "gen2",
                "Cari aman saja.",
                Neutral,
                (0, 5, 0),
                "Hidup mengalir tanpa arah pasti.",
            ),
            choice(
                "gen3",
                "Ikuti hawa nafsu sesaat.",
                Bad,
                (-10, 0, 10),
                "Kesenangan sesaat, penyesalan panjang.",
            ),
        ],
    )
}

/// Build the offline level for `level_index`, with the choices shuffled
/// so screen position gives no hint. Out-of-table indices get the
/// generic level; the id is always `level_index + 1`.
pub fn fallback_level_with_rng(level_index: usize, rng: &mut impl Rng) -> GameLevel {
    let (title, scenario, location, choices) =
        table_entry(level_index).unwrap_or_else(generic_entry);
    let mut choices = choices.to_vec();
    choices.shuffle(rng);
    GameLevel {
        id: level_index as u32 + 1,
        title: title.into(),
        scenario: scenario.into(),
        location: location.into(),
        choices,
    }
}

pub fn fallback_level(level_index: usize) -> GameLevel {
    fallback_level_with_rng(level_index, &mut rand::thread_rng())
}

/// The mentor fallback is deliberately a single constant pair, not
/// varied by the tone of the last choice, to match the shipped content.
pub fn fallback_mentor() -> NpcFeedback {
    NpcFeedback {
        dialogue: "Hmm, setiap langkah ada konsekuensinya. Mari kita renungkan \
                   dampaknya bagi hati kita."
            .into(),
        wisdom: "Setiap amal tergantung pada niatnya.".into(),
    }
}

/// Shown when no API key is configured at all (quiet offline mode).
pub fn offline_mentor() -> NpcFeedback {
    NpcFeedback {
        dialogue: "Pilihanmu menentukan siapa dirimu. Teruslah berjuang di jalan \
                   kebaikan."
            .into(),
        wisdom: "Sesungguhnya Allah bersama orang-orang yang sabar.".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    #[test]
    fn every_index_yields_three_choices_and_matching_id() {
        let mut rng = StdRng::seed_from_u64(7);
        for idx in [0usize, 1, 2, 3, 4, 5, 6, 99] {
            let level = fallback_level_with_rng(idx, &mut rng);
            assert_eq!(level.choices.len(), 3, "index {idx}");
            assert_eq!(level.id, idx as u32 + 1, "index {idx}");
            assert!(!level.title.is_empty());
            assert!(!level.scenario.is_empty());
        }
    }

    #[test]
    fn shuffle_preserves_the_choice_id_set() {
        for seed in 0..32u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let level = fallback_level_with_rng(3, &mut rng);
            let ids: BTreeSet<&str> = level.choices.iter().map(|c| c.id.as_str()).collect();
            assert_eq!(ids, BTreeSet::from(["a", "b", "c"]));
        }
    }

    #[test]
    fn out_of_table_index_uses_the_generic_level() {
        let mut rng = StdRng::seed_from_u64(1);
        let level = fallback_level_with_rng(42, &mut rng);
        assert_eq!(level.title, "Tantangan Kehidupan");
        assert_eq!(level.id, 43);
    }

    #[test]
    fn each_table_entry_carries_one_choice_per_kind() {
        let mut rng = StdRng::seed_from_u64(2);
        for idx in 0..6 {
            let level = fallback_level_with_rng(idx, &mut rng);
            let good = level.choices.iter().filter(|c| c.kind == ChoiceKind::Good);
            let bad = level.choices.iter().filter(|c| c.kind == ChoiceKind::Bad);
            assert_eq!(good.count(), 1);
            assert_eq!(bad.count(), 1);
        }
    }

    #[test]
    fn bad_choices_never_grant_amal() {
        let mut rng = StdRng::seed_from_u64(3);
        for idx in 0..6 {
            let level = fallback_level_with_rng(idx, &mut rng);
            for c in &level.choices {
                if c.kind == ChoiceKind::Bad {
                    assert!(c.impact.iman < 0);
                    assert_eq!(c.impact.amal, 0);
                    assert!(c.impact.lalai > 0);
                }
            }
        }
    }
}
