//! Named sound effects as explicit (delay, tone) sequences. The
//! director schedules each step on its own sink so multi-note cues
//! ring without blocking.

use rand::Rng;

use crate::audio::synth::{Tone, Waveform};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Click,
    Hover,
    Typing,
    BattleTyping,
    MechanicalClick,
    Confirm,
    Error,
    AttackSlash,
    BattleStart,
    Victory,
    ChargeFinish,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueStep {
    pub offset_ms: u64,
    pub tone: Tone,
}

fn at(offset_ms: u64, tone: Tone) -> CueStep {
    CueStep { offset_ms, tone }
}

fn now(tone: Tone) -> CueStep {
    at(0, tone)
}

impl Cue {
    /// Expand the cue to its schedule. Typing cues jitter their pitch
    /// so repeated keystrokes do not sound stamped out.
    pub fn sheet<R: Rng + ?Sized>(self, rng: &mut R) -> Vec<CueStep> {
        match self {
            Cue::Click => vec![now(
                Tone::new(150.0, Waveform::Triangle, 0.15, 0.3).glide(50.0),
            )],
            Cue::Hover => vec![now(
                Tone::new(800.0, Waveform::Sine, 0.1, 0.05).glide(1200.0),
            )],
            Cue::Typing => {
                let freq = 800.0 + rng.gen::<f32>() * 400.0;
                vec![now(Tone::new(freq, Waveform::Square, 0.03, 0.05))]
            }
            Cue::BattleTyping => {
                let freq = 300.0 + rng.gen::<f32>() * 150.0;
                vec![now(Tone::new(freq, Waveform::Sawtooth, 0.03, 0.08))]
            }
            Cue::MechanicalClick => {
                let freq = 2000.0 + rng.gen::<f32>() * 500.0;
                vec![now(Tone::new(freq, Waveform::Square, 0.015, 0.03))]
            }
            Cue::Confirm => vec![
                now(Tone::new(440.0, Waveform::Sine, 0.5, 0.2)),
                at(50, Tone::new(554.37, Waveform::Sine, 0.5, 0.2)),
                at(100, Tone::new(659.25, Waveform::Sine, 0.8, 0.2)),
            ],
            Cue::Error => vec![
                now(Tone::new(150.0, Waveform::Sawtooth, 0.3, 0.2).glide(100.0)),
                at(150, Tone::new(120.0, Waveform::Sawtooth, 0.3, 0.2).glide(80.0)),
            ],
            Cue::AttackSlash => vec![now(
                Tone::new(150.0, Waveform::Sawtooth, 0.1, 0.5).glide(50.0),
            )],
            Cue::BattleStart => vec![
                now(Tone::new(110.0, Waveform::Sawtooth, 0.4, 0.3).glide(55.0)),
                at(100, Tone::new(220.0, Waveform::Square, 0.2, 0.2)),
                at(300, Tone::new(330.0, Waveform::Square, 0.3, 0.2)),
            ],
            Cue::Victory => vec![
                now(Tone::new(523.25, Waveform::Triangle, 0.2, 0.3)),
                at(150, Tone::new(523.25, Waveform::Triangle, 0.2, 0.3)),
                at(300, Tone::new(523.25, Waveform::Triangle, 0.2, 0.3)),
                at(450, Tone::new(659.25, Waveform::Triangle, 0.4, 0.3)),
                at(600, Tone::new(783.99, Waveform::Triangle, 0.4, 0.3)),
                at(800, Tone::new(1046.5, Waveform::Triangle, 1.5, 0.4)),
            ],
            Cue::ChargeFinish => vec![
                now(Tone::new(880.0, Waveform::Sine, 0.5, 0.3)),
                now(Tone::new(100.0, Waveform::Sawtooth, 0.5, 0.3).glide(0.01)),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn typing_pitch_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..64 {
            let sheet = Cue::Typing.sheet(&mut rng);
            assert_eq!(sheet.len(), 1);
            let f = sheet[0].tone.freq;
            assert!((800.0..1200.0).contains(&f), "freq={f}");

            let sheet = Cue::BattleTyping.sheet(&mut rng);
            let f = sheet[0].tone.freq;
            assert!((300.0..450.0).contains(&f), "freq={f}");
        }
    }

    #[test]
    fn confirm_is_an_ascending_arpeggio() {
        let mut rng = StdRng::seed_from_u64(0);
        let sheet = Cue::Confirm.sheet(&mut rng);
        assert_eq!(sheet.len(), 3);
        assert!(sheet.windows(2).all(|w| {
            w[0].offset_ms < w[1].offset_ms && w[0].tone.freq < w[1].tone.freq
        }));
    }

    #[test]
    fn victory_fanfare_ends_on_a_held_high_c() {
        let mut rng = StdRng::seed_from_u64(0);
        let sheet = Cue::Victory.sheet(&mut rng);
        assert_eq!(sheet.len(), 6);
        let last = sheet.last().unwrap();
        assert_eq!(last.offset_ms, 800);
        assert!((last.tone.freq - 1046.5).abs() < 1e-3);
        assert!((last.tone.duration - 1.5).abs() < 1e-6);
        // Only the held high C gets the louder peak.
        assert!((last.tone.peak - 0.4).abs() < 1e-6);
        for step in &sheet[..5] {
            assert!((step.tone.peak - 0.3).abs() < 1e-6);
        }
    }

    #[test]
    fn error_cue_growls_twice_downward() {
        let mut rng = StdRng::seed_from_u64(0);
        let sheet = Cue::Error.sheet(&mut rng);
        assert_eq!(sheet.len(), 2);
        for step in &sheet {
            assert!(step.tone.glide_to.unwrap() < step.tone.freq);
        }
    }

    #[test]
    fn one_shot_cues_fire_immediately() {
        let mut rng = StdRng::seed_from_u64(3);
        for cue in [Cue::Click, Cue::Hover, Cue::AttackSlash, Cue::MechanicalClick] {
            let sheet = cue.sheet(&mut rng);
            assert_eq!(sheet.len(), 1);
            assert_eq!(sheet[0].offset_ms, 0);
        }
    }
}
