//! Oscillator primitives rendered as `rodio::Source` streams. No audio
//! assets: every effect is synthesized from these.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const SAMPLE_RATE: u32 = 44_100;

/// Envelope floor; exponential ramps cannot reach zero.
const AMP_FLOOR: f32 = 0.001;
const ATTACK_SECS: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    /// Sample the waveform at a phase in [0, 1).
    fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (std::f32::consts::TAU * phase).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
        }
    }
}

/// One scheduled oscillator: fast exponential attack to `peak`,
/// exponential release to the floor by `duration`, optional exponential
/// frequency glide across the whole duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    pub waveform: Waveform,
    /// Seconds.
    pub duration: f32,
    pub peak: f32,
    pub glide_to: Option<f32>,
}

impl Tone {
    pub fn new(freq: f32, waveform: Waveform, duration: f32, peak: f32) -> Self {
        Self {
            freq,
            waveform,
            duration,
            peak,
            glide_to: None,
        }
    }

    pub fn glide(mut self, target: f32) -> Self {
        self.glide_to = Some(target);
        self
    }

    pub fn into_source(self) -> ToneSource {
        ToneSource {
            tone: self,
            frame: 0,
            total_frames: (self.duration * SAMPLE_RATE as f32).max(1.0) as u64,
            phase: 0.0,
        }
    }

    fn freq_at(&self, t: f32) -> f32 {
        let f0 = self.freq.max(AMP_FLOOR);
        match self.glide_to {
            Some(f1) if self.duration > 0.0 => {
                let f1 = f1.max(AMP_FLOOR);
                f0 * (f1 / f0).powf((t / self.duration).clamp(0.0, 1.0))
            }
            _ => f0,
        }
    }

    fn amp_at(&self, t: f32) -> f32 {
        let peak = self.peak.max(AMP_FLOOR);
        if t < ATTACK_SECS {
            AMP_FLOOR * (peak / AMP_FLOOR).powf(t / ATTACK_SECS)
        } else {
            let release = (self.duration - ATTACK_SECS).max(AMP_FLOOR);
            peak * (AMP_FLOOR / peak).powf((t - ATTACK_SECS) / release)
        }
    }
}

pub struct ToneSource {
    tone: Tone,
    frame: u64,
    total_frames: u64,
    phase: f32,
}

impl Iterator for ToneSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.frame >= self.total_frames {
            return None;
        }
        let t = self.frame as f32 / SAMPLE_RATE as f32;
        let sample = self.tone.waveform.sample(self.phase) * self.tone.amp_at(t);
        self.phase = (self.phase + self.tone.freq_at(t) / SAMPLE_RATE as f32).fract();
        self.frame += 1;
        Some(sample)
    }
}

impl rodio::Source for ToneSource {
    fn current_frame_len(&self) -> Option<usize> {
        Some((self.total_frames - self.frame) as usize)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f32(self.tone.duration))
    }
}

/// Shared handle steering the charging drone from the loading screen.
/// Targets are plain f32 bit-stores; the source smooths toward them
/// per sample with a 0.1 s time constant, like a setTargetAtTime ramp.
pub struct ChargeControl {
    volume_bits: AtomicU32,
    freq_bits: AtomicU32,
}

pub const CHARGE_BASE_FREQ: f32 = 50.0;
pub const CHARGE_MAX_VOLUME: f32 = 0.06;
const CHARGE_SMOOTH_SECS: f32 = 0.1;
/// +10 cents on the harmonic oscillator for a slight chorus.
const DETUNE_RATIO: f32 = 1.005_793;

impl ChargeControl {
    pub fn new() -> Self {
        Self {
            volume_bits: AtomicU32::new(0f32.to_bits()),
            freq_bits: AtomicU32::new(CHARGE_BASE_FREQ.to_bits()),
        }
    }

    /// Map loading progress (0-100) onto the rising pitch/volume curve.
    pub fn set_progress(&self, progress: f32) {
        let n = (progress / 100.0).clamp(0.0, 1.0);
        let volume = (0.015 + n * 0.045).min(CHARGE_MAX_VOLUME);
        let freq = CHARGE_BASE_FREQ + n * 750.0;
        self.volume_bits.store(volume.to_bits(), Ordering::Relaxed);
        self.freq_bits.store(freq.to_bits(), Ordering::Relaxed);
    }

    pub fn target_volume(&self) -> f32 {
        f32::from_bits(self.volume_bits.load(Ordering::Relaxed))
    }

    pub fn target_frequency(&self) -> f32 {
        f32::from_bits(self.freq_bits.load(Ordering::Relaxed))
    }
}

impl Default for ChargeControl {
    fn default() -> Self {
        Self::new()
    }
}

/// Two detuned oscillators (sawtooth base, square harmonic at 2x)
/// through one smoothed gain. Infinite; stopped by dropping its sink.
pub struct ChargeDrone {
    control: Arc<ChargeControl>,
    coeff: f32,
    cur_volume: f32,
    cur_freq: f32,
    phase_base: f32,
    phase_harmonic: f32,
}

impl ChargeDrone {
    pub fn new(control: Arc<ChargeControl>) -> Self {
        Self {
            control,
            coeff: 1.0 - (-1.0 / (CHARGE_SMOOTH_SECS * SAMPLE_RATE as f32)).exp(),
            cur_volume: 0.0,
            cur_freq: CHARGE_BASE_FREQ,
            phase_base: 0.0,
            phase_harmonic: 0.0,
        }
    }
}

impl Iterator for ChargeDrone {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        self.cur_volume += (self.control.target_volume() - self.cur_volume) * self.coeff;
        self.cur_freq += (self.control.target_frequency() - self.cur_freq) * self.coeff;

        let base = Waveform::Sawtooth.sample(self.phase_base);
        let harmonic = Waveform::Square.sample(self.phase_harmonic);
        self.phase_base = (self.phase_base + self.cur_freq / SAMPLE_RATE as f32).fract();
        self.phase_harmonic =
            (self.phase_harmonic + self.cur_freq * 2.0 * DETUNE_RATIO / SAMPLE_RATE as f32).fract();

        Some((base + harmonic) * self.cur_volume)
    }
}

impl rodio::Source for ChargeDrone {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_stays_within_peak_and_dies_out() {
        let tone = Tone::new(150.0, Waveform::Triangle, 0.15, 0.3).glide(50.0);
        let samples: Vec<f32> = tone.into_source().collect();
        assert_eq!(samples.len(), (0.15 * SAMPLE_RATE as f32) as usize);
        assert!(samples.iter().all(|s| s.abs() <= 0.3 + 1e-4));
        // Attack starts from near silence and the tail releases to it.
        assert!(samples[0].abs() < 0.01);
        assert!(samples.last().copied().unwrap_or(1.0).abs() < 0.01);
        // Somewhere it actually rings.
        assert!(samples.iter().any(|s| s.abs() > 0.1));
    }

    #[test]
    fn glide_moves_the_frequency_exponentially() {
        let tone = Tone::new(800.0, Waveform::Sine, 0.1, 0.05).glide(1200.0);
        assert!((tone.freq_at(0.0) - 800.0).abs() < 1e-3);
        assert!((tone.freq_at(0.1) - 1200.0).abs() < 0.5);
        // Geometric midpoint, not arithmetic.
        let mid = tone.freq_at(0.05);
        assert!((mid - (800.0f32 * 1200.0).sqrt()).abs() < 1.0);
    }

    #[test]
    fn tone_without_glide_holds_its_frequency() {
        let tone = Tone::new(440.0, Waveform::Sine, 0.5, 0.2);
        assert_eq!(tone.freq_at(0.0), 440.0);
        assert_eq!(tone.freq_at(0.25), 440.0);
    }

    #[test]
    fn near_zero_glide_target_is_clamped() {
        let tone = Tone::new(100.0, Waveform::Sawtooth, 0.5, 0.3).glide(0.0);
        assert!(tone.freq_at(0.5) >= AMP_FLOOR);
    }

    #[test]
    fn charge_control_progress_mapping() {
        let c = ChargeControl::new();
        c.set_progress(0.0);
        assert!((c.target_volume() - 0.015).abs() < 1e-6);
        assert!((c.target_frequency() - 50.0).abs() < 1e-3);

        c.set_progress(50.0);
        assert!((c.target_volume() - 0.0375).abs() < 1e-6);
        assert!((c.target_frequency() - 425.0).abs() < 1e-3);

        c.set_progress(100.0);
        assert!((c.target_volume() - 0.06).abs() < 1e-6);
        assert!((c.target_frequency() - 800.0).abs() < 1e-3);

        // Over-range progress clamps instead of overshooting the cap.
        c.set_progress(250.0);
        assert!((c.target_volume() - 0.06).abs() < 1e-6);
        assert!((c.target_frequency() - 800.0).abs() < 1e-3);
    }

    #[test]
    fn drone_ramps_toward_its_volume_target() {
        let control = Arc::new(ChargeControl::new());
        control.set_progress(100.0);
        let mut drone = ChargeDrone::new(Arc::clone(&control));

        // Starts silent.
        let first = drone.next().unwrap();
        assert!(first.abs() < 0.001);

        // After a second (ten time constants) the gain has converged;
        // the two-oscillator sum peaks near twice the gain target.
        let tail: Vec<f32> = (&mut drone).take(SAMPLE_RATE as usize).collect();
        let peak = tail
            .iter()
            .rev()
            .take(2000)
            .fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak > 0.05 && peak < 0.13, "peak={peak}");
    }
}
