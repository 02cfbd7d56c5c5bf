//! Owns the output device and everything that makes noise: one-shot
//! cues, the looping background track per mood, the loading drone and
//! the optional spoken announcer. The rest of the crate only ever
//! talks to [`AudioDirector`], so a machine without an audio device
//! degrades to silence instead of crashing.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{debug, warn};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::audio::cues::Cue;
use crate::audio::synth::{ChargeControl, ChargeDrone};
use crate::model::phase::Mood;

fn track_url(mood: Mood) -> &'static str {
    match mood {
        Mood::Lobby => "https://cdn.pixabay.com/audio/2022/08/29/audio_2984c7866d.mp3",
        Mood::Battle => "https://cdn.pixabay.com/audio/2022/10/24/audio_024b434447.mp3",
        Mood::Calm => "https://cdn.pixabay.com/audio/2021/09/06/audio_387922e379.mp3",
        Mood::Victory => "https://cdn.pixabay.com/audio/2020/12/04/audio_346914590c.mp3",
        Mood::Defeat => "https://cdn.pixabay.com/audio/2021/11/25/audio_915a31c518.mp3",
    }
}

fn track_volume(mood: Mood) -> f32 {
    match mood {
        Mood::Battle => 0.25,
        Mood::Victory => 0.4,
        Mood::Lobby | Mood::Calm | Mood::Defeat => 0.3,
    }
}

pub struct AudioDirector {
    output: Option<(OutputStream, OutputStreamHandle)>,
    muted: bool,
    bgm_sink: Option<Sink>,
    bgm_mood: Option<Mood>,
    /// Mood we want playing but whose track has not downloaded yet.
    bgm_pending: Option<Mood>,
    bgm_cache: HashMap<Mood, Vec<u8>>,
    bgm_rx: Option<Receiver<(Mood, Vec<u8>)>>,
    charge: Option<(Sink, Arc<ChargeControl>)>,
    #[cfg(feature = "announcer")]
    speaker: Option<tts::Tts>,
}

impl AudioDirector {
    pub fn new(muted: bool) -> Self {
        let output = match OutputStream::try_default() {
            Ok(pair) => Some(pair),
            Err(err) => {
                warn!("no audio output available, running silent: {err}");
                None
            }
        };
        let bgm_rx = output.is_some().then(spawn_track_fetcher);
        Self {
            output,
            muted,
            bgm_sink: None,
            bgm_mood: None,
            bgm_pending: None,
            bgm_cache: HashMap::new(),
            bgm_rx,
            charge: None,
            #[cfg(feature = "announcer")]
            speaker: tts::Tts::default()
                .map_err(|err| warn!("announcer unavailable: {err}"))
                .ok(),
        }
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Absorb finished track downloads. Called once per frame.
    pub fn poll(&mut self) {
        let Some(rx) = &self.bgm_rx else { return };
        let mut ready = Vec::new();
        while let Ok((mood, bytes)) = rx.try_recv() {
            debug!("track for {mood:?} cached ({} bytes)", bytes.len());
            ready.push(mood);
            self.bgm_cache.insert(mood, bytes);
        }
        if let Some(pending) = self.bgm_pending {
            if ready.contains(&pending) {
                self.bgm_pending = None;
                self.start_track(pending);
            }
        }
    }

    /// Fire a one-shot effect. Each step of the cue gets its own
    /// detached sink so overlapping cues mix freely.
    pub fn play(&mut self, cue: Cue) {
        if self.muted {
            return;
        }
        let Some((_, handle)) = &self.output else {
            return;
        };
        let mut rng = rand::thread_rng();
        for step in cue.sheet(&mut rng) {
            let sink = match Sink::try_new(handle) {
                Ok(sink) => sink,
                Err(err) => {
                    warn!("cue sink failed: {err}");
                    return;
                }
            };
            sink.append(
                step.tone
                    .into_source()
                    .delay(Duration::from_millis(step.offset_ms)),
            );
            sink.detach();
        }
    }

    /// Switch the looping background track. Re-requesting the current
    /// mood only reapplies its volume.
    pub fn play_bgm(&mut self, mood: Mood) {
        if self.output.is_none() {
            return;
        }
        if self.bgm_mood == Some(mood) {
            if let Some(sink) = &self.bgm_sink {
                sink.set_volume(if self.muted { 0.0 } else { track_volume(mood) });
            }
            return;
        }
        if self.bgm_cache.contains_key(&mood) {
            self.bgm_pending = None;
            self.start_track(mood);
        } else {
            self.bgm_pending = Some(mood);
        }
    }

    fn start_track(&mut self, mood: Mood) {
        let Some((_, handle)) = &self.output else {
            return;
        };
        let Some(bytes) = self.bgm_cache.get(&mood) else {
            return;
        };
        let decoder = match Decoder::new(Cursor::new(bytes.clone())) {
            Ok(decoder) => decoder,
            Err(err) => {
                warn!("undecodable track for {mood:?}: {err}");
                self.bgm_cache.remove(&mood);
                return;
            }
        };
        let sink = match Sink::try_new(handle) {
            Ok(sink) => sink,
            Err(err) => {
                warn!("bgm sink failed: {err}");
                return;
            }
        };
        sink.set_volume(if self.muted { 0.0 } else { track_volume(mood) });
        sink.append(decoder.repeat_infinite());
        self.bgm_sink = Some(sink);
        self.bgm_mood = Some(mood);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let (Some(sink), Some(mood)) = (&self.bgm_sink, self.bgm_mood) {
            sink.set_volume(if muted { 0.0 } else { track_volume(mood) });
            if !muted {
                sink.play();
            }
        }
        if let Some((sink, _)) = &self.charge {
            sink.set_volume(if muted { 0.0 } else { 1.0 });
        }
    }

    pub fn toggle_mute(&mut self) {
        self.set_muted(!self.muted);
    }

    /// Begin the rising loading drone. Progress updates steer it until
    /// [`finish_charge`](Self::finish_charge) releases it.
    pub fn start_charge(&mut self) {
        self.stop_charge();
        let Some((_, handle)) = &self.output else {
            return;
        };
        let control = Arc::new(ChargeControl::new());
        let sink = match Sink::try_new(handle) {
            Ok(sink) => sink,
            Err(err) => {
                warn!("charge sink failed: {err}");
                return;
            }
        };
        sink.set_volume(if self.muted { 0.0 } else { 1.0 });
        sink.append(ChargeDrone::new(Arc::clone(&control)));
        self.charge = Some((sink, control));
    }

    pub fn set_charge_progress(&mut self, progress: f32) {
        if let Some((_, control)) = &self.charge {
            control.set_progress(progress);
        }
    }

    /// Cut the drone and ring the completion chime.
    pub fn finish_charge(&mut self) {
        if self.charge.take().is_some() {
            self.play(Cue::ChargeFinish);
        }
    }

    pub fn stop_charge(&mut self) {
        self.charge = None;
    }

    /// Speak a short battle callout. Without the `announcer` feature
    /// (or a working speech backend) this is a log line.
    #[allow(unused_variables)]
    pub fn announce(&mut self, text: &str) {
        if self.muted {
            return;
        }
        #[cfg(feature = "announcer")]
        if let Some(speaker) = &mut self.speaker {
            if let Err(err) = speaker.speak(text, true) {
                warn!("announcer failed: {err}");
            }
            return;
        }
        debug!("announcer: {text}");
    }
}

fn spawn_track_fetcher() -> Receiver<(Mood, Vec<u8>)> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let client = match reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
        {
            Ok(client) => client,
            Err(err) => {
                warn!("track fetcher could not start: {err}");
                return;
            }
        };
        for mood in [
            Mood::Lobby,
            Mood::Battle,
            Mood::Calm,
            Mood::Victory,
            Mood::Defeat,
        ] {
            let url = track_url(mood);
            let bytes = client
                .get(url)
                .send()
                .and_then(|resp| resp.error_for_status())
                .and_then(|resp| resp.bytes());
            match bytes {
                Ok(bytes) => {
                    if tx.send((mood, bytes.to_vec())).is_err() {
                        return;
                    }
                }
                Err(err) => warn!("track fetch failed for {mood:?}: {err}"),
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    // These run on machines without an audio device; everything must
    // degrade to a silent no-op rather than panic.

    #[test]
    fn director_survives_without_a_device() {
        let mut director = AudioDirector::new(false);
        director.play(Cue::Click);
        director.play_bgm(Mood::Battle);
        director.start_charge();
        director.set_charge_progress(50.0);
        director.finish_charge();
        director.poll();
        director.announce("Launch Attack!");
    }

    #[test]
    fn mute_toggle_round_trips() {
        let mut director = AudioDirector::new(false);
        assert!(!director.muted());
        director.toggle_mute();
        assert!(director.muted());
        director.set_muted(true);
        assert!(director.muted());
        director.toggle_mute();
        assert!(!director.muted());
    }

    #[test]
    fn muted_director_stays_quiet() {
        let mut director = AudioDirector::new(true);
        assert!(director.muted());
        director.play(Cue::Victory);
        director.announce("Victory!");
    }

    #[test]
    fn every_mood_has_a_track_and_volume() {
        for mood in [
            Mood::Lobby,
            Mood::Battle,
            Mood::Calm,
            Mood::Victory,
            Mood::Defeat,
        ] {
            assert!(track_url(mood).ends_with(".mp3"));
            let v = track_volume(mood);
            assert!((0.0..=1.0).contains(&v));
        }
    }
}
