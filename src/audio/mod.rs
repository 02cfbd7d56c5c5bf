pub mod cues;
pub mod director;
pub mod synth;
