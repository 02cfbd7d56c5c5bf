//! Stage backdrops: one static photograph per level, fetched once in
//! the background and uploaded as textures on arrival.

use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use eframe::egui;
use egui::{ColorImage, TextureHandle, TextureOptions};
use log::{debug, warn};

use crate::model::player::LEVEL_COUNT;

const BACKDROP_URLS: [&str; LEVEL_COUNT] = [
    "https://images.unsplash.com/photo-1531844251246-9f10d99c663f?q=80&w=1920&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1562774053-701939374585?q=80&w=1920&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1550751827-4bd374c3f58b?q=80&w=1920&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1517457373958-b7bdd4587205?q=80&w=1920&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1542038784456-1ea8e935640e?q=80&w=1920&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1419242902214-272b3f66ee7a?q=80&w=1920&auto=format&fit=crop",
];

pub struct BackdropStore {
    rx: Receiver<(usize, ColorImage)>,
    textures: [Option<TextureHandle>; LEVEL_COUNT],
}

impl BackdropStore {
    pub fn new() -> Self {
        Self {
            rx: spawn_fetcher(),
            textures: Default::default(),
        }
    }

    /// Upload any freshly downloaded images. Called once per frame.
    pub fn poll(&mut self, ctx: &egui::Context) {
        while let Ok((index, image)) = self.rx.try_recv() {
            debug!("backdrop {index} ready ({}x{})", image.width(), image.height());
            let handle =
                ctx.load_texture(format!("backdrop-{index}"), image, TextureOptions::LINEAR);
            self.textures[index] = Some(handle);
        }
    }

    /// Backdrop for a level; falls back to the first downloaded one so
    /// late stages never flash an empty stage.
    pub fn texture(&self, level_index: usize) -> Option<&TextureHandle> {
        self.textures
            .get(level_index)
            .and_then(|t| t.as_ref())
            .or_else(|| self.textures.iter().flatten().next())
    }
}

impl Default for BackdropStore {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_fetcher() -> Receiver<(usize, ColorImage)> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let client = match reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
        {
            Ok(client) => client,
            Err(err) => {
                warn!("backdrop fetcher could not start: {err}");
                return;
            }
        };
        for (index, url) in BACKDROP_URLS.iter().enumerate() {
            let bytes = client
                .get(*url)
                .send()
                .and_then(|resp| resp.error_for_status())
                .and_then(|resp| resp.bytes());
            let bytes = match bytes {
                Ok(bytes) => bytes,
                Err(err) => {
                    warn!("backdrop {index} fetch failed: {err}");
                    continue;
                }
            };
            match image::load_from_memory(&bytes) {
                Ok(img) => {
                    let rgba = img.to_rgba8();
                    let size = [rgba.width() as usize, rgba.height() as usize];
                    let color = ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                    if tx.send((index, color)).is_err() {
                        return;
                    }
                }
                Err(err) => warn!("backdrop {index} failed to decode: {err}"),
            }
        }
    });
    rx
}
