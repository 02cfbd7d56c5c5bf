use std::time::{Duration, Instant};

/// Reveals a string one character per interval. Time is passed in so
/// the reveal schedule is testable without sleeping.
pub struct Typewriter {
    full: String,
    total_chars: usize,
    shown_chars: usize,
    interval: Duration,
    last_reveal: Instant,
}

impl Typewriter {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            full: String::new(),
            total_chars: 0,
            shown_chars: 0,
            interval: Duration::from_millis(interval_ms.max(1)),
            last_reveal: Instant::now(),
        }
    }

    pub fn start(&mut self, text: &str, now: Instant) {
        self.full = text.to_owned();
        self.total_chars = self.full.chars().count();
        self.shown_chars = 0;
        self.last_reveal = now;
    }

    /// Advance the reveal clock; returns how many characters appeared
    /// this tick so the caller can key a click to them.
    pub fn tick(&mut self, now: Instant) -> usize {
        let mut revealed = 0;
        while self.shown_chars < self.total_chars
            && now.duration_since(self.last_reveal) >= self.interval
        {
            self.last_reveal += self.interval;
            self.shown_chars += 1;
            revealed += 1;
        }
        revealed
    }

    /// The revealed prefix, cut on a character boundary.
    pub fn visible(&self) -> &str {
        let end = self
            .full
            .char_indices()
            .nth(self.shown_chars)
            .map(|(i, _)| i)
            .unwrap_or(self.full.len());
        &self.full[..end]
    }

    pub fn is_done(&self) -> bool {
        self.shown_chars >= self.total_chars
    }

    pub fn skip(&mut self) {
        self.shown_chars = self.total_chars;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_one_char_per_interval() {
        let t0 = Instant::now();
        let mut tw = Typewriter::new(35);
        tw.start("abc", t0);
        assert_eq!(tw.visible(), "");

        assert_eq!(tw.tick(t0 + Duration::from_millis(34)), 0);
        assert_eq!(tw.tick(t0 + Duration::from_millis(35)), 1);
        assert_eq!(tw.visible(), "a");

        // A long frame catches up over multiple characters.
        assert_eq!(tw.tick(t0 + Duration::from_millis(200)), 2);
        assert_eq!(tw.visible(), "abc");
        assert!(tw.is_done());
        assert_eq!(tw.tick(t0 + Duration::from_secs(5)), 0);
    }

    #[test]
    fn multibyte_text_cuts_on_char_boundaries() {
        let t0 = Instant::now();
        let mut tw = Typewriter::new(10);
        tw.start("d\u{00e9}j\u{00e0}", t0);
        tw.tick(t0 + Duration::from_millis(20));
        assert_eq!(tw.visible(), "d\u{00e9}");
        tw.skip();
        assert_eq!(tw.visible(), "d\u{00e9}j\u{00e0}");
    }

    #[test]
    fn restart_resets_the_reveal() {
        let t0 = Instant::now();
        let mut tw = Typewriter::new(10);
        tw.start("first", t0);
        tw.skip();
        assert!(tw.is_done());

        tw.start("second", t0 + Duration::from_secs(1));
        assert_eq!(tw.visible(), "");
        assert!(!tw.is_done());
    }
}
