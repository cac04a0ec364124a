// Press-and-hold feedback for on-screen buttons.
//
// A press stays visible for at least `min_visible`, even when the
// release arrives sooner. Time is always passed in so the behaviour is
// independent of any clock.

use std::time::{Duration, Instant};

pub const MIN_VISIBLE_PRESS: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq)]
pub struct PressFeedback {
    min_visible: Duration,
    pressed_at: Option<Instant>,
    // Pending deferred release.
    release_at: Option<Instant>,
}

impl Default for PressFeedback {
    fn default() -> Self {
        PressFeedback::new(MIN_VISIBLE_PRESS)
    }
}

impl PressFeedback {
    pub fn new(min_visible: Duration) -> Self {
        PressFeedback {
            min_visible,
            pressed_at: None,
            release_at: None,
        }
    }

    pub fn press(&mut self, now: Instant) {
        // A new press cancels any release still waiting.
        self.release_at = None;
        self.pressed_at = Some(now);
    }

    /// Pointer up, leave and cancel all end up here.
    pub fn release(&mut self, now: Instant) {
        let Some(pressed_at) = self.pressed_at else {
            return;
        };
        let held = now.saturating_duration_since(pressed_at);
        if held >= self.min_visible {
            self.pressed_at = None;
            self.release_at = None;
        } else {
            self.release_at = Some(pressed_at + self.min_visible);
        }
    }

    /// Press and release in one go, as a keyboard shortcut does.
    pub fn tap(&mut self, now: Instant) {
        self.press(now);
        self.release(now);
    }

    pub fn is_pressed(&self, now: Instant) -> bool {
        match (self.pressed_at, self.release_at) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(_), Some(release_at)) => now < release_at,
        }
    }

    /// Clears a deferred release once its time has come.
    pub fn tick(&mut self, now: Instant) {
        if let Some(release_at) = self.release_at {
            if now >= release_at {
                self.pressed_at = None;
                self.release_at = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_release_is_deferred_to_minimum() {
        let start = Instant::now();
        let mut button = PressFeedback::default();
        button.press(start);
        button.release(start + Duration::from_millis(20));
        assert!(button.is_pressed(start + Duration::from_millis(99)));
        assert!(!button.is_pressed(start + Duration::from_millis(100)));
        button.tick(start + Duration::from_millis(100));
        assert_eq!(button, PressFeedback::default());
    }

    #[test]
    fn long_hold_releases_immediately() {
        let start = Instant::now();
        let mut button = PressFeedback::default();
        button.press(start);
        assert!(button.is_pressed(start + Duration::from_millis(500)));
        button.release(start + Duration::from_millis(500));
        assert!(!button.is_pressed(start + Duration::from_millis(500)));
    }

    #[test]
    fn repress_cancels_pending_release() {
        let start = Instant::now();
        let mut button = PressFeedback::default();
        button.tap(start);
        button.press(start + Duration::from_millis(50));
        button.tick(start + Duration::from_millis(120));
        assert!(button.is_pressed(start + Duration::from_millis(120)));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut button = PressFeedback::default();
        button.release(Instant::now());
        assert!(!button.is_pressed(Instant::now()));
    }
}
