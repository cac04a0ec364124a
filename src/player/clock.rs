// ==========================================
// HEADLESS CLOCK ELEMENT
// ==========================================
// A media element with no decoder behind it. It keeps a playhead that
// advances with wall-clock time while playing and reports metadata,
// time updates and the end of each source exactly like a real element.
//
// The terminal cannot draw the background videos, so the carousel runs
// on this element: the transport still rotates, pauses and mutes them.

use std::time::Instant;
use tokio::sync::mpsc;

use super::media::{MediaElement, MediaEvent, MediaEvents};
use crate::error::MediaError;

/// Position bookkeeping shared by the adapters: a base position plus the
/// instant playback last resumed.
#[derive(Debug, Clone, Default)]
pub struct Playhead {
    base: f64,
    resumed_at: Option<Instant>,
}

impl Playhead {
    pub fn position(&self, now: Instant) -> f64 {
        match self.resumed_at {
            Some(resumed_at) => self.base + now.saturating_duration_since(resumed_at).as_secs_f64(),
            None => self.base,
        }
    }

    pub fn is_running(&self) -> bool {
        self.resumed_at.is_some()
    }

    pub fn resume(&mut self, now: Instant) {
        if self.resumed_at.is_none() {
            self.resumed_at = Some(now);
        }
    }

    pub fn halt(&mut self, now: Instant) {
        self.base = self.position(now);
        self.resumed_at = None;
    }

    /// Jump to `seconds`, keeping the running/halted state.
    pub fn set(&mut self, seconds: f64, now: Instant) {
        self.base = seconds.max(0.0);
        if self.resumed_at.is_some() {
            self.resumed_at = Some(now);
        }
    }

    pub fn reset(&mut self) {
        self.base = 0.0;
        self.resumed_at = None;
    }
}

pub struct ClockElement {
    default_duration: f64,
    source: Option<String>,
    duration: f64,
    playhead: Playhead,
    metadata_pending: bool,
    ended: bool,
    events: Option<mpsc::UnboundedSender<MediaEvent>>,
}

impl ClockElement {
    /// Sources loaded without a duration hint last `default_duration`.
    pub fn new(default_duration: f64) -> Self {
        ClockElement {
            default_duration,
            source: None,
            duration: 0.0,
            playhead: Playhead::default(),
            metadata_pending: false,
            ended: false,
            events: None,
        }
    }

    fn emit(&self, event: MediaEvent) {
        if let Some(events) = &self.events {
            // Nobody listening after unmount; dropping the event is fine.
            let _ = events.send(event);
        }
    }

    pub fn tick_at(&mut self, now: Instant) {
        if self.source.is_none() {
            return;
        }
        if self.metadata_pending {
            self.metadata_pending = false;
            self.emit(MediaEvent::Metadata {
                duration: self.duration,
            });
        }
        if !self.playhead.is_running() || self.ended {
            return;
        }
        let position = self.playhead.position(now);
        if position >= self.duration {
            self.playhead.halt(now);
            self.playhead.set(self.duration, now);
            self.ended = true;
            self.emit(MediaEvent::TimeUpdate(self.duration));
            self.emit(MediaEvent::Ended);
        } else {
            self.emit(MediaEvent::TimeUpdate(position));
        }
    }
}

impl MediaElement for ClockElement {
    fn load(&mut self, uri: &str, duration_hint: Option<f64>) {
        self.duration = duration_hint
            .filter(|d| d.is_finite() && *d >= 0.0)
            .unwrap_or(self.default_duration);
        self.source = Some(uri.to_string());
        self.playhead.reset();
        self.metadata_pending = true;
        self.ended = false;
    }

    fn play(&mut self) -> Result<(), MediaError> {
        if self.source.is_none() {
            return Err(MediaError::NotLoaded);
        }
        if self.ended {
            // Playing an ended source starts it over.
            self.playhead.reset();
            self.ended = false;
        }
        self.playhead.resume(Instant::now());
        Ok(())
    }

    fn pause(&mut self) {
        self.playhead.halt(Instant::now());
    }

    fn seek(&mut self, seconds: f64) {
        let target = seconds.clamp(0.0, self.duration.max(0.0));
        self.playhead.set(target, Instant::now());
        self.ended = false;
    }

    fn current_time(&self) -> f64 {
        self.playhead.position(Instant::now()).min(self.duration)
    }

    // Nothing is audible here; the transport keeps the gain state.
    fn set_volume(&mut self, _volume: f32) {}

    fn set_muted(&mut self, _muted: bool) {}

    fn subscribe(&mut self) -> MediaEvents {
        let (tx, rx) = mpsc::unbounded_channel();
        self.events = Some(tx);
        rx
    }

    fn tick(&mut self) {
        self.tick_at(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn drain(rx: &mut MediaEvents) -> Vec<MediaEvent> {
        let mut out = Vec::new();
        while let Ok(event) = rx.try_recv() {
            out.push(event);
        }
        out
    }

    #[test]
    fn playhead_accumulates_only_while_running() {
        let start = Instant::now();
        let mut playhead = Playhead::default();
        playhead.resume(start);
        playhead.halt(start + Duration::from_secs(2));
        assert_eq!(playhead.position(start + Duration::from_secs(10)), 2.0);
        playhead.resume(start + Duration::from_secs(10));
        assert_eq!(playhead.position(start + Duration::from_secs(11)), 3.0);
        playhead.set(1.0, start + Duration::from_secs(11));
        assert_eq!(playhead.position(start + Duration::from_secs(12)), 2.0);
    }

    #[test]
    fn load_reports_known_duration_once() {
        let mut element = ClockElement::new(30.0);
        let mut rx = element.subscribe();
        element.load("/videos/a.mp4", Some(8.0));
        element.tick();
        element.tick();
        assert_eq!(drain(&mut rx), vec![MediaEvent::Metadata { duration: 8.0 }]);

        element.load("/videos/unknown.mp4", None);
        element.tick();
        assert_eq!(drain(&mut rx), vec![MediaEvent::Metadata { duration: 30.0 }]);
    }

    #[test]
    fn reaching_the_end_emits_ended_once() {
        let mut element = ClockElement::new(0.0);
        let mut rx = element.subscribe();
        element.load("/videos/short.mp4", None);
        element.play().unwrap();
        element.tick();
        element.tick();
        let events = drain(&mut rx);
        assert_eq!(events.iter().filter(|e| **e == MediaEvent::Ended).count(), 1);
        assert_eq!(events.first(), Some(&MediaEvent::Metadata { duration: 0.0 }));
    }

    #[test]
    fn play_without_source_is_rejected() {
        let mut element = ClockElement::new(10.0);
        assert!(matches!(element.play(), Err(MediaError::NotLoaded)));
    }

    #[test]
    fn seek_clamps_to_duration() {
        let mut element = ClockElement::new(10.0);
        element.load("/videos/a.mp4", None);
        element.seek(99.0);
        assert_eq!(element.current_time(), 10.0);
        element.seek(-1.0);
        assert_eq!(element.current_time(), 0.0);
    }
}
