// ==========================================
// MEDIA ELEMENT BOUNDARY
// ==========================================
// The transport never talks to an audio library directly. It drives a
// MediaElement through a small command interface and observes it through
// a channel of MediaEvents. Adapters (rodio, the headless clock, the test
// double) sit behind this trait.
//
// Direction of travel:
// - commands: controller -> element (load, play, pause, seek, volume)
// - events:   element -> controller (metadata, time update, ended)

use tokio::sync::mpsc;

use crate::error::MediaError;

/// Lifecycle notifications emitted by a media element.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// The loaded source is ready and its duration is known (0 if unknown).
    Metadata { duration: f64 },
    /// Playback position advanced, in seconds.
    TimeUpdate(f64),
    /// Playback reached the end of the source.
    Ended,
}

pub type MediaEvents = mpsc::UnboundedReceiver<MediaEvent>;

pub trait MediaElement {
    /// Replace the current source. Readiness is reported later through
    /// a `Metadata` event. `duration_hint` is the configured length, used
    /// when the source itself does not report one.
    fn load(&mut self, uri: &str, duration_hint: Option<f64>);

    /// Ask the element to start playing. Failure (no device, decode error,
    /// nothing loaded) is reported but the caller decides what to do with it.
    fn play(&mut self) -> Result<(), MediaError>;

    fn pause(&mut self);

    /// Move the playback position, in seconds.
    fn seek(&mut self, seconds: f64);

    /// Native playback position, in seconds.
    fn current_time(&self) -> f64;

    /// Output gain in [0, 1], after any curve the transport applied.
    fn set_volume(&mut self, volume: f32);

    fn set_muted(&mut self, muted: bool);

    /// Open a fresh event channel. Any previous subscription stops
    /// receiving events.
    fn subscribe(&mut self) -> MediaEvents;

    /// Advance the element's own clock and emit whatever events are due.
    /// Called once per UI tick.
    fn tick(&mut self) {}
}

// ==========================================
// TEST DOUBLE
// ==========================================
// Records every command and lets tests inject events by hand.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Command {
        Load(String),
        Play,
        Pause,
        Seek(f64),
        Volume(f32),
        Muted(bool),
    }

    #[derive(Debug, Default)]
    pub struct ScriptedMedia {
        pub commands: Vec<Command>,
        pub position: f64,
        pub volume: f32,
        pub muted: bool,
        pub reject_play: bool,
        pub duration_hint: Option<f64>,
        sender: Option<mpsc::UnboundedSender<MediaEvent>>,
    }

    impl ScriptedMedia {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn emit(&self, event: MediaEvent) {
            if let Some(sender) = &self.sender {
                let _ = sender.send(event);
            }
        }

        pub fn count(&self, wanted: &Command) -> usize {
            self.commands.iter().filter(|c| *c == wanted).count()
        }

        pub fn last_load(&self) -> Option<&str> {
            self.commands.iter().rev().find_map(|c| match c {
                Command::Load(uri) => Some(uri.as_str()),
                _ => None,
            })
        }
    }

    impl MediaElement for ScriptedMedia {
        fn load(&mut self, uri: &str, duration_hint: Option<f64>) {
            self.position = 0.0;
            self.duration_hint = duration_hint;
            self.commands.push(Command::Load(uri.to_string()));
        }

        fn play(&mut self) -> Result<(), MediaError> {
            self.commands.push(Command::Play);
            if self.reject_play {
                Err(MediaError::Rejected("autoplay blocked".into()))
            } else {
                Ok(())
            }
        }

        fn pause(&mut self) {
            self.commands.push(Command::Pause);
        }

        fn seek(&mut self, seconds: f64) {
            self.position = seconds;
            self.commands.push(Command::Seek(seconds));
        }

        fn current_time(&self) -> f64 {
            self.position
        }

        fn set_volume(&mut self, volume: f32) {
            self.volume = volume;
            self.commands.push(Command::Volume(volume));
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
            self.commands.push(Command::Muted(muted));
        }

        fn subscribe(&mut self) -> MediaEvents {
            let (tx, rx) = mpsc::unbounded_channel();
            self.sender = Some(tx);
            rx
        }
    }
}
