// ==========================================
// RODIO AUDIO ELEMENT
// ==========================================
// The MediaElement the audio player runs on. It plays local files from
// the asset root through rodio and reports lifecycle events back to the
// transport.
//
// Key Concept: rodio's Sink is a queue of decoded sources with its own
// play/pause/volume controls. It does not report position, so we keep a
// Playhead next to it.

use rodio::{Decoder, OutputStream, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use super::clock::Playhead;
use super::media::{MediaElement, MediaEvent, MediaEvents};
use crate::error::MediaError;

type FileDecoder = Decoder<BufReader<File>>;

pub struct RodioElement {
    // None when there is no output device (headless machine). Every
    // command still updates our bookkeeping; play() reports the problem.
    sink: Option<Sink>,
    asset_root: PathBuf,
    source: Option<PathBuf>,
    duration: f64,
    playhead: Playhead,
    metadata_pending: bool,
    ended: bool,
    volume: f32,
    muted: bool,
    events: Option<mpsc::UnboundedSender<MediaEvent>>,
}

// Stop the device before dropping
impl Drop for RodioElement {
    fn drop(&mut self) {
        if let Some(sink) = &self.sink {
            sink.stop();
        }
        self.sink = None;
    }
}

impl RodioElement {
    // ==========================================
    // CONSTRUCTOR: new()
    // ==========================================
    // Ask the OS for the default output device and build a sink on it.
    // The OutputStream has to outlive the sink; it is leaked on purpose
    // so audio keeps working for the lifetime of the program.
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        let sink = match OutputStream::try_default() {
            Ok((stream, handle)) => match Sink::try_new(&handle) {
                Ok(sink) => {
                    std::mem::forget(stream);
                    Some(sink)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "could not create audio sink");
                    None
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "no audio output device");
                None
            }
        };

        Self::with_sink(sink, asset_root)
    }

    fn with_sink(sink: Option<Sink>, asset_root: impl Into<PathBuf>) -> Self {
        RodioElement {
            sink,
            asset_root: asset_root.into(),
            source: None,
            duration: 0.0,
            playhead: Playhead::default(),
            metadata_pending: false,
            ended: false,
            volume: 1.0,
            muted: false,
            events: None,
        }
    }

    pub fn has_output(&self) -> bool {
        self.sink.is_some()
    }

    /// "/music/a.flac" -> "<asset_root>/music/a.flac"
    pub fn resolve(asset_root: &Path, uri: &str) -> PathBuf {
        asset_root.join(uri.trim_start_matches('/'))
    }

    // Decode from file. The duration is whatever the container reports;
    // rodio's mp3 decoder never reports one.
    fn decode(path: &Path) -> Result<(FileDecoder, Option<f64>), MediaError> {
        let file = File::open(path).map_err(|source| MediaError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let decoder = Decoder::new(BufReader::new(file)).map_err(|err| MediaError::Decode {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let duration = decoder.total_duration().map(|d| d.as_secs_f64());
        Ok((decoder, duration))
    }

    // Rodio 0.17 cannot seek a playing source, so the file is decoded
    // again and the first `offset` seconds skipped.
    fn queue_from(&mut self, offset: f64) -> Result<(), MediaError> {
        let path = self.source.clone().ok_or(MediaError::NotLoaded)?;
        let (decoder, _) = Self::decode(&path)?;
        if let Some(sink) = &self.sink {
            sink.stop();
            sink.append(decoder.skip_duration(Duration::from_secs_f64(offset.max(0.0))));
            if !self.playhead.is_running() {
                sink.pause();
            }
        }
        Ok(())
    }

    fn apply_gain(&self) {
        if let Some(sink) = &self.sink {
            sink.set_volume(if self.muted { 0.0 } else { self.volume });
        }
    }

    fn emit(&self, event: MediaEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }
}

impl MediaElement for RodioElement {
    fn load(&mut self, uri: &str, duration_hint: Option<f64>) {
        let path = Self::resolve(&self.asset_root, uri);
        self.playhead.reset();
        self.ended = false;
        self.metadata_pending = false;

        // The old source goes silent first, whether or not the new one opens.
        if let Some(sink) = &self.sink {
            sink.stop();
            sink.pause();
        }

        match Self::decode(&path) {
            Ok((decoder, reported)) => {
                let duration = known_duration(reported, duration_hint);
                if let Some(sink) = &self.sink {
                    sink.append(decoder);
                    sink.pause();
                }
                tracing::debug!(path = %path.display(), duration, "audio source loaded");
                self.source = Some(path);
                self.duration = duration;
                self.metadata_pending = true;
            }
            Err(err) => {
                // No metadata follows, so the transport stays in Loading
                // and the controls go inert for this track.
                tracing::error!(error = %err, "failed to load audio source");
                self.source = None;
                self.duration = 0.0;
            }
        }
    }

    fn play(&mut self) -> Result<(), MediaError> {
        if self.sink.is_none() {
            return Err(MediaError::NoOutputDevice);
        }
        if self.source.is_none() {
            return Err(MediaError::NotLoaded);
        }
        self.playhead.resume(Instant::now());
        if self.ended {
            // The decoder is spent; queue the file again from the top.
            self.ended = false;
            self.playhead.set(0.0, Instant::now());
            self.queue_from(0.0)?;
        }
        if let Some(sink) = &self.sink {
            sink.play();
        }
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
        self.playhead.halt(Instant::now());
    }

    fn seek(&mut self, seconds: f64) {
        let target = if self.duration > 0.0 {
            seconds.clamp(0.0, self.duration)
        } else {
            seconds.max(0.0)
        };
        self.playhead.set(target, Instant::now());
        self.ended = false;
        if let Err(err) = self.queue_from(target) {
            tracing::warn!(error = %err, target, "seek failed");
        }
    }

    fn current_time(&self) -> f64 {
        let position = self.playhead.position(Instant::now());
        if self.duration > 0.0 {
            position.min(self.duration)
        } else {
            position
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.apply_gain();
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.apply_gain();
    }

    fn subscribe(&mut self) -> MediaEvents {
        let (tx, rx) = mpsc::unbounded_channel();
        self.events = Some(tx);
        rx
    }

    fn tick(&mut self) {
        if self.metadata_pending {
            self.metadata_pending = false;
            self.emit(MediaEvent::Metadata {
                duration: self.duration,
            });
        }
        if !self.playhead.is_running() || self.ended {
            return;
        }
        self.emit(MediaEvent::TimeUpdate(self.current_time()));

        // The sink drains once the decoder runs out of samples.
        let drained = self.sink.as_ref().map(Sink::empty).unwrap_or(false);
        if drained {
            self.playhead.halt(Instant::now());
            self.ended = true;
            self.emit(MediaEvent::Ended);
        }
    }
}

/// Length reported by the decoder, else the configured one, else 0.
fn known_duration(reported: Option<f64>, hint: Option<f64>) -> f64 {
    reported
        .filter(|d| *d > 0.0)
        .or_else(|| hint.filter(|d| d.is_finite() && *d > 0.0))
        .unwrap_or(0.0)
}
