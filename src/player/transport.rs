// ==========================================
// TRANSPORT CONTROLLER
// ==========================================
// One transport drives one media element: which track is selected,
// whether it should be playing, where the playhead is, how loud it is.
//
// The controller owns all state. It pushes commands to the element and
// reconciles the element's events back into state, never both for the
// same value in the same step.
//
// Phases:
//   Idle    -> Loading  on mount or track change
//   Loading -> Playing  metadata arrived and is_playing
//   Loading -> Paused   metadata arrived and !is_playing
//   Playing -> Paused   user pause, or a drag-seek begins
//   Paused  -> Playing  user play, or drag ends on a running track
//   Playing -> Loading  track ended without repeat (advance)
//   Playing -> Playing  track ended with repeat (rewind + replay)

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::media::{MediaElement, MediaEvent, MediaEvents};
use super::queue::{Track, TrackList};
use super::seek::{progress_fraction, SeekBar, SeekTracker};
use super::volume::{VolumeControl, VolumeCurve};

/// `previous()` restarts the current track past this position, in seconds.
pub const RESTART_THRESHOLD: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    Idle,
    Loading,
    Playing,
    Paused,
}

// ==========================================
// TRANSPORT PROFILE
// ==========================================
// The audio player and the background video differ only in these
// settings. The volume curves in particular must stay distinct.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportProfile {
    pub name: &'static str,
    pub curve: VolumeCurve,
    pub initial_volume: f64,
    pub start_muted: bool,
    pub min_volume: f64,
    pub silence_threshold: f64,
    pub autoplay: bool,
    pub shuffle: bool,
}

impl TransportProfile {
    /// Foreground playlist player: linear volume, starts paused.
    pub fn audio() -> Self {
        TransportProfile {
            name: "audio",
            curve: VolumeCurve::Linear,
            initial_volume: 0.25,
            start_muted: false,
            min_volume: 0.4,
            silence_threshold: 0.0,
            autoplay: false,
            shuffle: false,
        }
    }

    /// Ambient carousel: squared volume, muted autoplay, shuffled order
    /// with the first video pinned.
    pub fn background_video() -> Self {
        TransportProfile {
            name: "video",
            curve: VolumeCurve::Squared,
            initial_volume: 0.2,
            start_muted: true,
            min_volume: 0.05,
            silence_threshold: 0.005,
            autoplay: true,
            shuffle: true,
        }
    }
}

// ==========================================
// TRANSPORT STATE
// ==========================================
// Read-only outside this module: callers get &TransportState.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportState {
    pub current_index: usize,
    pub is_playing: bool,
    pub current_time: f64,
    pub duration: f64,
    pub is_repeat: bool,
    pub volume: VolumeControl,
    pub seek: SeekTracker,
}

impl TransportState {
    fn new(profile: &TransportProfile) -> Self {
        TransportState {
            current_index: 0,
            is_playing: profile.autoplay,
            current_time: 0.0,
            duration: 0.0,
            is_repeat: false,
            volume: VolumeControl::new(
                profile.initial_volume,
                profile.start_muted,
                profile.min_volume,
                profile.silence_threshold,
            ),
            seek: SeekTracker::default(),
        }
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    pub fn is_dragging(&self) -> bool {
        self.seek.is_dragging()
    }

    pub fn drag_time(&self) -> Option<f64> {
        self.seek.drag_time()
    }
}

pub struct Transport<M: MediaElement> {
    media: M,
    tracks: TrackList,
    profile: TransportProfile,
    state: TransportState,
    phase: PlaybackPhase,
    events: Option<MediaEvents>,
    // Set when a drag paused a running track.
    resume_after_drag: bool,
    rng: StdRng,
}

impl<M: MediaElement> Transport<M> {
    pub fn new(media: M, tracks: TrackList, profile: TransportProfile) -> Self {
        Self::with_rng(media, tracks, profile, StdRng::from_entropy())
    }

    pub fn with_rng(media: M, tracks: TrackList, profile: TransportProfile, rng: StdRng) -> Self {
        let state = TransportState::new(&profile);
        Transport {
            media,
            tracks,
            profile,
            state,
            phase: PlaybackPhase::Idle,
            events: None,
            resume_after_drag: false,
            rng,
        }
    }

    // ==========================================
    // LIFECYCLE
    // ==========================================

    pub fn mount(&mut self) {
        self.events = Some(self.media.subscribe());
        if self.profile.shuffle {
            self.tracks.reshuffle(&mut self.rng);
        }
        self.apply_volume();
        tracing::info!(player = self.profile.name, tracks = self.tracks.len(), "transport mounted");
        self.load_current();
    }

    /// Detaches from the element's events whatever the current phase.
    pub fn unmount(&mut self) {
        self.events = None;
        self.media.pause();
        self.state.seek.cancel();
        self.resume_after_drag = false;
        self.phase = PlaybackPhase::Idle;
        tracing::info!(player = self.profile.name, "transport unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.events.is_some()
    }

    // ==========================================
    // PLAYBACK CONTROL
    // ==========================================

    pub fn play_pause(&mut self) {
        self.state.is_playing = !self.state.is_playing;
        if self.state.is_playing {
            match self.phase {
                // Metadata for the new source will issue the play request.
                PlaybackPhase::Idle | PlaybackPhase::Loading => {}
                PlaybackPhase::Playing | PlaybackPhase::Paused => {
                    self.request_play();
                    self.phase = PlaybackPhase::Playing;
                }
            }
        } else {
            self.media.pause();
            self.resume_after_drag = false;
            if self.phase == PlaybackPhase::Playing {
                self.phase = PlaybackPhase::Paused;
            }
        }
        tracing::debug!(player = self.profile.name, playing = self.state.is_playing, "play/pause");
    }

    pub fn next(&mut self) {
        let next = self.tracks.next_index(self.state.current_index);
        if self.profile.shuffle && next <= self.state.current_index {
            self.tracks.reshuffle(&mut self.rng);
        }
        self.select(next);
    }

    pub fn previous(&mut self) {
        if self.media.current_time() > RESTART_THRESHOLD {
            self.state.seek.cancel();
            self.media.seek(0.0);
            self.state.current_time = 0.0;
            tracing::debug!(player = self.profile.name, "restarted current track");
            return;
        }
        let previous = self.tracks.previous_index(self.state.current_index);
        self.select(previous);
    }

    pub fn toggle_repeat(&mut self) {
        self.state.is_repeat = !self.state.is_repeat;
    }

    /// Jump to a track in the active order. Out-of-range indices wrap.
    pub fn select(&mut self, index: usize) {
        self.state.current_index = index % self.tracks.len();
        self.load_current();
    }

    fn load_current(&mut self) {
        self.state.seek.cancel();
        self.resume_after_drag = false;
        self.state.current_time = 0.0;
        self.state.duration = 0.0;
        let track = self.tracks.get(self.state.current_index);
        let (src, duration_hint) = (track.src.clone(), track.duration);
        tracing::info!(player = self.profile.name, index = self.state.current_index, %src, "loading track");
        self.media.load(&src, duration_hint);
        self.phase = PlaybackPhase::Loading;
    }

    // Fire and forget: a rejected play is logged and the intent stays.
    fn request_play(&mut self) {
        if let Err(err) = self.media.play() {
            tracing::warn!(player = self.profile.name, error = %err, "play request failed");
        }
    }

    // ==========================================
    // MEDIA EVENTS
    // ==========================================

    /// Advance the element's clock and reconcile whatever it reported.
    pub fn tick(&mut self) {
        self.media.tick();
        self.pump();
    }

    /// Drain pending element events.
    pub fn pump(&mut self) {
        let mut pending = Vec::new();
        if let Some(events) = self.events.as_mut() {
            while let Ok(event) = events.try_recv() {
                pending.push(event);
            }
        }
        for event in pending {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: MediaEvent) {
        // The user's drag is the only source of playhead truth meanwhile.
        if self.state.seek.is_dragging() {
            tracing::trace!(player = self.profile.name, ?event, "event ignored during drag");
            return;
        }
        match event {
            MediaEvent::Metadata { duration } => self.on_metadata(duration),
            MediaEvent::TimeUpdate(time) => self.on_time_update(time),
            MediaEvent::Ended => self.on_ended(),
        }
    }

    fn on_metadata(&mut self, duration: f64) {
        self.state.duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            0.0
        };
        if self.phase != PlaybackPhase::Loading {
            return;
        }
        if self.state.is_playing {
            self.request_play();
            self.phase = PlaybackPhase::Playing;
        } else {
            self.phase = PlaybackPhase::Paused;
        }
    }

    fn on_time_update(&mut self, time: f64) {
        if !time.is_finite() {
            return;
        }
        let time = time.max(0.0);
        self.state.current_time = if self.state.duration > 0.0 {
            time.min(self.state.duration)
        } else {
            time
        };
    }

    fn on_ended(&mut self) {
        if self.state.is_repeat {
            // Progress drops to 0 before the replay so the bar never
            // lingers at 100%.
            self.state.current_time = 0.0;
            self.media.seek(0.0);
            self.request_play();
            self.phase = PlaybackPhase::Playing;
        } else {
            self.next();
        }
    }

    // ==========================================
    // SEEKING
    // ==========================================

    pub fn set_seek_bar(&mut self, bar: SeekBar) {
        self.state.seek.set_bar(bar);
    }

    pub fn begin_drag(&mut self, pointer_x: f64) {
        if self.state.duration <= 0.0 {
            return;
        }
        self.state.seek.begin(pointer_x, self.state.duration);
        if self.phase == PlaybackPhase::Playing {
            self.media.pause();
            self.phase = PlaybackPhase::Paused;
            self.resume_after_drag = true;
        }
    }

    pub fn update_drag(&mut self, pointer_x: f64) {
        self.state.seek.update(pointer_x, self.state.duration);
    }

    pub fn end_drag(&mut self) {
        if let Some(time) = self.state.seek.finish() {
            self.commit_seek(time);
        }
        if std::mem::take(&mut self.resume_after_drag) && self.state.is_playing {
            self.request_play();
            self.phase = PlaybackPhase::Playing;
        }
    }

    pub fn click_seek(&mut self, pointer_x: f64) {
        if self.state.duration <= 0.0 || self.state.seek.is_dragging() {
            return;
        }
        let time = self.state.seek.bar().time_at(pointer_x, self.state.duration);
        self.commit_seek(time);
    }

    fn commit_seek(&mut self, time: f64) {
        self.media.seek(time);
        self.state.current_time = time;
        tracing::debug!(player = self.profile.name, time, "seek committed");
    }

    /// Playhead to display: drag preview while dragging.
    pub fn displayed_time(&self) -> f64 {
        self.state.seek.displayed(self.state.current_time)
    }

    pub fn progress_fraction(&self) -> f64 {
        progress_fraction(self.displayed_time(), self.state.duration)
    }

    // ==========================================
    // VOLUME
    // ==========================================

    pub fn set_volume(&mut self, volume: f64) {
        self.state.volume.set_volume(volume);
        self.apply_volume();
    }

    pub fn toggle_mute(&mut self) {
        self.state.volume.toggle_mute();
        self.apply_volume();
    }

    fn apply_volume(&mut self) {
        let gain = self.state.volume.effective(self.profile.curve);
        self.media.set_volume(gain as f32);
        self.media.set_muted(self.state.volume.is_muted());
    }

    // ==========================================
    // INSPECTION
    // ==========================================

    pub fn state(&self) -> &TransportState {
        &self.state
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn current_track(&self) -> &Track {
        self.tracks.get(self.state.current_index)
    }

    pub fn tracks(&self) -> &TrackList {
        &self.tracks
    }

    #[cfg(test)]
    pub(crate) fn media(&self) -> &M {
        &self.media
    }

    #[cfg(test)]
    pub(crate) fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }
}
