// ==========================================
// VOLUME CONTROL
// ==========================================
// Normalized volume in [0, 1] plus the mute flag and the volume to
// restore on unmute. The two player variants differ only in constants
// and in the curve applied before the value reaches the media element.

/// How a slider position becomes output gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeCurve {
    /// Slider value goes straight to the element (foreground audio).
    Linear,
    /// Slider value is squared first (ambient background video).
    Squared,
}

impl VolumeCurve {
    pub fn apply(self, volume: f64) -> f64 {
        match self {
            VolumeCurve::Linear => volume,
            VolumeCurve::Squared => volume * volume,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// On-screen extent of a slider track along its axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    pub start: f64,
    pub length: f64,
}

/// Pointer position to normalized volume. Horizontal tracks grow left to
/// right, vertical tracks grow bottom to top (screen y grows downwards).
pub fn volume_from_pointer(position: f64, track: TrackGeometry, orientation: Orientation) -> f64 {
    if track.length <= 0.0 || !position.is_finite() {
        return 0.0;
    }
    let along = (position - track.start) / track.length;
    let value = match orientation {
        Orientation::Horizontal => along,
        Orientation::Vertical => 1.0 - along,
    };
    value.clamp(0.0, 1.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolumeControl {
    volume: f64,
    prev_volume: f64,
    muted: bool,
    // Floor restored on unmute when nothing audible was remembered.
    min_volume: f64,
    // Volumes at or below this count as silent for toggle_mute().
    silence_threshold: f64,
}

impl VolumeControl {
    pub fn new(volume: f64, muted: bool, min_volume: f64, silence_threshold: f64) -> Self {
        let volume = clamp_unit(volume);
        VolumeControl {
            volume,
            prev_volume: volume,
            muted,
            min_volume: clamp_unit(min_volume),
            silence_threshold: silence_threshold.max(0.0),
        }
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn prev_volume(&self) -> f64 {
        self.prev_volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_silent(&self) -> bool {
        self.volume <= self.silence_threshold
    }

    // ==========================================
    // set_volume()
    // ==========================================
    // Moving the slider to an audible value both remembers it and
    // un-mutes. Moving it to 0 leaves prev_volume and the mute flag alone.
    pub fn set_volume(&mut self, volume: f64) {
        let volume = clamp_unit(volume);
        self.volume = volume;
        if volume > 0.0 {
            self.prev_volume = volume;
            self.muted = false;
        }
    }

    // ==========================================
    // toggle_mute()
    // ==========================================
    // Round trip: mute then unmute restores the exact pre-mute volume,
    // unless that volume was 0, in which case the floor is used.
    pub fn toggle_mute(&mut self) {
        if self.muted || self.is_silent() {
            self.muted = false;
            self.volume = if self.prev_volume > 0.0 {
                self.prev_volume
            } else {
                self.min_volume
            };
        } else {
            self.prev_volume = self.volume;
            self.volume = 0.0;
            self.muted = true;
        }
    }

    /// Gain that should reach the media element.
    pub fn effective(&self, curve: VolumeCurve) -> f64 {
        if self.muted {
            0.0
        } else {
            curve.apply(self.volume)
        }
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audio() -> VolumeControl {
        VolumeControl::new(0.25, false, 0.4, 0.0)
    }

    #[test]
    fn set_volume_clamps() {
        let mut control = audio();
        control.set_volume(1.7);
        assert_eq!(control.volume(), 1.0);
        control.set_volume(-3.0);
        assert_eq!(control.volume(), 0.0);
        control.set_volume(f64::NAN);
        assert_eq!(control.volume(), 0.0);
    }

    #[test]
    fn mute_round_trip_restores_exact_volume() {
        let mut control = audio();
        control.set_volume(0.73);
        control.toggle_mute();
        assert!(control.is_muted());
        assert_eq!(control.volume(), 0.0);
        assert_eq!(control.prev_volume(), 0.73);
        control.toggle_mute();
        assert!(!control.is_muted());
        assert_eq!(control.volume(), 0.73);
    }

    #[test]
    fn unmute_from_zero_uses_the_floor() {
        let mut control = VolumeControl::new(0.0, false, 0.4, 0.0);
        // Silent and unmuted counts as muted, so the first toggle restores.
        control.toggle_mute();
        assert_eq!(control.volume(), 0.4);
        assert!(!control.is_muted());
    }

    #[test]
    fn dragging_slider_to_zero_then_up_unmutes() {
        let mut control = audio();
        control.toggle_mute();
        assert!(control.is_muted());
        control.set_volume(0.0);
        assert!(control.is_muted());
        control.set_volume(0.6);
        assert!(!control.is_muted());
        assert_eq!(control.prev_volume(), 0.6);
    }

    #[test]
    fn slider_to_zero_keeps_prev_volume() {
        let mut control = audio();
        control.set_volume(0.5);
        control.set_volume(0.0);
        assert_eq!(control.prev_volume(), 0.5);
        assert!(!control.is_muted());
        control.toggle_mute();
        assert_eq!(control.volume(), 0.5);
    }

    #[test]
    fn video_threshold_treats_near_zero_as_silent() {
        let mut control = VolumeControl::new(0.2, true, 0.05, 0.005);
        control.toggle_mute();
        assert_eq!(control.volume(), 0.2);
        control.set_volume(0.004);
        assert!(control.is_silent());
        control.toggle_mute();
        assert_eq!(control.volume(), 0.004);
        assert!(!control.is_muted());
    }

    #[test]
    fn curves_stay_distinct() {
        let mut control = audio();
        control.set_volume(0.5);
        assert_eq!(control.effective(VolumeCurve::Linear), 0.5);
        assert_eq!(control.effective(VolumeCurve::Squared), 0.25);
        control.toggle_mute();
        assert_eq!(control.effective(VolumeCurve::Squared), 0.0);
    }

    #[test]
    fn pointer_maps_along_both_axes() {
        let track = TrackGeometry { start: 10.0, length: 100.0 };
        assert_eq!(volume_from_pointer(60.0, track, Orientation::Horizontal), 0.5);
        assert_eq!(volume_from_pointer(-5.0, track, Orientation::Horizontal), 0.0);
        assert_eq!(volume_from_pointer(500.0, track, Orientation::Horizontal), 1.0);
        assert_eq!(volume_from_pointer(35.0, track, Orientation::Vertical), 0.75);
        let flat = TrackGeometry { start: 0.0, length: 0.0 };
        assert_eq!(volume_from_pointer(3.0, flat, Orientation::Horizontal), 0.0);
    }
}
