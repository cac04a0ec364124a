// Progress bar geometry and drag state.
//
// Pointer x coordinates are converted to a playback time by linear
// interpolation over the bar's rendered extent. The tracker holds the
// provisional drag time; committing it to the media element is the
// transport's job.

/// Rendered extent of the progress bar, in the same units as pointer x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekBar {
    pub left: f64,
    pub width: f64,
}

impl Default for SeekBar {
    fn default() -> Self {
        SeekBar { left: 0.0, width: 1.0 }
    }
}

impl SeekBar {
    pub fn new(left: f64, width: f64) -> Self {
        SeekBar { left, width }
    }

    /// Time under the pointer, clamped to [0, duration].
    pub fn time_at(&self, pointer_x: f64, duration: f64) -> f64 {
        if !(duration > 0.0) || !(self.width > 0.0) || !pointer_x.is_finite() {
            return 0.0;
        }
        let time = (pointer_x - self.left) / self.width * duration;
        time.clamp(0.0, duration)
    }
}

/// Fraction of the track shown as played. Always in [0, 1]; 0 whenever
/// the duration is unknown.
pub fn progress_fraction(position: f64, duration: f64) -> f64 {
    if !(duration > 0.0) || !position.is_finite() {
        return 0.0;
    }
    (position / duration).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeekTracker {
    bar: SeekBar,
    dragging: bool,
    drag_time: Option<f64>,
}

impl SeekTracker {
    pub fn new(bar: SeekBar) -> Self {
        SeekTracker {
            bar,
            dragging: false,
            drag_time: None,
        }
    }

    pub fn bar(&self) -> SeekBar {
        self.bar
    }

    /// The UI calls this whenever the bar is laid out again.
    pub fn set_bar(&mut self, bar: SeekBar) {
        self.bar = bar;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn drag_time(&self) -> Option<f64> {
        self.drag_time
    }

    pub fn begin(&mut self, pointer_x: f64, duration: f64) {
        self.dragging = true;
        self.drag_time = Some(self.bar.time_at(pointer_x, duration));
    }

    pub fn update(&mut self, pointer_x: f64, duration: f64) {
        if !self.dragging {
            return;
        }
        self.drag_time = Some(self.bar.time_at(pointer_x, duration));
    }

    /// Leaves the dragging state, returning the time to commit, if any.
    pub fn finish(&mut self) -> Option<f64> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;
        self.drag_time.take()
    }

    /// Drops an in-flight drag without committing it.
    pub fn cancel(&mut self) {
        self.dragging = false;
        self.drag_time = None;
    }

    /// Position to display: the drag preview while dragging, else `current`.
    pub fn displayed(&self, current: f64) -> f64 {
        match (self.dragging, self.drag_time) {
            (true, Some(time)) => time,
            _ => current,
        }
    }
}
