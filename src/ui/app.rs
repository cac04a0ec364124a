// Main TUI application using ratatui
// Lays out the landing page, routes keys and mouse input to the two
// transports, and ticks their media elements.

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use super::marquee::Marquee;
use crate::cache::AssetCache;
use crate::config::SiteConfig;
use crate::player::audio::RodioElement;
use crate::player::clock::ClockElement;
use crate::player::press::PressFeedback;
use crate::player::seek::SeekBar;
use crate::player::volume::{volume_from_pointer, Orientation, TrackGeometry};
use crate::player::{PlaybackPhase, Track, TrackList, Transport, TransportProfile};

const TICK: Duration = Duration::from_millis(50);
const VOLUME_STEP: f64 = 0.05;

// What the held left mouse button is doing.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    // Pressed on the progress bar, no motion yet: a click if released now.
    SeekPressed,
    SeekDragging,
    AudioVolume,
    VideoVolume,
    // Held on an on-screen button.
    Button(Control),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Previous,
    PlayPause,
    Next,
    Repeat,
    Mute,
    VideoPrevious,
    VideoPause,
    VideoNext,
    VideoMute,
}

const CONTROL_GAP: u16 = 2;

const CONTROLS: [Control; 9] = [
    Control::Previous,
    Control::PlayPause,
    Control::Next,
    Control::Repeat,
    Control::Mute,
    Control::VideoPrevious,
    Control::VideoPause,
    Control::VideoNext,
    Control::VideoMute,
];

// Screen regions recorded while drawing, used for mouse hit tests.
#[derive(Debug, Clone, Copy, Default)]
struct HitAreas {
    seek_bar: Rect,
    audio_volume: Rect,
    video_volume: Rect,
    controls: [Rect; CONTROLS.len()],
}

impl HitAreas {
    fn control_at(&self, column: u16, row: u16) -> Option<Control> {
        CONTROLS
            .iter()
            .zip(self.controls.iter())
            .find(|(_, area)| contains(**area, column, row))
            .map(|(control, _)| *control)
    }
}

pub struct LandingApp {
    config: SiteConfig,
    audio: Transport<RodioElement>,
    video: Transport<ClockElement>,
    marquee: Marquee,
    areas: HitAreas,
    gesture: Gesture,
    presses: [PressFeedback; CONTROLS.len()],
    status_message: String,
    should_quit: bool,
    status_rx: mpsc::UnboundedReceiver<String>,
    status_tx: mpsc::UnboundedSender<String>,
}

impl LandingApp {
    pub fn new(config: SiteConfig) -> Result<Self> {
        let (status_tx, status_rx) = mpsc::unbounded_channel();

        let songs = TrackList::new(config.songs.clone())?;
        let videos = TrackList::new(config.videos.clone())?;

        let audio_element = RodioElement::new(&config.asset_root);
        let status_message = if audio_element.has_output() {
            String::new()
        } else {
            "No audio device found - the player will stay silent".to_string()
        };
        let video_element = ClockElement::new(config.default_video_secs);

        let mut audio = Transport::new(audio_element, songs, TransportProfile::audio());
        let mut video = Transport::new(video_element, videos, TransportProfile::background_video());
        audio.mount();
        video.mount();

        let marquee = Marquee::new(config.marquee.text.clone(), config.marquee.speed);

        Ok(LandingApp {
            config,
            audio,
            video,
            marquee,
            areas: HitAreas::default(),
            gesture: Gesture::Idle,
            presses: Default::default(),
            status_message,
            should_quit: false,
            status_rx,
            status_tx,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.spawn_cache_warmup();

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        self.audio.unmount();
        self.video.unmount();
        restore_terminal(&mut terminal);

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let mut last_tick = Instant::now();
        loop {
            terminal.draw(|f| self.draw_ui(f))?;

            if let Ok(message) = self.status_rx.try_recv() {
                self.status_message = message;
            }

            if event::poll(TICK)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key.code),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }

            let now = Instant::now();
            self.audio.tick();
            self.video.tick();
            self.marquee.advance(now.duration_since(last_tick).as_secs_f64());
            for press in &mut self.presses {
                press.tick(now);
            }
            last_tick = now;

            if self.should_quit {
                return Ok(());
            }
        }
    }

    // Background task: drop stale caches, then precache the videos.
    fn spawn_cache_warmup(&self) {
        let settings = &self.config.cache;
        if !settings.enabled {
            return;
        }
        let cache = match AssetCache::new(settings) {
            Ok(cache) => cache,
            Err(err) => {
                tracing::warn!(error = %err, "asset cache unavailable");
                return;
            }
        };
        let paths: Vec<String> = self.config.videos.iter().map(|v| v.src.clone()).collect();
        let has_origin = settings.origin.is_some();
        let tx = self.status_tx.clone();

        tokio::spawn(async move {
            if let Err(err) = cache.activate().await {
                tracing::warn!(error = %err, "cache activation failed");
            }
            if !has_origin {
                return;
            }
            match cache.install(&paths).await {
                Ok(0) => {}
                Ok(count) => {
                    let _ = tx.send(format!("Cached {} videos in {}", count, cache.name()));
                }
                Err(err) => {
                    tracing::warn!(error = %err, "video precache failed");
                }
            }
        });
    }

    // ==========================================
    // DRAWING
    // ==========================================

    fn draw_ui(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Length(1),
                Constraint::Length(5),
                Constraint::Min(0),
                Constraint::Length(6),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(frame.size());

        self.draw_hero(frame, chunks[0]);
        self.draw_socials(frame, chunks[1]);
        self.draw_carousel(frame, chunks[2]);
        self.draw_player(frame, chunks[4]);

        self.marquee.layout(chunks[5].width as usize);
        let marquee = Paragraph::new(self.marquee.visible()).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(marquee, chunks[5]);

        let footer = if self.status_message.is_empty() {
            "[Space]Play [n/p]Next/Prev [r]Repeat [m]Mute [↑/↓]Volume [v]Video [ [ / ] ]Video Prev/Next [M]Video Mute [+/-]Video Vol [q]Quit".to_string()
        } else {
            self.status_message.clone()
        };
        frame.render_widget(Paragraph::new(footer), chunks[6]);
    }

    fn draw_hero(&self, frame: &mut Frame, area: Rect) {
        let title = Line::from(Span::styled(
            self.config.title.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
        let greeting = Line::from(Span::styled(
            self.config.greeting.clone(),
            Style::default().fg(Color::Gray),
        ));
        let hero = Paragraph::new(vec![Line::from("✧･ﾟ: *✧･ﾟ:* *:･ﾟ✧*:･ﾟ✧"), title, Line::from(""), greeting])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(hero, area);
    }

    fn draw_socials(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for (i, link) in self.config.socials.iter().enumerate().take(9) {
            if i > 0 {
                spans.push(Span::raw("   "));
            }
            spans.push(Span::styled(format!("[{}] ", i + 1), Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(link.label.clone(), Style::default().fg(Color::Cyan)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
    }

    fn draw_carousel(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Background");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let state = self.video.state();
        let track = self.video.current_track();
        let now_showing = format!(
            "{} {}  ({}/{})  {} / {}",
            phase_symbol(self.video.phase()),
            track.title,
            state.current_index + 1,
            self.video.tracks().len(),
            format_time(state.current_time),
            format_time(state.duration),
        );
        frame.render_widget(Paragraph::new(now_showing), rows[0]);

        let buttons = [
            (Control::VideoPrevious, "⏮ ["),
            (Control::VideoPause, if state.is_playing { "⏸ v" } else { "▶ v" }),
            (Control::VideoNext, "] ⏭"),
            (Control::VideoMute, if state.is_muted() { "🔇 M" } else { "🔊 M" }),
        ];
        let volume = if state.is_muted() { 0.0 } else { state.volume.volume() };

        frame.render_widget(Paragraph::new(self.control_line(&buttons)), rows[1]);
        self.record_controls(rows[1], &buttons);
        self.areas.video_volume = rows[2];
        frame.render_widget(volume_gauge(volume), rows[2]);
    }

    fn draw_player(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Now Playing");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let track = self.audio.current_track().clone();
        frame.render_widget(Paragraph::new(track_line(&track)), rows[0]);

        self.areas.seek_bar = rows[1];
        self.audio
            .set_seek_bar(SeekBar::new(rows[1].x as f64, rows[1].width as f64));
        let progress = Gauge::default()
            .gauge_style(Style::default().fg(Color::White).bg(Color::Black))
            .ratio(self.audio.progress_fraction())
            .label("");
        frame.render_widget(progress, rows[1]);

        let state = self.audio.state();
        let times = format!(
            "{}  /  {}",
            format_time(self.audio.displayed_time()),
            format_time(state.duration)
        );
        frame.render_widget(Paragraph::new(times), rows[2]);

        let buttons = [
            (Control::Previous, "⏮ p"),
            (Control::PlayPause, if state.is_playing { "⏸ Space" } else { "▶ Space" }),
            (Control::Next, "n ⏭"),
            (Control::Repeat, if state.is_repeat { "🔁 r (on)" } else { "🔁 r" }),
            (Control::Mute, volume_icon(state.is_muted(), state.volume.volume())),
        ];
        let volume = if state.is_muted() { 0.0 } else { state.volume.volume() };

        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(20)])
            .split(rows[3]);
        frame.render_widget(Paragraph::new(self.control_line(&buttons)), halves[0]);
        self.record_controls(halves[0], &buttons);
        self.areas.audio_volume = halves[1];
        frame.render_widget(volume_gauge(volume), halves[1]);
    }

    fn control_line(&self, buttons: &[(Control, &'static str)]) -> Line<'static> {
        let now = Instant::now();
        let mut spans = Vec::with_capacity(buttons.len() * 2);
        for (i, (control, label)) in buttons.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" ".repeat(CONTROL_GAP as usize)));
            }
            let style = if self.presses[control_slot(*control)].is_pressed(now) {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            spans.push(Span::styled(*label, style));
        }
        Line::from(spans)
    }

    fn record_controls(&mut self, area: Rect, buttons: &[(Control, &'static str)]) {
        for (control, rect) in layout_controls(area, buttons) {
            self.areas.controls[control_slot(control)] = rect;
        }
    }

    fn tap(&mut self, control: Control) {
        self.presses[control_slot(control)].tap(Instant::now());
    }

    fn activate(&mut self, control: Control) {
        match control {
            Control::Previous => self.audio.previous(),
            Control::PlayPause => self.audio.play_pause(),
            Control::Next => self.audio.next(),
            Control::Repeat => self.audio.toggle_repeat(),
            Control::Mute => self.audio.toggle_mute(),
            Control::VideoPrevious => self.video.previous(),
            Control::VideoPause => self.video.play_pause(),
            Control::VideoNext => self.video.next(),
            Control::VideoMute => self.video.toggle_mute(),
        }
    }

    // ==========================================
    // INPUT
    // ==========================================

    fn handle_key(&mut self, key: KeyCode) {
        self.status_message.clear();
        if let Some(control) = control_for_key(key) {
            self.tap(control);
            self.activate(control);
            return;
        }
        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up => self.nudge_audio_volume(VOLUME_STEP),
            KeyCode::Down => self.nudge_audio_volume(-VOLUME_STEP),
            KeyCode::Char('+') | KeyCode::Char('=') => self.nudge_video_volume(VOLUME_STEP),
            KeyCode::Char('-') => self.nudge_video_volume(-VOLUME_STEP),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.open_social(index);
            }
            _ => {}
        }
    }

    fn nudge_audio_volume(&mut self, delta: f64) {
        let state = self.audio.state();
        let current = if state.is_muted() { 0.0 } else { state.volume.volume() };
        self.audio.set_volume(current + delta);
    }

    fn nudge_video_volume(&mut self, delta: f64) {
        let state = self.video.state();
        let current = if state.is_muted() { 0.0 } else { state.volume.volume() };
        self.video.set_volume(current + delta);
    }

    fn open_social(&mut self, index: usize) {
        let Some(link) = self.config.socials.get(index) else {
            return;
        };
        match open::that(&link.href) {
            Ok(()) => self.status_message = format!("Opened {}", link.label),
            Err(err) => {
                tracing::warn!(error = %err, href = %link.href, "failed to open link");
                self.status_message = format!("Failed to open browser: {}. Visit: {}", err, link.href);
            }
        }
    }

    // Mouse move and release are handled wherever the pointer is, so a
    // drag that leaves the bar keeps tracking.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let x = mouse.column as f64 + 0.5;
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(control) = self.areas.control_at(mouse.column, mouse.row) {
                    self.presses[control_slot(control)].press(Instant::now());
                    self.gesture = Gesture::Button(control);
                } else if contains(self.areas.seek_bar, mouse.column, mouse.row) {
                    self.gesture = Gesture::SeekPressed;
                } else if contains(self.areas.audio_volume, mouse.column, mouse.row) {
                    self.gesture = Gesture::AudioVolume;
                    self.drag_volume(x);
                } else if contains(self.areas.video_volume, mouse.column, mouse.row) {
                    self.gesture = Gesture::VideoVolume;
                    self.drag_volume(x);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => match self.gesture {
                Gesture::SeekPressed => {
                    self.audio.begin_drag(x);
                    self.gesture = Gesture::SeekDragging;
                }
                Gesture::SeekDragging => self.audio.update_drag(x),
                Gesture::AudioVolume | Gesture::VideoVolume => self.drag_volume(x),
                Gesture::Button(control) => {
                    // Leaving the button lets it go without activating it.
                    if self.areas.control_at(mouse.column, mouse.row) != Some(control) {
                        self.presses[control_slot(control)].release(Instant::now());
                        self.gesture = Gesture::Idle;
                    }
                }
                Gesture::Idle => {}
            },
            MouseEventKind::Up(MouseButton::Left) => {
                match self.gesture {
                    Gesture::SeekPressed => self.audio.click_seek(x),
                    Gesture::SeekDragging => self.audio.end_drag(),
                    Gesture::Button(control) => {
                        self.presses[control_slot(control)].release(Instant::now());
                        if self.areas.control_at(mouse.column, mouse.row) == Some(control) {
                            self.status_message.clear();
                            self.activate(control);
                        }
                    }
                    _ => {}
                }
                self.gesture = Gesture::Idle;
            }
            _ => {}
        }
    }

    fn drag_volume(&mut self, x: f64) {
        let (area, is_video) = match self.gesture {
            Gesture::AudioVolume => (self.areas.audio_volume, false),
            Gesture::VideoVolume => (self.areas.video_volume, true),
            _ => return,
        };
        let track = TrackGeometry {
            start: area.x as f64,
            length: area.width as f64,
        };
        let volume = volume_from_pointer(x, track, Orientation::Horizontal);
        if is_video {
            self.video.set_volume(volume);
        } else {
            self.audio.set_volume(volume);
        }
    }
}

fn control_for_key(key: KeyCode) -> Option<Control> {
    let control = match key {
        KeyCode::Char(' ') => Control::PlayPause,
        KeyCode::Char('n') => Control::Next,
        KeyCode::Char('p') => Control::Previous,
        KeyCode::Char('r') => Control::Repeat,
        KeyCode::Char('m') => Control::Mute,
        KeyCode::Char('v') => Control::VideoPause,
        KeyCode::Char('[') => Control::VideoPrevious,
        KeyCode::Char(']') => Control::VideoNext,
        KeyCode::Char('M') => Control::VideoMute,
        _ => return None,
    };
    Some(control)
}

fn control_slot(control: Control) -> usize {
    CONTROLS
        .iter()
        .position(|c| *c == control)
        .unwrap_or_default()
}

// Every step is attempted even if an earlier one fails, so the shell is
// left as usable as possible.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    if let Err(err) = disable_raw_mode() {
        tracing::error!(error = %err, "failed to leave raw mode");
    }
    if let Err(err) = execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture) {
        tracing::error!(error = %err, "failed to leave alternate screen");
    }
    if let Err(err) = terminal.show_cursor() {
        tracing::error!(error = %err, "failed to show cursor");
    }
}

// One rect per button, left to right, as `control_line` draws them.
fn layout_controls(area: Rect, buttons: &[(Control, &'static str)]) -> Vec<(Control, Rect)> {
    let right = area.x.saturating_add(area.width);
    let mut x = area.x;
    buttons
        .iter()
        .map(|(control, label)| {
            let width = Span::raw(*label).width() as u16;
            let visible = width.min(right.saturating_sub(x));
            let rect = Rect::new(x, area.y, visible, area.height.min(1));
            x = x.saturating_add(width).saturating_add(CONTROL_GAP);
            (*control, rect)
        })
        .collect()
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.x + area.width && row >= area.y && row < area.y + area.height
}

fn phase_symbol(phase: PlaybackPhase) -> &'static str {
    match phase {
        PlaybackPhase::Idle => "⏹",
        PlaybackPhase::Loading => "…",
        PlaybackPhase::Playing => "▶",
        PlaybackPhase::Paused => "⏸",
    }
}

fn volume_icon(muted: bool, volume: f64) -> &'static str {
    if muted || volume == 0.0 {
        "🔇 m"
    } else if volume <= 0.33 {
        "🔈 m"
    } else if volume <= 0.66 {
        "🔉 m"
    } else {
        "🔊 m"
    }
}

fn volume_gauge(volume: f64) -> Gauge<'static> {
    Gauge::default()
        .gauge_style(Style::default().fg(Color::Gray).bg(Color::Black))
        .ratio(volume.clamp(0.0, 1.0))
        .label(format!("{:>3}%", (volume * 100.0).round() as u32))
}

fn track_line(track: &Track) -> Line<'static> {
    let initial = track.title.chars().next().unwrap_or('?');
    Line::from(vec![
        Span::styled(format!("[{}] ", initial), Style::default().fg(Color::Magenta)),
        Span::styled(track.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" — "),
        Span::raw(
            track
                .artist
                .clone()
                .unwrap_or_else(|| "Unknown artist".to_string()),
        ),
    ])
}

/// `m:ss`; anything that is not a finite, non-negative time shows `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let total = seconds as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_pads_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(9.9), "0:09");
        assert_eq!(format_time(61.0), "1:01");
        assert_eq!(format_time(3725.0), "62:05");
    }

    #[test]
    fn format_time_guards_bad_input() {
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
        assert_eq!(format_time(-4.0), "0:00");
    }

    #[test]
    fn volume_icon_tracks_levels() {
        assert_eq!(volume_icon(true, 0.9), "🔇 m");
        assert_eq!(volume_icon(false, 0.0), "🔇 m");
        assert_eq!(volume_icon(false, 0.2), "🔈 m");
        assert_eq!(volume_icon(false, 0.5), "🔉 m");
        assert_eq!(volume_icon(false, 0.9), "🔊 m");
    }

    #[test]
    fn hit_test_is_half_open() {
        let area = Rect::new(2, 3, 4, 1);
        assert!(contains(area, 2, 3));
        assert!(contains(area, 5, 3));
        assert!(!contains(area, 6, 3));
        assert!(!contains(area, 2, 4));
    }

    #[test]
    fn control_rects_follow_label_widths() {
        let buttons = [(Control::Previous, "⏮ p"), (Control::PlayPause, "▶ Space"), (Control::Next, "n ⏭")];
        let rects = layout_controls(Rect::new(10, 4, 40, 1), &buttons);
        assert_eq!(rects[0], (Control::Previous, Rect::new(10, 4, 3, 1)));
        assert_eq!(rects[1], (Control::PlayPause, Rect::new(15, 4, 7, 1)));
        assert_eq!(rects[2], (Control::Next, Rect::new(24, 4, 3, 1)));
    }

    #[test]
    fn control_rects_are_clipped_to_the_row() {
        let buttons = [(Control::Repeat, "🔁 r (on)"), (Control::Mute, "🔊 m")];
        let rects = layout_controls(Rect::new(0, 0, 6, 1), &buttons);
        assert_eq!(rects[0].1.width, 6);
        assert_eq!(rects[1].1.width, 0);
    }

    #[test]
    fn pointer_finds_the_button_under_it() {
        let mut areas = HitAreas::default();
        let buttons = [(Control::VideoPrevious, "⏮ ["), (Control::VideoPause, "⏸ v")];
        for (control, rect) in layout_controls(Rect::new(0, 2, 30, 1), &buttons) {
            areas.controls[control_slot(control)] = rect;
        }
        assert_eq!(areas.control_at(0, 2), Some(Control::VideoPrevious));
        assert_eq!(areas.control_at(3, 2), None);
        assert_eq!(areas.control_at(5, 2), Some(Control::VideoPause));
        assert_eq!(areas.control_at(5, 3), None);
    }

    #[test]
    fn shortcuts_map_onto_buttons() {
        assert_eq!(control_for_key(KeyCode::Char(' ')), Some(Control::PlayPause));
        assert_eq!(control_for_key(KeyCode::Char('M')), Some(Control::VideoMute));
        assert_eq!(control_for_key(KeyCode::Char('q')), None);
        assert_eq!(control_for_key(KeyCode::Up), None);
    }

    #[test]
    fn every_control_has_its_own_slot() {
        let mut slots: Vec<usize> = CONTROLS.iter().map(|c| control_slot(*c)).collect();
        slots.sort_unstable();
        slots.dedup();
        assert_eq!(slots.len(), CONTROLS.len());
    }
}
