//! Motion controller: play/pause/reset state machine and per-frame scrolling.

use crate::input::{normalize_text, parse_number};
use crate::surface::TickerSurface;
use crate::TickerSettings;

/// Playback status of the ticker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Playback {
    /// Never started, or reset
    #[default]
    Stopped,
    /// Frames are being applied
    Playing,
    /// Held at the current position
    Paused,
}

/// Snapshot of the animation state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    pub playback: Playback,
    /// Signed horizontal rate; positive scrolls right-to-left
    pub speed_px_per_sec: f64,
    /// Current horizontal offset relative to the untranslated position
    pub x: f64,
    /// Timestamp (ms) of the previous frame
    pub last_timestamp: f64,
    /// Cached at the last measurement
    pub viewport_width: f64,
    /// Cached at the last measurement
    pub text_width: f64,
}

impl AnimationState {
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playback == Playback::Playing
    }
}

/// Identifies one frame chain.
///
/// Each chain started by the controller gets a fresh ticket, and only the
/// most recent one is honoured by [`MotionController::frame_update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTicket(u64);

/// What the driver should do after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Schedule another frame with the same ticket
    Continue,
    /// Drop the chain
    Stop,
}

/// Drives right-to-left scrolling of a text element across a viewport.
///
/// The controller does not own a clock or a frame scheduler. Operations that
/// start a frame chain return a [`FrameTicket`]; the caller schedules display
/// refresh callbacks and passes each timestamp to `frame_update` until it
/// answers [`FrameOutcome::Stop`].
///
/// ## Example
///
/// ```rust,ignore
/// let mut motion = MotionController::new(surface, TickerSettings::default());
/// motion.set_text("Breaking news");
/// motion.reset_position();
///
/// if let Some(ticket) = motion.play(now_ms, "") {
///     // from requestAnimationFrame:
///     while motion.frame_update(ticket, next_timestamp()) == FrameOutcome::Continue {}
/// }
/// ```
#[derive(Debug)]
pub struct MotionController<S: TickerSurface> {
    surface: S,
    settings: TickerSettings,
    state: AnimationState,
    /// Ticket of the live chain, if any
    armed: Option<FrameTicket>,
    next_ticket: u64,
}

impl<S: TickerSurface> MotionController<S> {
    /// Create a stopped controller rendering into `surface`.
    pub fn new(surface: S, settings: TickerSettings) -> Self {
        let speed = settings.default_speed_px_per_sec;
        Self {
            surface,
            settings,
            state: AnimationState {
                playback: Playback::Stopped,
                speed_px_per_sec: speed,
                x: 0.0,
                last_timestamp: 0.0,
                viewport_width: 0.0,
                text_width: 0.0,
            },
            armed: None,
            next_ticket: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    #[inline]
    pub fn settings(&self) -> &TickerSettings {
        &self.settings
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[cfg(test)]
    pub(crate) fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Apply a font size, clamped to the configured limits.
    ///
    /// Returns the applied size. Does not re-measure.
    pub fn set_font_size(&mut self, px: f64) -> f64 {
        let size = self.settings.font.apply(px);
        self.surface.apply_font_size(size);
        size
    }

    /// Render trimmed text, or the placeholder prompt when blank.
    pub fn set_text(&mut self, text: &str) {
        let content = normalize_text(text, &self.settings.labels.placeholder);
        self.surface.set_content(&content);
    }

    /// Neutralise the transform and capture viewport and text widths.
    pub fn measure(&mut self) {
        self.surface.apply_offset(0.0);
        let geometry = self.surface.measure();
        self.state.viewport_width = geometry.viewport_width;
        self.state.text_width = geometry.text_width;
        log::debug!(
            "measured viewport={}px text={}px",
            geometry.viewport_width,
            geometry.text_width
        );
    }

    /// Write `x` to the state and to the element transform.
    pub fn set_position(&mut self, x: f64) {
        self.state.x = x;
        self.surface.apply_offset(x);
    }

    /// Re-measure and park the text just past the right edge.
    pub fn reset_position(&mut self) {
        self.measure();
        self.set_position(self.state.viewport_width);
    }

    /// Advance one display frame.
    ///
    /// Stale tickets and frames arriving while not playing are ignored
    /// without touching the state.
    pub fn frame_update(&mut self, ticket: FrameTicket, timestamp: f64) -> FrameOutcome {
        if !self.is_playing() || self.armed != Some(ticket) {
            return FrameOutcome::Stop;
        }

        let elapsed = ((timestamp - self.state.last_timestamp) / 1000.0).max(0.0);
        self.state.last_timestamp = self.state.last_timestamp.max(timestamp);

        let mut next = self.state.x - self.state.speed_px_per_sec * elapsed;
        if next < -self.state.text_width {
            next = self.state.viewport_width;
        }
        self.set_position(next);

        FrameOutcome::Continue
    }

    /// Start or resume scrolling.
    ///
    /// `fallback_text` is rendered first if the surface is empty. Returns the
    /// ticket for the new frame chain, or `None` if already playing.
    pub fn play(&mut self, now_ms: f64, fallback_text: &str) -> Option<FrameTicket> {
        if self.is_playing() {
            return None;
        }
        if !self.surface.has_content() {
            self.set_text(fallback_text);
        }
        self.measure();

        if self.state.x.is_nan() || self.state.x == 0.0 {
            self.set_position(self.state.viewport_width);
        } else {
            self.set_position(self.state.x);
        }

        self.state.playback = Playback::Playing;
        Some(self.arm(now_ms))
    }

    /// Hold at the current position.
    pub fn pause(&mut self) {
        if self.is_playing() {
            self.state.playback = Playback::Paused;
        }
        self.armed = None;
    }

    /// Stop and park offscreen-right.
    pub fn reset(&mut self) {
        self.state.playback = Playback::Stopped;
        self.armed = None;
        self.reset_position();
    }

    /// Live speed update from a numeric value.
    pub fn on_speed_changed(&mut self, px_per_sec: f64) -> f64 {
        let speed = self.settings.resolve_speed(px_per_sec);
        self.state.speed_px_per_sec = speed;
        speed
    }

    /// Live speed update from the raw control value.
    pub fn on_speed_input(&mut self, raw: &str) -> f64 {
        self.on_speed_changed(parse_number(raw))
    }

    /// Live font size update from the raw control value.
    ///
    /// Re-measures, then restores the current offset. `x` is not adjusted
    /// for the width change, so the text may jump.
    pub fn on_font_size_changed(&mut self, raw: &str) -> f64 {
        let size = self.set_font_size(parse_number(raw));
        self.measure();
        self.set_position(self.state.x);
        size
    }

    /// Window resize: re-measure and restart from offscreen-right.
    ///
    /// Returns a new ticket if the ticker was playing.
    pub fn on_resize(&mut self, now_ms: f64) -> Option<FrameTicket> {
        self.relayout(now_ms)
    }

    /// Re-measure after a layout change and re-arm the frame loop if playing.
    ///
    /// Older frame chains are invalidated either way.
    pub fn relayout(&mut self, now_ms: f64) -> Option<FrameTicket> {
        let was_playing = self.is_playing();
        self.armed = None;
        self.reset_position();
        if was_playing {
            Some(self.arm(now_ms))
        } else {
            None
        }
    }

    fn arm(&mut self, now_ms: f64) -> FrameTicket {
        self.next_ticket += 1;
        let ticket = FrameTicket(self.next_ticket);
        self.armed = Some(ticket);
        self.state.last_timestamp = now_ms;
        ticket
    }
}
