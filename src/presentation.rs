//! Presentation mode manager: fullscreen entry/exit and post-transition reconciliation.

use crate::fullscreen::{FullscreenApi, FullscreenHost, PresentationMode};
use crate::motion::{FrameTicket, MotionController};
use crate::surface::TickerSurface;
use crate::TickerError;

/// Result of [`PresentationManager::toggle`].
///
/// Native requests are asynchronous in the browser, so the manager hands
/// them back to the caller instead of performing them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleStep {
    /// The transition completed synchronously. Carries a new frame ticket
    /// when playback was re-armed.
    Settled(Option<FrameTicket>),
    /// Request native fullscreen with this variant, then report the result
    /// through `native_enter_succeeded` or `native_enter_failed`.
    EnterNative(FullscreenApi),
    /// Leave native fullscreen with this variant. The browser's change
    /// notification drives reconciliation.
    ExitNative(FullscreenApi),
}

/// Tracks the presentation mode and keeps the motion controller in sync
/// with it.
///
/// Every transition ends in [`PresentationManager::sync_after_mode_change`],
/// which is idempotent: the native entry path runs it once on success and
/// again when the browser's change notification arrives.
#[derive(Clone, Debug, Default)]
pub struct PresentationManager {
    mode: PresentationMode,
    /// Variant used for the last native entry
    native_api: Option<FullscreenApi>,
}

impl PresentationManager {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    /// Single entry point for the toggle button, double-click and `F`.
    pub fn toggle<H, S>(
        &mut self,
        host: &mut H,
        motion: &mut MotionController<S>,
        now_ms: f64,
    ) -> ToggleStep
    where
        H: FullscreenHost,
        S: TickerSurface,
    {
        if self.mode == PresentationMode::PseudoFullscreen {
            return ToggleStep::Settled(self.exit_pseudo(host, motion, now_ms));
        }

        // The browser is the authority on native fullscreen
        let native_active = host.native_active();
        if self.mode == PresentationMode::NativeFullscreen && !native_active {
            log::info!("native fullscreen no longer active, treating as windowed");
            self.mode = PresentationMode::Windowed;
        }

        if native_active {
            let api = self
                .native_api
                .or_else(|| host.detect_native())
                .unwrap_or(FullscreenApi::Standard);
            return ToggleStep::ExitNative(api);
        }

        match host.detect_native() {
            Some(api) => {
                self.native_api = Some(api);
                ToggleStep::EnterNative(api)
            }
            None => {
                log::info!("native fullscreen unavailable, using CSS fallback");
                ToggleStep::Settled(self.enter_pseudo(host, motion, now_ms))
            }
        }
    }

    /// The native request resolved.
    pub fn native_enter_succeeded<H, S>(
        &mut self,
        host: &mut H,
        motion: &mut MotionController<S>,
        now_ms: f64,
    ) -> Option<FrameTicket>
    where
        H: FullscreenHost,
        S: TickerSurface,
    {
        self.mode = PresentationMode::NativeFullscreen;
        self.sync_after_mode_change(host, motion, now_ms)
    }

    /// The native request was rejected: fall back to the CSS mode.
    pub fn native_enter_failed<H, S>(
        &mut self,
        host: &mut H,
        motion: &mut MotionController<S>,
        now_ms: f64,
        error: &TickerError,
    ) -> Option<FrameTicket>
    where
        H: FullscreenHost,
        S: TickerSurface,
    {
        log::warn!("native fullscreen failed ({error}), using CSS fallback");
        self.enter_pseudo(host, motion, now_ms)
    }

    /// Browser fullscreen change notification, any vendor variant.
    ///
    /// Ignored while the CSS fallback is active.
    pub fn on_native_change<H, S>(
        &mut self,
        host: &mut H,
        motion: &mut MotionController<S>,
        now_ms: f64,
        is_fullscreen: bool,
    ) -> Option<FrameTicket>
    where
        H: FullscreenHost,
        S: TickerSurface,
    {
        if self.mode == PresentationMode::PseudoFullscreen {
            log::debug!("ignoring native fullscreen change while in CSS fallback");
            return None;
        }
        self.mode = if is_fullscreen {
            PresentationMode::NativeFullscreen
        } else {
            PresentationMode::Windowed
        };
        self.sync_after_mode_change(host, motion, now_ms)
    }

    /// Escape key. Only the CSS fallback needs handling; the browser
    /// leaves native fullscreen on its own.
    pub fn on_escape<H, S>(
        &mut self,
        host: &mut H,
        motion: &mut MotionController<S>,
        now_ms: f64,
    ) -> Option<FrameTicket>
    where
        H: FullscreenHost,
        S: TickerSurface,
    {
        if self.mode == PresentationMode::PseudoFullscreen {
            self.exit_pseudo(host, motion, now_ms)
        } else {
            None
        }
    }

    /// Apply the marker and label for the current mode, then re-measure
    /// and restart the ticker from offscreen-right.
    pub fn sync_after_mode_change<H, S>(
        &mut self,
        host: &mut H,
        motion: &mut MotionController<S>,
        now_ms: f64,
    ) -> Option<FrameTicket>
    where
        H: FullscreenHost,
        S: TickerSurface,
    {
        host.show_mode(self.mode);
        let labels = &motion.settings().labels;
        if self.mode.is_fullscreen() {
            host.set_toggle_label(&labels.fullscreen_exit);
        } else {
            host.set_toggle_label(&labels.fullscreen_enter);
        }
        log::info!("presentation mode: {:?}", self.mode);
        motion.relayout(now_ms)
    }

    fn enter_pseudo<H, S>(
        &mut self,
        host: &mut H,
        motion: &mut MotionController<S>,
        now_ms: f64,
    ) -> Option<FrameTicket>
    where
        H: FullscreenHost,
        S: TickerSurface,
    {
        self.mode = PresentationMode::PseudoFullscreen;
        self.sync_after_mode_change(host, motion, now_ms)
    }

    fn exit_pseudo<H, S>(
        &mut self,
        host: &mut H,
        motion: &mut MotionController<S>,
        now_ms: f64,
    ) -> Option<FrameTicket>
    where
        H: FullscreenHost,
        S: TickerSurface,
    {
        self.mode = PresentationMode::Windowed;
        self.sync_after_mode_change(host, motion, now_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::FrameOutcome;
    use crate::surface::Geometry;
    use crate::testing::{FakeHost, FakeSurface};
    use crate::TickerSettings;

    fn motion() -> MotionController<FakeSurface> {
        let mut motion = MotionController::new(
            FakeSurface::new(Geometry::new(1000.0, 500.0)),
            TickerSettings::default(),
        );
        motion.set_text("news");
        motion.reset_position();
        motion
    }

    #[test]
    fn test_toggle_without_native_uses_pseudo_and_back() {
        let mut host = FakeHost::without_native();
        let mut motion = motion();
        let mut manager = PresentationManager::new();

        let step = manager.toggle(&mut host, &mut motion, 0.0);
        assert_eq!(step, ToggleStep::Settled(None));
        assert_eq!(manager.mode(), PresentationMode::PseudoFullscreen);
        assert_eq!(host.shown, Some(PresentationMode::PseudoFullscreen));
        assert_eq!(host.label, "⤢ Exit fullscreen");

        let step = manager.toggle(&mut host, &mut motion, 10.0);
        assert_eq!(step, ToggleStep::Settled(None));
        assert_eq!(manager.mode(), PresentationMode::Windowed);
        assert_eq!(host.shown, Some(PresentationMode::Windowed));
        assert_eq!(host.label, "⛶ Fullscreen");
    }

    #[test]
    fn test_native_entry_and_change_notification() {
        let mut host = FakeHost::with_native(FullscreenApi::Webkit);
        let mut motion = motion();
        let mut manager = PresentationManager::new();

        let step = manager.toggle(&mut host, &mut motion, 0.0);
        assert_eq!(step, ToggleStep::EnterNative(FullscreenApi::Webkit));
        // nothing changes until the request resolves
        assert_eq!(manager.mode(), PresentationMode::Windowed);
        assert_eq!(host.show_count, 0);

        host.native_active = true;
        manager.native_enter_succeeded(&mut host, &mut motion, 5.0);
        assert_eq!(manager.mode(), PresentationMode::NativeFullscreen);
        let label = host.label.clone();

        // the browser notification reconciles again with the same result
        manager.on_native_change(&mut host, &mut motion, 6.0, true);
        assert_eq!(manager.mode(), PresentationMode::NativeFullscreen);
        assert_eq!(host.shown, Some(PresentationMode::NativeFullscreen));
        assert_eq!(host.label, label);
        assert_eq!(host.show_count, 2);

        let step = manager.toggle(&mut host, &mut motion, 7.0);
        assert_eq!(step, ToggleStep::ExitNative(FullscreenApi::Webkit));

        host.native_active = false;
        manager.on_native_change(&mut host, &mut motion, 8.0, false);
        assert_eq!(manager.mode(), PresentationMode::Windowed);
        assert_eq!(host.label, "⛶ Fullscreen");
    }

    #[test]
    fn test_native_failure_falls_back_to_pseudo() {
        let mut host = FakeHost::with_native(FullscreenApi::Standard);
        let mut motion = motion();
        let mut manager = PresentationManager::new();

        assert!(matches!(
            manager.toggle(&mut host, &mut motion, 0.0),
            ToggleStep::EnterNative(_)
        ));
        let err = TickerError::FullscreenRejected("permission denied".into());
        manager.native_enter_failed(&mut host, &mut motion, 1.0, &err);

        assert_eq!(manager.mode(), PresentationMode::PseudoFullscreen);
        assert_eq!(host.shown, Some(PresentationMode::PseudoFullscreen));

        // next toggle leaves pseudo without touching the native API
        assert_eq!(manager.toggle(&mut host, &mut motion, 2.0), ToggleStep::Settled(None));
        assert_eq!(manager.mode(), PresentationMode::Windowed);
    }

    #[test]
    fn test_native_change_ignored_in_pseudo() {
        let mut host = FakeHost::without_native();
        let mut motion = motion();
        let mut manager = PresentationManager::new();
        manager.toggle(&mut host, &mut motion, 0.0);
        let shows = host.show_count;

        assert!(manager.on_native_change(&mut host, &mut motion, 1.0, false).is_none());
        assert_eq!(manager.mode(), PresentationMode::PseudoFullscreen);
        assert_eq!(host.show_count, shows);
    }

    #[test]
    fn test_escape() {
        let mut host = FakeHost::without_native();
        let mut motion = motion();
        let mut manager = PresentationManager::new();

        assert!(manager.on_escape(&mut host, &mut motion, 0.0).is_none());
        assert_eq!(host.show_count, 0);

        manager.toggle(&mut host, &mut motion, 0.0);
        manager.on_escape(&mut host, &mut motion, 1.0);
        assert_eq!(manager.mode(), PresentationMode::Windowed);
        assert_eq!(host.shown, Some(PresentationMode::Windowed));
    }

    #[test]
    fn test_externally_entered_native_is_exited() {
        let mut host = FakeHost::with_native(FullscreenApi::Moz);
        host.native_active = true;
        let mut motion = motion();
        let mut manager = PresentationManager::new();

        assert_eq!(
            manager.toggle(&mut host, &mut motion, 0.0),
            ToggleStep::ExitNative(FullscreenApi::Moz)
        );
    }

    #[test]
    fn test_native_entry_that_never_took_effect_is_recovered() {
        let mut host = FakeHost::with_native(FullscreenApi::Webkit);
        let mut motion = motion();
        let mut manager = PresentationManager::new();

        // a legacy request resolves without the browser going fullscreen
        manager.toggle(&mut host, &mut motion, 0.0);
        manager.native_enter_succeeded(&mut host, &mut motion, 1.0);
        assert_eq!(manager.mode(), PresentationMode::NativeFullscreen);
        assert!(!host.native_active);

        // the next toggle retries entry instead of exiting a mode the browser never entered
        let step = manager.toggle(&mut host, &mut motion, 2.0);
        assert_eq!(step, ToggleStep::EnterNative(FullscreenApi::Webkit));
        assert_eq!(manager.mode(), PresentationMode::Windowed);

        let err = TickerError::FullscreenRejected("not allowed".into());
        manager.native_enter_failed(&mut host, &mut motion, 3.0, &err);
        assert_eq!(manager.mode(), PresentationMode::PseudoFullscreen);

        manager.toggle(&mut host, &mut motion, 4.0);
        assert_eq!(manager.mode(), PresentationMode::Windowed);
        assert_eq!(host.shown, Some(PresentationMode::Windowed));
        assert_eq!(host.label, "⛶ Fullscreen");
    }

    #[test]
    fn test_marker_shows_one_mode_at_a_time() {
        let mut host = FakeHost::with_native(FullscreenApi::Standard);
        let mut motion = motion();
        let mut manager = PresentationManager::new();

        // failed native entry, then a stray native notification
        manager.toggle(&mut host, &mut motion, 0.0);
        let err = TickerError::FullscreenRejected("x".into());
        manager.native_enter_failed(&mut host, &mut motion, 1.0, &err);
        manager.on_native_change(&mut host, &mut motion, 2.0, true);
        assert_eq!(host.shown, Some(manager.mode()));
        assert_eq!(manager.mode(), PresentationMode::PseudoFullscreen);

        manager.toggle(&mut host, &mut motion, 3.0);
        assert_eq!(host.shown, Some(PresentationMode::Windowed));
    }

    #[test]
    fn test_mode_change_restarts_playback() {
        let mut host = FakeHost::without_native();
        let mut motion = motion();
        let mut manager = PresentationManager::new();

        let old = motion.play(0.0, "").unwrap();
        motion.frame_update(old, 1_000.0);
        assert!(motion.state().x < 1000.0);

        motion.surface_mut().geometry = Geometry::new(1920.0, 500.0);
        let step = manager.toggle(&mut host, &mut motion, 1_500.0);
        let ToggleStep::Settled(Some(ticket)) = step else {
            panic!("expected a re-armed frame chain");
        };
        assert_eq!(motion.state().x, 1920.0);
        assert_eq!(motion.state().last_timestamp, 1_500.0);
        assert_eq!(motion.frame_update(old, 1_600.0), FrameOutcome::Stop);
        assert_eq!(motion.frame_update(ticket, 1_600.0), FrameOutcome::Continue);
    }

    #[test]
    fn test_mode_change_while_paused_stays_paused() {
        let mut host = FakeHost::without_native();
        let mut motion = motion();
        let mut manager = PresentationManager::new();

        motion.set_position(123.0);
        assert_eq!(manager.toggle(&mut host, &mut motion, 0.0), ToggleStep::Settled(None));
        assert!(!motion.is_playing());
        assert_eq!(motion.state().x, 1000.0);
    }
}
