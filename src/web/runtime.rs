//! Shared ticker state and the handlers bound to page events.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventTarget, HtmlElement, HtmlInputElement, KeyboardEvent, Window};

use super::dom::{describe_js, Controls, DomFullscreenHost, DomSurface};
use super::events::EventSubscription;
use super::frame::FrameLoop;
use super::native;
use crate::input::{parse_number, KeyCommand};
use crate::{
    FrameOutcome, FrameTicket, FullscreenApi, FullscreenHost, MotionController,
    PresentationManager, TickerError, ToggleStep,
};

pub(crate) type SharedRuntime = Rc<RefCell<TickerRuntime>>;

/// Native fullscreen call awaiting its promise.
enum PendingNative {
    Enter(Option<js_sys::Promise>),
    Exit(Option<js_sys::Promise>),
}

pub(crate) struct TickerRuntime {
    window: Window,
    motion: MotionController<DomSurface>,
    presentation: PresentationManager,
    fullscreen: Option<DomFullscreenHost>,
    controls: Controls,
    frames: FrameLoop,
    /// Ticket carried by the frame loop
    active: Option<FrameTicket>,
}

impl TickerRuntime {
    pub fn new(
        window: Window,
        motion: MotionController<DomSurface>,
        fullscreen: Option<DomFullscreenHost>,
        controls: Controls,
        frames: FrameLoop,
    ) -> Self {
        Self {
            window,
            motion,
            presentation: PresentationManager::new(),
            fullscreen,
            controls,
            frames,
            active: None,
        }
    }

    fn now(&self) -> f64 {
        self.window
            .performance()
            .map_or_else(js_sys::Date::now, |performance| performance.now())
    }

    /// Apply the controls' current values and park the text offscreen-right.
    pub fn initialize(&mut self) {
        self.motion.set_font_size(parse_number(&self.controls.font_size.value()));
        self.motion.set_text(&self.controls.text_input.value());
        self.motion.reset_position();
        self.speed_input();
        if let Some(host) = self.fullscreen.as_mut() {
            host.set_toggle_label(&self.motion.settings().labels.fullscreen_enter);
        }
    }

    pub fn on_frame(&mut self, timestamp: f64) -> bool {
        let Some(ticket) = self.active else {
            return false;
        };
        match self.motion.frame_update(ticket, timestamp) {
            FrameOutcome::Continue => true,
            FrameOutcome::Stop => {
                self.active = None;
                false
            }
        }
    }

    fn run(&mut self, ticket: FrameTicket) {
        self.active = Some(ticket);
        self.frames.start();
    }

    pub fn halt(&mut self) {
        self.active = None;
        self.frames.cancel();
    }

    /// Follow up on a relayout: start the new chain, or stop if paused.
    fn rearm(&mut self, ticket: Option<FrameTicket>) {
        match ticket {
            Some(ticket) => self.run(ticket),
            None if !self.motion.is_playing() => self.halt(),
            None => {}
        }
    }

    pub fn apply_text(&mut self) {
        self.motion.set_text(&self.controls.text_input.value());
        self.motion.reset_position();
    }

    pub fn play(&mut self) {
        let now = self.now();
        let fallback = self.controls.text_input.value();
        if let Some(ticket) = self.motion.play(now, &fallback) {
            self.run(ticket);
        }
    }

    pub fn pause(&mut self) {
        self.motion.pause();
        self.halt();
    }

    pub fn reset(&mut self) {
        self.motion.reset();
        self.halt();
    }

    pub fn speed_input(&mut self) {
        let applied = self.motion.on_speed_input(&self.controls.speed.value());
        self.controls
            .speed_readout
            .set_text_content(Some(&applied.to_string()));
    }

    pub fn font_size_input(&mut self) {
        self.motion.on_font_size_changed(&self.controls.font_size.value());
    }

    pub fn resize(&mut self) {
        let now = self.now();
        let ticket = self.motion.on_resize(now);
        self.rearm(ticket);
    }

    pub fn escape(&mut self) {
        let now = self.now();
        let Some(host) = self.fullscreen.as_mut() else {
            return;
        };
        let ticket = self.presentation.on_escape(host, &mut self.motion, now);
        self.rearm(ticket);
    }

    pub fn native_changed(&mut self) {
        let now = self.now();
        let Some(host) = self.fullscreen.as_mut() else {
            return;
        };
        let is_fullscreen = host.native_active();
        let ticket = self
            .presentation
            .on_native_change(host, &mut self.motion, now, is_fullscreen);
        self.rearm(ticket);
    }

    fn begin_toggle(&mut self) -> Option<PendingNative> {
        let now = self.now();
        let host = self.fullscreen.as_mut()?;
        match self.presentation.toggle(host, &mut self.motion, now) {
            ToggleStep::Settled(ticket) => {
                self.rearm(ticket);
                None
            }
            ToggleStep::EnterNative(api) => match native::start_request(host.target(), api) {
                Ok(pending) => Some(PendingNative::Enter(pending)),
                Err(err) => {
                    self.fullscreen_failed(&err);
                    None
                }
            },
            ToggleStep::ExitNative(api) => match native::start_exit(host.document(), api) {
                Ok(pending) => Some(PendingNative::Exit(pending)),
                Err(err) => {
                    log::warn!("failed to leave fullscreen: {err}");
                    None
                }
            },
        }
    }

    fn finish_native_enter(&mut self, result: Result<(), TickerError>) {
        match result {
            Ok(()) => {
                let now = self.now();
                let Some(host) = self.fullscreen.as_mut() else {
                    return;
                };
                if !host.native_active() {
                    // prefixed requests without a promise finish later
                    log::debug!("fullscreen request settled, waiting for change notification");
                    return;
                }
                let ticket = self
                    .presentation
                    .native_enter_succeeded(host, &mut self.motion, now);
                self.rearm(ticket);
            }
            Err(err) => self.fullscreen_failed(&err),
        }
    }

    fn fullscreen_failed(&mut self, err: &TickerError) {
        let now = self.now();
        let Some(host) = self.fullscreen.as_mut() else {
            return;
        };
        let ticket = self
            .presentation
            .native_enter_failed(host, &mut self.motion, now, err);
        self.rearm(ticket);

        let settings = self.motion.settings();
        if settings.alert_on_fullscreen_failure {
            let message = &settings.labels.fullscreen_failed;
            if let Err(alert_err) = self.window.alert_with_message(message) {
                log::warn!("alert failed: {}", describe_js(&alert_err));
            }
        }
    }
}

/// Toggle fullscreen, completing native requests asynchronously.
///
/// The runtime is not borrowed while a request is pending.
pub(crate) fn toggle_fullscreen(runtime: &SharedRuntime) {
    let pending = runtime.borrow_mut().begin_toggle();
    match pending {
        Some(PendingNative::Enter(promise)) => {
            let weak = Rc::downgrade(runtime);
            wasm_bindgen_futures::spawn_local(async move {
                let result = native::settle(promise).await;
                if let Some(runtime) = weak.upgrade() {
                    let mut runtime = runtime.borrow_mut();
                    runtime.finish_native_enter(result);
                }
            });
        }
        Some(PendingNative::Exit(promise)) => {
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = native::settle(promise).await {
                    log::warn!("failed to leave fullscreen: {err}");
                }
            });
        }
        None => {}
    }
}

/// Keys typed into text fields must not trigger shortcuts.
fn is_text_entry(target: Option<EventTarget>) -> bool {
    let Some(target) = target else {
        return false;
    };
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        return matches!(
            input.type_().as_str(),
            "text" | "search" | "email" | "url" | "tel" | "password"
        );
    }
    if target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some() {
        return true;
    }
    target
        .dyn_ref::<HtmlElement>()
        .is_some_and(|element| element.is_content_editable())
}

fn on<F>(
    target: &EventTarget,
    event: &str,
    runtime: &SharedRuntime,
    mut handler: F,
) -> Result<EventSubscription, TickerError>
where
    F: FnMut(&mut TickerRuntime) + 'static,
{
    let weak = Rc::downgrade(runtime);
    EventSubscription::listen(target, event, move |_event: Event| {
        if let Some(runtime) = weak.upgrade() {
            let mut guard = runtime.borrow_mut();
            handler(&mut *guard);
        }
    })
}

fn on_toggle(
    target: &EventTarget,
    event: &str,
    runtime: &SharedRuntime,
) -> Result<EventSubscription, TickerError> {
    let weak = Rc::downgrade(runtime);
    EventSubscription::listen(target, event, move |_event: Event| {
        if let Some(runtime) = weak.upgrade() {
            toggle_fullscreen(&runtime);
        }
    })
}

/// Register every page listener. Dropping the returned subscriptions
/// unwires the ticker.
pub(crate) fn wire(
    runtime: &SharedRuntime,
    window: &Window,
    document: &Document,
) -> Result<Vec<EventSubscription>, TickerError> {
    let rt = runtime.borrow();
    let controls = rt.controls.clone();
    let fullscreen = rt
        .fullscreen
        .as_ref()
        .map(|host| (host.toggle_button().clone(), host.target().clone()));
    drop(rt);

    let mut subscriptions = vec![
        on(&controls.speed, "input", runtime, TickerRuntime::speed_input)?,
        on(&controls.font_size, "input", runtime, TickerRuntime::font_size_input)?,
        on(&controls.apply, "click", runtime, TickerRuntime::apply_text)?,
        on(&controls.play, "click", runtime, TickerRuntime::play)?,
        on(&controls.pause, "click", runtime, TickerRuntime::pause)?,
        on(&controls.reset, "click", runtime, TickerRuntime::reset)?,
        on(window, "resize", runtime, TickerRuntime::resize)?,
    ];

    let Some((toggle_button, target)) = fullscreen else {
        return Ok(subscriptions);
    };

    subscriptions.push(on_toggle(&toggle_button, "click", runtime)?);
    subscriptions.push(on_toggle(&target, "dblclick", runtime)?);

    let weak = Rc::downgrade(runtime);
    subscriptions.push(EventSubscription::listen(document, "keydown", move |event: Event| {
        let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let modified = key_event.ctrl_key() || key_event.meta_key() || key_event.alt_key();
        if key_event.repeat() || modified {
            return;
        }
        let Some(runtime) = weak.upgrade() else {
            return;
        };
        match KeyCommand::from_key(&key_event.key()) {
            Some(KeyCommand::ToggleFullscreen) if !is_text_entry(event.target()) => {
                toggle_fullscreen(&runtime);
            }
            Some(KeyCommand::Escape) => {
                let mut runtime = runtime.borrow_mut();
                runtime.escape();
            }
            _ => {}
        }
    })?);

    for api in FullscreenApi::ALL {
        let event = api.change_event();
        subscriptions.push(on(document, event, runtime, TickerRuntime::native_changed)?);
    }

    Ok(subscriptions)
}
