//! Browser bindings: mounts the ticker onto an existing page.
//!
//! The page supplies the elements named in [`ElementIds`](crate::ElementIds);
//! this module implements the core traits against them, wires the page's
//! events, and drives frames with `requestAnimationFrame`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use ticker_core_view::{web, TickerSettings};
//!
//! let handle = web::mount(TickerSettings::default())?;
//! // ... later, unwire everything:
//! handle.dispose();
//! ```

mod dom;
mod events;
mod frame;
mod native;
mod runtime;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;

pub use dom::{DomFullscreenHost, DomSurface};
pub use events::EventSubscription;

use crate::{MotionController, TickerError, TickerSettings};
use dom::Controls;
use frame::FrameLoop;
use runtime::{SharedRuntime, TickerRuntime};

/// A mounted ticker. Dropping or disposing it removes every listener and
/// stops the frame loop.
#[wasm_bindgen]
pub struct TickerHandle {
    runtime: SharedRuntime,
    subscriptions: Vec<EventSubscription>,
}

#[wasm_bindgen]
impl TickerHandle {
    pub fn play(&self) {
        self.runtime.borrow_mut().play();
    }

    pub fn pause(&self) {
        self.runtime.borrow_mut().pause();
    }

    pub fn reset(&self) {
        self.runtime.borrow_mut().reset();
    }

    #[wasm_bindgen(js_name = toggleFullscreen)]
    pub fn toggle_fullscreen(&self) {
        runtime::toggle_fullscreen(&self.runtime);
    }

    /// Unwire the ticker.
    pub fn dispose(self) {}
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.subscriptions.clear();
        if let Ok(mut runtime) = self.runtime.try_borrow_mut() {
            runtime.halt();
        }
        log::info!("ticker disposed");
    }
}

impl std::fmt::Debug for TickerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickerHandle")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

/// Mount the ticker onto the current document.
///
/// Fails if any required element is missing. The fullscreen toggle and
/// target are optional; without them the ticker mounts with fullscreen
/// disabled.
pub fn mount(settings: TickerSettings) -> Result<TickerHandle, TickerError> {
    let window = web_sys::window().ok_or(TickerError::NoWindow)?;
    let document = window.document().ok_or(TickerError::NoDocument)?;

    let controls = Controls::locate(&document, &settings.elements)?;
    let surface = DomSurface::locate(&document, &settings.elements)?;
    let classes = settings.classes.clone();
    let fullscreen = DomFullscreenHost::locate(&document, &settings.elements, classes)?;

    let runtime: SharedRuntime = Rc::new_cyclic(|weak: &Weak<RefCell<TickerRuntime>>| {
        let weak = weak.clone();
        let frames = FrameLoop::new(window.clone(), move |timestamp| {
            let Some(runtime) = weak.upgrade() else {
                return false;
            };
            let mut guard = runtime.borrow_mut();
            guard.on_frame(timestamp)
        });
        RefCell::new(TickerRuntime::new(
            window.clone(),
            MotionController::new(surface, settings),
            fullscreen,
            controls,
            frames,
        ))
    });

    runtime.borrow_mut().initialize();
    let subscriptions = runtime::wire(&runtime, &window, &document)?;
    log::info!("ticker mounted with {} listeners", subscriptions.len());

    Ok(TickerHandle {
        runtime,
        subscriptions,
    })
}

fn init_logging() {
    console_error_panic_hook::set_once();
    // a logger may already be installed by an earlier mount
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Mount with the stock page's settings.
#[wasm_bindgen(js_name = mountTicker)]
pub fn mount_ticker() -> Result<TickerHandle, JsValue> {
    init_logging();
    mount(TickerSettings::default()).map_err(JsValue::from)
}

/// Mount with settings read from a TOML document.
#[cfg(feature = "toml")]
#[wasm_bindgen(js_name = mountTickerWithConfig)]
pub fn mount_ticker_with_config(config: &str) -> Result<TickerHandle, JsValue> {
    init_logging();
    let settings = TickerSettings::from_toml_str(config)
        .map_err(|err| JsValue::from_str(&format!("invalid ticker config: {err}")))?;
    mount(settings).map_err(JsValue::from)
}
