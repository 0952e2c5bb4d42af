//! `requestAnimationFrame` loop with explicit cancellation.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

use super::dom::describe_js;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A single reusable frame callback with at most one pending request.
///
/// The callback asks `on_frame` whether to continue and re-requests
/// itself while the answer is `true`.
pub(crate) struct FrameLoop {
    window: Window,
    callback: FrameCallback,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn new<F>(window: Window, mut on_frame: F) -> Self
    where
        F: FnMut(f64) -> bool + 'static,
    {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        // Weak so the closure does not keep itself alive
        let slot = Rc::downgrade(&callback);
        let pending_for_cb = Rc::clone(&pending);
        let window_for_cb = window.clone();
        let closure = Closure::wrap(Box::new(move |timestamp: f64| {
            pending_for_cb.set(None);
            if !on_frame(timestamp) {
                return;
            }
            let Some(slot) = slot.upgrade() else {
                return;
            };
            let guard = slot.borrow();
            if let Some(cb) = guard.as_ref() {
                match window_for_cb.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => pending_for_cb.set(Some(id)),
                    Err(err) => log::error!("requestAnimationFrame failed: {}", describe_js(&err)),
                }
            }
        }) as Box<dyn FnMut(f64)>);
        *callback.borrow_mut() = Some(closure);

        Self {
            window,
            callback,
            pending,
        }
    }

    /// Replace any pending request with a fresh one.
    pub fn start(&self) {
        self.cancel();
        let guard = self.callback.borrow();
        let Some(cb) = guard.as_ref() else {
            return;
        };
        match self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => self.pending.set(Some(id)),
            Err(err) => log::error!("requestAnimationFrame failed: {}", describe_js(&err)),
        }
    }

    /// Drop the pending request, if any.
    pub fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {}", describe_js(&err));
            }
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
