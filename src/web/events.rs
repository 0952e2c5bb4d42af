//! Event listener registration with deterministic teardown.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

use super::dom::describe_js;
use crate::TickerError;

/// A registered DOM event listener. Dropping it removes the listener.
pub struct EventSubscription {
    target: EventTarget,
    event: String,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventSubscription {
    pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<Self, TickerError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|err| TickerError::Js(describe_js(&err)))?;

        Ok(Self {
            target: target.clone(),
            event: event.to_string(),
            callback,
        })
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        let callback = self.callback.as_ref().unchecked_ref();
        if let Err(err) = self.target.remove_event_listener_with_callback(&self.event, callback) {
            log::warn!("failed to remove `{}` listener: {}", self.event, describe_js(&err));
        }
    }
}

impl std::fmt::Debug for EventSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSubscription").field("event", &self.event).finish()
    }
}
