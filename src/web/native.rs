//! Fullscreen API calls resolved by name, covering vendor-prefixed variants.
//!
//! `web-sys` only binds the unprefixed API (and types `requestFullscreen`
//! as returning nothing), so methods are looked up with `Reflect` and any
//! returned promise is awaited separately.

use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Document;

use super::dom::describe_js;
use crate::{FullscreenApi, TickerError};

/// Whether `target[name]` is callable.
pub(crate) fn has_method(target: &JsValue, name: &str) -> bool {
    Reflect::get(target, &JsValue::from_str(name))
        .map(|value| value.is_function())
        .unwrap_or(false)
}

/// Whether any variant reports a current fullscreen element.
pub(crate) fn element_present(document: &Document) -> bool {
    FullscreenApi::ALL.iter().any(|api| {
        Reflect::get(document, &JsValue::from_str(api.element_property()))
            .map(|value| !value.is_null() && !value.is_undefined())
            .unwrap_or(false)
    })
}

/// Issue the request synchronously, inside the user gesture.
///
/// Returns the promise to await, or `None` for variants that return nothing.
pub(crate) fn start_request(
    target: &JsValue,
    api: FullscreenApi,
) -> Result<Option<Promise>, TickerError> {
    invoke(target, api.request_method())
}

/// Issue an exit on the document.
pub(crate) fn start_exit(
    document: &Document,
    api: FullscreenApi,
) -> Result<Option<Promise>, TickerError> {
    invoke(document, api.exit_method())
}

/// Wait for a request started by [`start_request`] or [`start_exit`].
pub(crate) async fn settle(pending: Option<Promise>) -> Result<(), TickerError> {
    let Some(promise) = pending else {
        return Ok(());
    };
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|err| TickerError::FullscreenRejected(describe_js(&err)))
}

fn invoke(this: &JsValue, method: &'static str) -> Result<Option<Promise>, TickerError> {
    let function = Reflect::get(this, &JsValue::from_str(method))
        .map_err(|err| TickerError::Js(describe_js(&err)))?
        .dyn_into::<Function>()
        .map_err(|_| TickerError::FullscreenUnsupported(method))?;

    let returned = function
        .call0(this)
        .map_err(|err| TickerError::FullscreenRejected(describe_js(&err)))?;
    Ok(returned.dyn_into::<Promise>().ok())
}
