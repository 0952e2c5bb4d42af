//! Error type shared by the core and the web bindings.

use thiserror::Error;

/// Errors raised while mounting the ticker or talking to the Fullscreen API.
///
/// Malformed numeric input is never an error: it is substituted with a
/// clamped default at the input layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TickerError {
    /// No global `window` (not running in a browser main thread)
    #[error("no browser window available")]
    NoWindow,
    /// The window has no document
    #[error("window has no document")]
    NoDocument,
    /// The document has no `<body>`
    #[error("document has no body")]
    NoBody,
    /// A required element id is absent from the page
    #[error("element `#{0}` not found")]
    MissingElement(String),
    /// An element exists but is not of the expected kind
    #[error("element `#{id}` is not an {expected}")]
    WrongElementType { id: String, expected: &'static str },
    /// The named fullscreen variant has no callable method on this element
    #[error("fullscreen method `{0}` is not available")]
    FullscreenUnsupported(&'static str),
    /// The browser rejected a fullscreen request
    #[error("fullscreen request rejected: {0}")]
    FullscreenRejected(String),
    /// Any other JavaScript exception
    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(feature = "web")]
impl From<TickerError> for wasm_bindgen::JsValue {
    fn from(err: TickerError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_element() {
        let err = TickerError::MissingElement("viewport".into());
        assert_eq!(err.to_string(), "element `#viewport` not found");

        let err = TickerError::WrongElementType {
            id: "speed".into(),
            expected: "input element",
        };
        assert_eq!(err.to_string(), "element `#speed` is not an input element");
    }
}
