//! DOM-backed implementations of the surface and fullscreen host traits.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, DomTokenList, HtmlElement, HtmlInputElement};

use super::native;
use crate::fullscreen::{FullscreenApi, FullscreenHost, PresentationMode};
use crate::surface::{font_size_css, transform_css, Geometry, TickerSurface};
use crate::{ElementIds, PageClasses, TickerError};

/// Best-effort text for a thrown JavaScript value.
pub(crate) fn describe_js(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}

/// Look up a required element and cast it.
pub(crate) fn require<T: JsCast>(
    document: &Document,
    id: &str,
    expected: &'static str,
) -> Result<T, TickerError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| TickerError::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| TickerError::WrongElementType {
            id: id.to_string(),
            expected,
        })
}

fn optional<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// The page's input controls.
#[derive(Clone, Debug)]
pub(crate) struct Controls {
    pub text_input: HtmlInputElement,
    pub speed: HtmlInputElement,
    pub speed_readout: HtmlElement,
    pub font_size: HtmlInputElement,
    pub apply: HtmlElement,
    pub play: HtmlElement,
    pub pause: HtmlElement,
    pub reset: HtmlElement,
}

impl Controls {
    pub fn locate(document: &Document, ids: &ElementIds) -> Result<Self, TickerError> {
        Ok(Self {
            text_input: require(document, &ids.text_input, "input element")?,
            speed: require(document, &ids.speed, "input element")?,
            speed_readout: require(document, &ids.speed_readout, "HTML element")?,
            font_size: require(document, &ids.font_size, "input element")?,
            apply: require(document, &ids.apply, "HTML element")?,
            play: require(document, &ids.play, "HTML element")?,
            pause: require(document, &ids.pause, "HTML element")?,
            reset: require(document, &ids.reset, "HTML element")?,
        })
    }
}

/// Text element inside its clipping viewport.
#[derive(Clone, Debug)]
pub struct DomSurface {
    viewport: HtmlElement,
    text: HtmlElement,
}

impl DomSurface {
    pub fn new(viewport: HtmlElement, text: HtmlElement) -> Self {
        Self { viewport, text }
    }

    pub(crate) fn locate(document: &Document, ids: &ElementIds) -> Result<Self, TickerError> {
        Ok(Self::new(
            require(document, &ids.viewport, "HTML element")?,
            require(document, &ids.text, "HTML element")?,
        ))
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Err(err) = self.text.style().set_property(property, value) {
            log::warn!("failed to set {property}: {}", describe_js(&err));
        }
    }
}

impl TickerSurface for DomSurface {
    fn measure(&self) -> Geometry {
        Geometry::new(
            f64::from(self.viewport.client_width()),
            f64::from(self.text.scroll_width()),
        )
    }

    fn apply_offset(&mut self, x: f64) {
        self.set_style("transform", &transform_css(x));
    }

    fn apply_font_size(&mut self, px: f64) {
        self.set_style("font-size", &font_size_css(px));
    }

    fn set_content(&mut self, text: &str) {
        self.text.set_text_content(Some(text));
    }

    fn has_content(&self) -> bool {
        self.text.text_content().is_some_and(|text| !text.is_empty())
    }
}

/// Document, body and fullscreen target of the page.
#[derive(Clone, Debug)]
pub struct DomFullscreenHost {
    document: Document,
    body: HtmlElement,
    target: HtmlElement,
    toggle_button: HtmlElement,
    classes: PageClasses,
}

impl DomFullscreenHost {
    /// Returns `Ok(None)` when the toggle button or target is missing, in
    /// which case the ticker runs without fullscreen support.
    pub(crate) fn locate(
        document: &Document,
        ids: &ElementIds,
        classes: PageClasses,
    ) -> Result<Option<Self>, TickerError> {
        let body = document.body().ok_or(TickerError::NoBody)?;
        let (Some(target), Some(toggle_button)) = (
            optional::<HtmlElement>(document, &ids.fullscreen_target),
            optional::<HtmlElement>(document, &ids.fullscreen_toggle),
        ) else {
            log::info!(
                "`#{}` or `#{}` not found, fullscreen disabled",
                ids.fullscreen_target,
                ids.fullscreen_toggle
            );
            return Ok(None);
        };

        Ok(Some(Self {
            document: document.clone(),
            body,
            target,
            toggle_button,
            classes,
        }))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn target(&self) -> &HtmlElement {
        &self.target
    }

    pub fn toggle_button(&self) -> &HtmlElement {
        &self.toggle_button
    }
}

fn set_class(list: &DomTokenList, class: &str, on: bool) {
    if let Err(err) = list.toggle_with_force(class, on) {
        log::warn!("failed to toggle class `{class}`: {}", describe_js(&err));
    }
}

impl FullscreenHost for DomFullscreenHost {
    fn detect_native(&self) -> Option<FullscreenApi> {
        FullscreenApi::detect(|name| native::has_method(&self.target, name))
    }

    fn native_active(&self) -> bool {
        native::element_present(&self.document)
    }

    fn show_mode(&mut self, mode: PresentationMode) {
        let list = self.body.class_list();
        set_class(&list, &self.classes.fullscreen, mode.is_fullscreen());
        set_class(&list, &self.classes.pseudo, mode == PresentationMode::PseudoFullscreen);

        let style = self.body.style();
        let result = if mode == PresentationMode::PseudoFullscreen {
            style.set_property("overflow", "hidden")
        } else {
            style.remove_property("overflow").map(|_| ())
        };
        if let Err(err) = result {
            log::warn!("failed to update body overflow: {}", describe_js(&err));
        }
    }

    fn set_toggle_label(&mut self, label: &str) {
        self.toggle_button.set_text_content(Some(label));
    }
}
