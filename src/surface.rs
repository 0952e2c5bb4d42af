//! Render target abstraction and geometry measurement.

/// Rendered geometry of the ticker, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Geometry {
    /// Visible width of the clipping container
    pub viewport_width: f64,
    /// Intrinsic width of the single-line text
    pub text_width: f64,
}

impl Geometry {
    /// Build a geometry reading, flooring negative or NaN widths to zero.
    pub fn new(viewport_width: f64, text_width: f64) -> Self {
        Self {
            viewport_width: non_negative(viewport_width),
            text_width: non_negative(text_width),
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}

/// The element the ticker draws into.
///
/// Implement this for your rendering backend. The motion controller only
/// ever reads geometry through [`TickerSurface::measure`] and writes
/// position through [`TickerSurface::apply_offset`]; it never derives
/// widths analytically.
///
/// No `Send` bounds: DOM handles are single-threaded.
pub trait TickerSurface {
    /// Query the current rendered widths.
    fn measure(&self) -> Geometry;

    /// Translate the text horizontally by `x` pixels, keeping it vertically centered.
    fn apply_offset(&mut self, x: f64);

    /// Set the rendered font size in pixels.
    fn apply_font_size(&mut self, px: f64);

    /// Replace the rendered text.
    fn set_content(&mut self, text: &str);

    /// Whether any text is currently rendered.
    fn has_content(&self) -> bool;
}

/// CSS `transform` value for a horizontal offset.
///
/// ```rust
/// assert_eq!(
///     ticker_core_view::surface::transform_css(-12.5),
///     "translateX(-12.5px) translateY(-50%)"
/// );
/// ```
pub fn transform_css(x: f64) -> String {
    format!("translateX({x}px) translateY(-50%)")
}

/// CSS `font-size` value.
pub fn font_size_css(px: f64) -> String {
    format!("{px}px")
}
