//! Fullscreen mechanisms and the host interface used to drive them.

/// How the ticker is currently presented. Exactly one holds at any time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PresentationMode {
    #[default]
    Windowed,
    /// Browser-provided fullscreen through the Fullscreen API
    NativeFullscreen,
    /// CSS-only fallback
    PseudoFullscreen,
}

impl PresentationMode {
    /// True in either fullscreen mode.
    #[inline]
    pub fn is_fullscreen(self) -> bool {
        self != PresentationMode::Windowed
    }
}

/// One variant of the Fullscreen API, standard or vendor-prefixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FullscreenApi {
    Standard,
    Webkit,
    Moz,
    Ms,
}

impl FullscreenApi {
    /// Detection order: unprefixed first.
    pub const ALL: [FullscreenApi; 4] = [
        FullscreenApi::Standard,
        FullscreenApi::Webkit,
        FullscreenApi::Moz,
        FullscreenApi::Ms,
    ];

    /// Element method that requests fullscreen.
    pub fn request_method(self) -> &'static str {
        match self {
            FullscreenApi::Standard => "requestFullscreen",
            FullscreenApi::Webkit => "webkitRequestFullscreen",
            FullscreenApi::Moz => "mozRequestFullScreen",
            FullscreenApi::Ms => "msRequestFullscreen",
        }
    }

    /// Document method that leaves fullscreen.
    pub fn exit_method(self) -> &'static str {
        match self {
            FullscreenApi::Standard => "exitFullscreen",
            FullscreenApi::Webkit => "webkitExitFullscreen",
            FullscreenApi::Moz => "mozCancelFullScreen",
            FullscreenApi::Ms => "msExitFullscreen",
        }
    }

    /// Document property holding the current fullscreen element.
    pub fn element_property(self) -> &'static str {
        match self {
            FullscreenApi::Standard => "fullscreenElement",
            FullscreenApi::Webkit => "webkitFullscreenElement",
            FullscreenApi::Moz => "mozFullScreenElement",
            FullscreenApi::Ms => "msFullscreenElement",
        }
    }

    /// Document event fired on entry and exit.
    pub fn change_event(self) -> &'static str {
        match self {
            FullscreenApi::Standard => "fullscreenchange",
            FullscreenApi::Webkit => "webkitfullscreenchange",
            FullscreenApi::Moz => "mozfullscreenchange",
            FullscreenApi::Ms => "MSFullscreenChange",
        }
    }

    /// First variant whose request method `has_method` reports as callable.
    ///
    /// ```rust
    /// use ticker_core_view::FullscreenApi;
    ///
    /// let api = FullscreenApi::detect(|name| name == "webkitRequestFullscreen");
    /// assert_eq!(api, Some(FullscreenApi::Webkit));
    /// assert_eq!(FullscreenApi::detect(|_| false), None);
    /// ```
    pub fn detect(has_method: impl Fn(&str) -> bool) -> Option<FullscreenApi> {
        Self::ALL
            .into_iter()
            .find(|api| has_method(api.request_method()))
    }
}

/// The page around the ticker, as seen by the presentation manager.
///
/// The web implementation queries the document and toggles body classes;
/// tests use an in-memory fake.
pub trait FullscreenHost {
    /// Native fullscreen variant available on the target, if any.
    fn detect_native(&self) -> Option<FullscreenApi>;

    /// Whether the browser reports an element in native fullscreen.
    fn native_active(&self) -> bool;

    /// Apply the visual marker for `mode`.
    ///
    /// Called with the single current mode, so native and pseudo markers
    /// are never shown together.
    fn show_mode(&mut self, mode: PresentationMode);

    /// Update the toggle control's label.
    fn set_toggle_label(&mut self, label: &str);
}
