//! Ticker configuration: limits, labels, and page bindings.

/// Font size limits in pixels.
///
/// Values outside `[min, max]` are clamped; unusable input (NaN or zero)
/// is replaced by `fallback` before clamping.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct FontLimits {
    /// Smallest allowed font size
    pub min: f64,
    /// Largest allowed font size
    pub max: f64,
    /// Size used when the input is not a usable number
    pub fallback: f64,
}

impl Default for FontLimits {
    fn default() -> Self {
        Self {
            min: 14.0,
            max: 700.0,
            fallback: 48.0,
        }
    }
}

impl FontLimits {
    /// Resolve a requested size to the size that will be rendered.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use ticker_core_view::FontLimits;
    ///
    /// let limits = FontLimits::default();
    /// assert_eq!(limits.apply(64.0), 64.0);
    /// assert_eq!(limits.apply(2.0), 14.0);
    /// assert_eq!(limits.apply(f64::NAN), 48.0);
    /// ```
    pub fn apply(&self, px: f64) -> f64 {
        let requested = if px.is_nan() || px == 0.0 { self.fallback } else { px };
        requested.max(self.min).min(self.max)
    }
}

/// User-facing strings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct Labels {
    /// Shown in the ticker when the text input is blank
    pub placeholder: String,
    /// Toggle button label while windowed
    pub fullscreen_enter: String,
    /// Toggle button label while in either fullscreen mode
    pub fullscreen_exit: String,
    /// Alert text when a native fullscreen request is rejected
    pub fullscreen_failed: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            placeholder: "Введите текст и нажмите «Применить текст»".to_string(),
            fullscreen_enter: "⛶ Fullscreen".to_string(),
            fullscreen_exit: "⤢ Exit fullscreen".to_string(),
            fullscreen_failed: "Fullscreen не включился. Обычно это работает только на https/localhost."
                .to_string(),
        }
    }
}

/// Element ids the web layer looks up on mount.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct ElementIds {
    pub text_input: String,
    pub speed: String,
    pub speed_readout: String,
    pub font_size: String,
    pub apply: String,
    pub play: String,
    pub pause: String,
    pub reset: String,
    pub viewport: String,
    pub text: String,
    /// Optional: fullscreen is disabled when absent
    pub fullscreen_toggle: String,
    /// Optional: fullscreen is disabled when absent
    pub fullscreen_target: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            text_input: "inputText".to_string(),
            speed: "speed".to_string(),
            speed_readout: "speedValue".to_string(),
            font_size: "fontSize".to_string(),
            apply: "apply".to_string(),
            play: "play".to_string(),
            pause: "pause".to_string(),
            reset: "reset".to_string(),
            viewport: "viewport".to_string(),
            text: "tickerText".to_string(),
            fullscreen_toggle: "fullscreen".to_string(),
            fullscreen_target: "ticker".to_string(),
        }
    }
}

/// Body classes used as the fullscreen visual marker.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct PageClasses {
    /// Present in any fullscreen mode
    pub fullscreen: String,
    /// Present only in the CSS fallback mode
    pub pseudo: String,
}

impl Default for PageClasses {
    fn default() -> Self {
        Self {
            fullscreen: "fs".to_string(),
            pseudo: "fs-pseudo".to_string(),
        }
    }
}

/// Complete ticker configuration.
///
/// All fields are optional in serialized form; missing values take the
/// defaults of the stock page.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct TickerSettings {
    /// Speed used when the speed control holds no usable number
    pub default_speed_px_per_sec: f64,
    /// Speed input is clamped to `[-max, max]`
    pub max_speed_px_per_sec: f64,
    pub font: FontLimits,
    pub labels: Labels,
    pub elements: ElementIds,
    pub classes: PageClasses,
    /// Show `window.alert` when native fullscreen is rejected (on by default)
    pub alert_on_fullscreen_failure: bool,
}

impl Default for TickerSettings {
    fn default() -> Self {
        Self {
            default_speed_px_per_sec: 120.0,
            max_speed_px_per_sec: 5000.0,
            font: FontLimits::default(),
            labels: Labels::default(),
            elements: ElementIds::default(),
            classes: PageClasses::default(),
            alert_on_fullscreen_failure: true,
        }
    }
}

impl TickerSettings {
    /// Parse settings from a TOML document.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Resolve a requested speed, substituting the default for non-finite input.
    pub fn resolve_speed(&self, px_per_sec: f64) -> f64 {
        if !px_per_sec.is_finite() {
            return self.default_speed_px_per_sec;
        }
        let max = self.max_speed_px_per_sec.abs();
        px_per_sec.clamp(-max, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_limits_clamp_and_fallback() {
        let limits = FontLimits::default();
        assert_eq!(limits.apply(14.0), 14.0);
        assert_eq!(limits.apply(700.0), 700.0);
        assert_eq!(limits.apply(13.9), 14.0);
        assert_eq!(limits.apply(-5.0), 14.0);
        assert_eq!(limits.apply(701.0), 700.0);
        assert_eq!(limits.apply(f64::INFINITY), 700.0);
        assert_eq!(limits.apply(f64::NAN), 48.0);
        // zero is treated as "no value", like the page's `Number(px) || 48`
        assert_eq!(limits.apply(0.0), 48.0);
    }

    #[test]
    fn speed_resolution() {
        let settings = TickerSettings::default();
        assert_eq!(settings.resolve_speed(250.0), 250.0);
        assert_eq!(settings.resolve_speed(-40.0), -40.0);
        assert_eq!(settings.resolve_speed(9_000.0), 5_000.0);
        assert_eq!(settings.resolve_speed(-9_000.0), -5_000.0);
        assert_eq!(settings.resolve_speed(f64::NAN), 120.0);
        assert_eq!(settings.resolve_speed(f64::NEG_INFINITY), 120.0);
    }

    #[test]
    fn default_labels_match_stock_page() {
        let labels = Labels::default();
        assert_eq!(labels.fullscreen_enter, "⛶ Fullscreen");
        assert_eq!(labels.fullscreen_exit, "⤢ Exit fullscreen");
    }

    #[test]
    fn fullscreen_failure_alert_is_on_by_default() {
        let settings = TickerSettings::default();
        assert!(settings.alert_on_fullscreen_failure);
        assert!(settings.labels.fullscreen_failed.contains("https/localhost"));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn partial_toml_keeps_defaults() {
        let settings = TickerSettings::from_toml_str(
            r#"
            default_speed_px_per_sec = 80.0
            alert_on_fullscreen_failure = false

            [font]
            max = 120.0

            [elements]
            viewport = "stage"
            "#,
        )
        .unwrap();

        assert_eq!(settings.default_speed_px_per_sec, 80.0);
        assert!(!settings.alert_on_fullscreen_failure);
        assert_eq!(settings.font.max, 120.0);
        assert_eq!(settings.font.min, 14.0);
        assert_eq!(settings.elements.viewport, "stage");
        assert_eq!(settings.elements.text, "tickerText");
        assert_eq!(settings.labels, Labels::default());
    }
}
