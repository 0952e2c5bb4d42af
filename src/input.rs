//! Normalisation of raw control values and key presses.

/// Interpret a control value the way a form input's numeric value is read.
///
/// Blank input reads as `0.0`; anything that is not a number reads as NaN.
/// Callers resolve both through their own fallback rules.
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Trim ticker text, substituting `placeholder` when nothing is left.
///
/// ## Example
///
/// ```rust
/// use ticker_core_view::input::normalize_text;
///
/// assert_eq!(normalize_text(" hello ", "type here"), "hello");
/// assert_eq!(normalize_text("   ", "type here"), "type here");
/// ```
pub fn normalize_text(raw: &str, placeholder: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Keyboard commands understood by the ticker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    /// `F`: toggle fullscreen
    ToggleFullscreen,
    /// `Escape`: leave the CSS fallback mode
    Escape,
}

impl KeyCommand {
    /// Map a `KeyboardEvent.key` value to a command.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "f" | "F" => Some(KeyCommand::ToggleFullscreen),
            "Escape" | "Esc" => Some(KeyCommand::Escape),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_follow_form_semantics() {
        assert_eq!(parse_number("48"), 48.0);
        assert_eq!(parse_number(" 32.5 "), 32.5);
        assert_eq!(parse_number("1e2"), 100.0);
        assert_eq!(parse_number("-7"), -7.0);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("   "), 0.0);
        assert!(parse_number("big").is_nan());
        assert!(parse_number("12px").is_nan());
    }

    #[test]
    fn text_is_trimmed_or_replaced() {
        assert_eq!(normalize_text("", "prompt"), "prompt");
        assert_eq!(normalize_text("   ", "prompt"), "prompt");
        assert_eq!(normalize_text("\t\n", "prompt"), "prompt");
        assert_eq!(normalize_text(" hello ", "prompt"), "hello");
        assert_eq!(normalize_text("a  b", "prompt"), "a  b");
    }

    #[test]
    fn key_mapping() {
        assert_eq!(KeyCommand::from_key("f"), Some(KeyCommand::ToggleFullscreen));
        assert_eq!(KeyCommand::from_key("F"), Some(KeyCommand::ToggleFullscreen));
        assert_eq!(KeyCommand::from_key("Escape"), Some(KeyCommand::Escape));
        assert_eq!(KeyCommand::from_key("Esc"), Some(KeyCommand::Escape));
        assert_eq!(KeyCommand::from_key("g"), None);
        assert_eq!(KeyCommand::from_key("Enter"), None);
    }
}
