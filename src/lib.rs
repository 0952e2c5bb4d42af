//! # ticker-core-view
//!
//! Core motion and presentation logic for a single-line scrolling text ticker.
//!
//! This crate provides platform-agnostic logic for:
//! - Scrolling text right-to-left across a viewport with wrap-around
//! - Play/pause/reset control with a single live frame chain
//! - Fullscreen presentation through the native Fullscreen API (standard or
//!   vendor-prefixed) with a CSS-only fallback
//! - Normalising raw control values (font size, speed, text)
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for settings
//! - `toml` - Load [`TickerSettings`] from TOML
//! - `web` - Enable DOM bindings and the `mountTicker` WASM export
//!
//! ## Example
//!
//! ```rust,ignore
//! use ticker_core_view::{FrameOutcome, MotionController, TickerSettings};
//!
//! // `surface` implements `TickerSurface` for your rendering backend
//! let mut motion = MotionController::new(surface, TickerSettings::default());
//! motion.set_font_size(64.0);
//! motion.set_text("Breaking news");
//! motion.reset_position();
//!
//! let ticket = motion.play(now_ms, "").unwrap();
//! // on every display refresh:
//! if motion.frame_update(ticket, timestamp) == FrameOutcome::Stop {
//!     // stop scheduling
//! }
//! ```

mod error;
pub mod fullscreen;
pub mod input;
mod motion;
mod presentation;
mod settings;
pub mod surface;

#[cfg(test)]
mod testing;

#[cfg(feature = "web")]
pub mod web;

pub use error::TickerError;
pub use fullscreen::{FullscreenApi, FullscreenHost, PresentationMode};
pub use motion::{AnimationState, FrameOutcome, FrameTicket, MotionController, Playback};
pub use presentation::{PresentationManager, ToggleStep};
pub use settings::{ElementIds, FontLimits, Labels, PageClasses, TickerSettings};
pub use surface::{Geometry, TickerSurface};

#[cfg(feature = "web")]
pub use web::{mount, TickerHandle};
