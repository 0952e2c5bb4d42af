//! In-memory fakes for the surface and fullscreen host traits.

use std::cell::Cell;

use crate::fullscreen::{FullscreenApi, FullscreenHost, PresentationMode};
use crate::surface::{Geometry, TickerSurface};

/// Surface with scripted geometry that records every write.
#[derive(Debug, Default)]
pub(crate) struct FakeSurface {
    pub geometry: Geometry,
    pub content: String,
    pub font_px: f64,
    pub offset: f64,
    pub offset_when_measured: Cell<Option<f64>>,
    pub measure_count: Cell<usize>,
}

impl FakeSurface {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            ..Default::default()
        }
    }
}

impl TickerSurface for FakeSurface {
    fn measure(&self) -> Geometry {
        self.measure_count.set(self.measure_count.get() + 1);
        self.offset_when_measured.set(Some(self.offset));
        self.geometry
    }

    fn apply_offset(&mut self, x: f64) {
        self.offset = x;
    }

    fn apply_font_size(&mut self, px: f64) {
        self.font_px = px;
    }

    fn set_content(&mut self, text: &str) {
        self.content = text.to_string();
    }

    fn has_content(&self) -> bool {
        !self.content.is_empty()
    }
}

/// Fullscreen host with a switchable native capability.
#[derive(Debug, Default)]
pub(crate) struct FakeHost {
    pub native: Option<FullscreenApi>,
    pub native_active: bool,
    pub shown: Option<PresentationMode>,
    pub label: String,
    pub show_count: usize,
}

impl FakeHost {
    pub fn without_native() -> Self {
        Self::default()
    }

    pub fn with_native(api: FullscreenApi) -> Self {
        Self {
            native: Some(api),
            ..Default::default()
        }
    }
}

impl FullscreenHost for FakeHost {
    fn detect_native(&self) -> Option<FullscreenApi> {
        self.native
    }

    fn native_active(&self) -> bool {
        self.native_active
    }

    fn show_mode(&mut self, mode: PresentationMode) {
        self.shown = Some(mode);
        self.show_count += 1;
    }

    fn set_toggle_label(&mut self, label: &str) {
        self.label = label.to_string();
    }
}
