//! Measurement collaborators consumed by layout.
//!
//! Layout never measures text or decodes images itself. It asks a
//! [`TextMeasure`] for the bounds of a label and an [`ImageMeasure`] for the
//! native size of an image. Both traits are implemented for plain closures,
//! which keeps tests and embedders free of ceremony.
//!
//! [`FontTextMeasure`] is the default text measurer, shaping text with the
//! system fonts through cosmic-text.

use std::sync::Mutex;

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Style, Weight};
use log::info;

use crate::{
    geometry::{Point, Size},
    semantic::LabelStyle,
};

/// Ratio between a font's line height and its size.
const LINE_HEIGHT_RATIO: f32 = 1.15;

/// Measured bounds of a piece of text.
///
/// `alignment` is the offset of the text baseline from the top-left corner
/// of the text box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextBounds {
    size: Size,
    alignment: Point,
}

impl TextBounds {
    pub fn new(size: Size, alignment: Point) -> Self {
        Self { size, alignment }
    }

    pub fn size(self) -> Size {
        self.size
    }

    pub fn alignment(self) -> Point {
        self.alignment
    }
}

/// Computes text bounds for a label.
pub trait TextMeasure {
    fn text_bounds(&self, style: &LabelStyle, text: &str) -> TextBounds;
}

impl<F> TextMeasure for F
where
    F: Fn(&LabelStyle, &str) -> TextBounds,
{
    fn text_bounds(&self, style: &LabelStyle, text: &str) -> TextBounds {
        self(style, text)
    }
}

/// Looks up the native size of an image.
///
/// Returns `None` when the image cannot be resolved; callers fall back to a
/// default size.
pub trait ImageMeasure {
    fn native_size(&self, image_url: &str) -> Option<Size>;
}

impl<F> ImageMeasure for F
where
    F: Fn(&str) -> Option<Size>,
{
    fn native_size(&self, image_url: &str) -> Option<Size> {
        self(image_url)
    }
}

/// Text measurer backed by cosmic-text shaping with the system fonts.
///
/// The font database is loaded once per measurer and reused for every label.
pub struct FontTextMeasure {
    font_system: Mutex<FontSystem>,
}

impl Default for FontTextMeasure {
    fn default() -> Self {
        Self::new()
    }
}

impl FontTextMeasure {
    /// Creates a measurer using the generic sans-serif family.
    pub fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    fn attrs(style: &LabelStyle) -> Attrs<'static> {
        let mut attrs = Attrs::new().family(Family::SansSerif);
        if style.is_bold() {
            attrs = attrs.weight(Weight::BOLD);
        }
        if style.is_italic() {
            attrs = attrs.style(Style::Italic);
        }
        attrs
    }
}

impl TextMeasure for FontTextMeasure {
    fn text_bounds(&self, style: &LabelStyle, text: &str) -> TextBounds {
        if text.is_empty() {
            return TextBounds::default();
        }

        let mut font_system = self.font_system.lock().expect("failed to lock FontSystem");

        let font_size_px = f32::from(style.font_size());
        let metrics = Metrics::new(font_size_px, font_size_px * LINE_HEIGHT_RATIO);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);
        buffer.set_size(None, None);
        buffer.set_text(text, &Self::attrs(style), Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;
        let mut baseline: Option<f32> = None;

        for run in buffer.layout_runs() {
            if let Some(last) = run.glyphs.last() {
                max_width = max_width.max(last.x + last.w);
            }
            baseline.get_or_insert(run.line_y);
            total_height += metrics.line_height;
        }

        if total_height == 0.0 {
            // No shaped runs, typically because no font is installed.
            max_width = text.chars().count() as f32 * (font_size_px * 0.55);
            total_height = metrics.line_height;
        }
        let baseline = baseline.unwrap_or(font_size_px);

        TextBounds::new(
            Size::new(f64::from(max_width), f64::from(total_height)),
            Point::new(0.0, f64::from(baseline)),
        )
    }
}
