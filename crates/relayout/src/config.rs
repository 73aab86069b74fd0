//! Configuration types for incremental layout.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources; every field falls back to its default when omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration root.
//! - [`LayoutConfig`] - Spacing constants and default sizes used by the layout policies.
//!
//! # Example
//!
//! ```
//! # use relayout::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().node_gap(), 30.0);
//! assert_eq!(config.layout().default_node_size().width(), 150.0);
//! ```

use serde::Deserialize;

use relayout_core::geometry::Size;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout configuration.
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Constants driving the incremental layout policies.
///
/// | Key                  | Default    | Used by                                   |
/// |----------------------|------------|-------------------------------------------|
/// | `node_gap`           | `30`       | placement cascade and empty-spot search   |
/// | `default_node_size`  | `150 × 70` | nodes created without a size              |
/// | `default_image_size` | `100 × 100`| images whose native size is unknown       |
/// | `image_scale_unit`   | `10`       | image width per scaling factor unit       |
/// | `label_spacing`      | `5`        | gap between a node and its label          |
/// | `overlap_margin`     | `30`       | gap left below a sibling when separating  |
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    node_gap: f64,
    default_node_size: Size,
    default_image_size: Size,
    image_scale_unit: f64,
    label_spacing: f64,
    overlap_margin: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_gap: 30.0,
            default_node_size: Size::new(150.0, 70.0),
            default_image_size: Size::new(100.0, 100.0),
            image_scale_unit: 10.0,
            label_spacing: 5.0,
            overlap_margin: 30.0,
        }
    }
}

impl LayoutConfig {
    /// Sets the gap used between placed nodes.
    pub fn with_node_gap(mut self, gap: f64) -> Self {
        self.node_gap = gap;
        self
    }

    /// Sets the size given to new non-image nodes.
    pub fn with_default_node_size(mut self, size: Size) -> Self {
        self.default_node_size = size;
        self
    }

    /// Sets the margin kept between siblings separated by the overlap resolver.
    pub fn with_overlap_margin(mut self, margin: f64) -> Self {
        self.overlap_margin = margin;
        self
    }

    pub fn node_gap(&self) -> f64 {
        self.node_gap
    }

    pub fn default_node_size(&self) -> Size {
        self.default_node_size
    }

    pub fn default_image_size(&self) -> Size {
        self.default_image_size
    }

    pub fn image_scale_unit(&self) -> f64 {
        self.image_scale_unit
    }

    pub fn label_spacing(&self) -> f64 {
        self.label_spacing
    }

    pub fn overlap_margin(&self) -> f64 {
        self.overlap_margin
    }
}
