//! Default sizes for nodes created without one.

use log::{debug, trace};

use relayout_core::{
    geometry::Size,
    metrics::ImageMeasure,
    semantic::{ImageStyle, NodeStyle},
};

use crate::config::LayoutConfig;

/// Computes the size of a node whose size is unset.
pub struct NodeSizeProvider<'a> {
    config: &'a LayoutConfig,
    image_measure: &'a dyn ImageMeasure,
}

impl<'a> NodeSizeProvider<'a> {
    pub fn new(config: &'a LayoutConfig, image_measure: &'a dyn ImageMeasure) -> Self {
        Self {
            config,
            image_measure,
        }
    }

    /// Returns the default size for a node with the given style.
    pub fn size_for(&self, style: &NodeStyle) -> Size {
        match style {
            NodeStyle::Image(image) => self.image_size(image),
            _ => self.config.default_node_size(),
        }
    }

    fn image_size(&self, image: &ImageStyle) -> Size {
        let native = match self.image_measure.native_size(image.image_url()) {
            Some(size) if size.width() > 0.0 && size.height() > 0.0 => size,
            _ => {
                debug!(url = image.image_url(); "Image size unavailable, using default image size");
                self.config.default_image_size()
            }
        };

        // Non-positive factors keep the native size.
        let factor = image.scaling_factor();
        if factor <= 0 {
            return native;
        }

        let width = f64::from(factor) * self.config.image_scale_unit();
        let height = width * (native.height() / native.width());
        trace!(factor, width, height; "Scaled image size");
        Size::new(width, height)
    }
}
