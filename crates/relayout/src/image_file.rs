//! Image metrics read from local image files.

use std::path::{Path, PathBuf};

use log::debug;

use relayout_core::{geometry::Size, metrics::ImageMeasure};

/// Reads native image sizes from the headers of local image files.
///
/// Image URLs may be plain paths or `file://` URLs. Relative paths are
/// resolved against the base directory when one is set. Any other scheme,
/// or a file that cannot be decoded, yields no size.
#[derive(Debug, Clone, Default)]
pub struct FileImageMeasure {
    base_dir: Option<PathBuf>,
}

impl FileImageMeasure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves relative image paths against `base_dir`.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    fn resolve(&self, image_url: &str) -> Option<PathBuf> {
        let path = match image_url.split_once("://") {
            Some(("file", path)) => Path::new(path),
            Some(_) => return None,
            None => Path::new(image_url),
        };
        match &self.base_dir {
            Some(base_dir) if path.is_relative() => Some(base_dir.join(path)),
            _ => Some(path.to_path_buf()),
        }
    }
}

impl ImageMeasure for FileImageMeasure {
    fn native_size(&self, image_url: &str) -> Option<Size> {
        let path = self.resolve(image_url)?;
        match image::image_dimensions(&path) {
            Ok((width, height)) => Some(Size::new(f64::from(width), f64::from(height))),
            Err(err) => {
                debug!(path = path.display().to_string(), err:%; "Could not read image size");
                None
            }
        }
    }
}
