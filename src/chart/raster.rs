//! SVG to PNG rasterisation.

use crate::error::VizError;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};
use std::path::Path;
use tracing::debug;

/// Turns chart SVG into PNG bytes. Font discovery runs once per rasteriser.
pub struct Rasterizer {
    options: Options<'static>,
}

impl Rasterizer {
    pub fn new() -> Self {
        let mut options = Options::default();
        options.fontdb_mut().load_system_fonts();
        debug!("Loaded {} font faces", options.fontdb.len());
        Self { options }
    }

    /// Rasterise `svg` at its own width and height. `path` is only used in
    /// error messages.
    pub fn to_png(&self, svg: &str, path: &Path) -> Result<Vec<u8>, VizError> {
        let tree =
            Tree::from_str(svg, &self.options).map_err(|e| VizError::render(path, e.to_string()))?;

        let size = tree.size().to_int_size();
        let mut pixmap = Pixmap::new(size.width(), size.height()).ok_or_else(|| {
            VizError::render(
                path,
                format!("invalid image size {}x{}", size.width(), size.height()),
            )
        })?;

        resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());

        pixmap
            .encode_png()
            .map_err(|e| VizError::render(path, e.to_string()))
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}
