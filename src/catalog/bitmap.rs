//! Bitmap figures recolored to the active stroke color.

use crate::color::{luminance, Rgb};
use image::RgbaImage;
use kurbo::{Point, Rect};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Pixels darker than this become ink, everything else is dropped.
pub const INK_THRESHOLD: f64 = 128.0;

/// Dark opaque pixels take `color`, every other pixel becomes transparent.
pub fn recolor(source: &RgbaImage, color: Rgb) -> RgbaImage {
    let mut out = RgbaImage::new(source.width(), source.height());
    for (x, y, px) in source.enumerate_pixels() {
        let [r, g, b, a] = px.0;
        if a > 0 && luminance(r, g, b) < INK_THRESHOLD {
            out.put_pixel(x, y, image::Rgba([color.r, color.g, color.b, 255]));
        }
    }
    out
}

/// Destination of a bitmap figure: the image fitted into the `2 * size`
/// square around `origin`, aspect ratio kept.
pub fn placement(image: &RgbaImage, origin: Point, size: f64) -> Rect {
    let (w, h) = (image.width().max(1) as f64, image.height().max(1) as f64);
    let scale = 2.0 * size / w.max(h);
    Rect::from_center_size(origin, (w * scale, h * scale))
}

/// Recolored bitmaps, loaded once per (file, color) pair. Failed loads are
/// remembered too, so a broken file is reported once per session.
#[derive(Default)]
pub struct ImageCache {
    entries: HashMap<(PathBuf, Rgb), Option<Arc<RgbaImage>>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, path: &Path, color: Rgb) -> Option<Arc<RgbaImage>> {
        self.entries
            .entry((path.to_path_buf(), color))
            .or_insert_with(|| load(path, color))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn load(path: &Path, color: Rgb) -> Option<Arc<RgbaImage>> {
    match image::open(path) {
        Ok(img) => {
            tracing::debug!(path = %path.display(), %color, "recolored image figure");
            Some(Arc::new(recolor(&img.to_rgba8(), color)))
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to load image figure");
            None
        }
    }
}
