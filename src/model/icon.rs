//! Arrow icon loading with a drawn fallback.
//!
//! Pixels are kept as premultiplied RGBA, which is what both AppKit bitmap
//! reps and layered Win32 windows want (the latter after a channel swap).

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point as PolygonPoint;

use super::constants::{PLACEHOLDER_ARROW, PLACEHOLDER_COLOR};
use super::geometry::Size;
use crate::error::Result;

/// Where an icon's pixels came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconSource {
    File(PathBuf),
    Placeholder,
}

/// A decoded icon in premultiplied RGBA, row-major, top row first.
#[derive(Debug, Clone)]
pub struct ArrowIcon {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    source: IconSource,
}

impl ArrowIcon {
    /// Reads and decodes an image file.
    pub fn load(path: &Path) -> Result<Self> {
        let image = image::open(path)?.into_rgba8();
        let (width, height) = image.dimensions();
        Ok(Self::from_straight_rgba(
            width,
            height,
            image.into_raw(),
            IconSource::File(path.to_path_buf()),
        ))
    }

    /// Loads `path`, falling back to [`ArrowIcon::placeholder`] on any error.
    pub fn load_or_placeholder(path: &Path, size: Size) -> Self {
        match Self::load(path) {
            Ok(icon) => {
                log::info!(
                    "loaded arrow icon {} ({}x{})",
                    path.display(),
                    icon.width,
                    icon.height
                );
                icon
            }
            Err(e) => {
                log::warn!("{e}; drawing placeholder arrow instead");
                Self::placeholder(size)
            }
        }
    }

    /// A red triangle on a transparent canvas of `size`.
    pub fn placeholder(size: Size) -> Self {
        let width = size.width.max(1) as u32;
        let height = size.height.max(1) as u32;
        let mut canvas = RgbaImage::new(width, height);
        let triangle = PLACEHOLDER_ARROW.map(|(x, y)| PolygonPoint::new(x, y));
        draw_polygon_mut(&mut canvas, &triangle, Rgba(PLACEHOLDER_COLOR));

        Self::from_straight_rgba(width, height, canvas.into_raw(), IconSource::Placeholder)
    }

    /// Builds an icon from straight (non-premultiplied) RGBA bytes.
    pub fn from_straight_rgba(width: u32, height: u32, mut rgba: Vec<u8>, source: IconSource) -> Self {
        rgba.resize((width * height * 4) as usize, 0);
        for px in rgba.chunks_exact_mut(4) {
            let alpha = px[3];
            px[0] = premultiply(px[0], alpha);
            px[1] = premultiply(px[1], alpha);
            px[2] = premultiply(px[2], alpha);
        }
        Self {
            width,
            height,
            pixels: rgba,
            source,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn is_placeholder(&self) -> bool {
        self.source == IconSource::Placeholder
    }

    /// Premultiplied RGBA of one pixel, or `None` outside the icon.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }
}

fn premultiply(channel: u8, alpha: u8) -> u8 {
    ((u32::from(channel) * u32::from(alpha) + 127) / 255) as u8
}
