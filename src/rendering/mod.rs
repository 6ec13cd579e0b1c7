//! Rendering pipeline: faces, caption layout, paint planning and rasterization

pub mod font;
pub mod layout;
pub mod paint;
pub mod raster;

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use sha2::{Digest, Sha256};

use crate::rendering::font::GlyphFace;
use crate::rendering::paint::PaintCommand;
use crate::rendering::raster::{blend_coverage, Coverage};
use crate::Result;

/// A flattened image encoded for hand-off.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

/// Encode an RGBA buffer as PNG
pub fn encode_png(image: &RgbaImage) -> Result<EncodedImage> {
    let (width, height) = image.dimensions();
    let mut png_data = Vec::new();
    PngEncoder::new(Cursor::new(&mut png_data)).write_image(
        image.as_raw(),
        width,
        height,
        ExtendedColorType::Rgba8,
    )?;
    Ok(EncodedImage { width, height, png_data })
}

/// Hex SHA-256 over the dimensions and raw pixels.
///
/// Independent of any encoder settings, so it is stable enough to use as a
/// golden for rendering tests.
pub fn pixel_digest(image: &RgbaImage) -> String {
    let mut hasher = Sha256::new();
    hasher.update(image.width().to_le_bytes());
    hasher.update(image.height().to_le_bytes());
    hasher.update(image.as_raw());
    hex::encode(hasher.finalize())
}

/// Execute paint commands onto `canvas` in order.
///
/// Each command gets a coverage mask spanning the face's ink bounds grown
/// by the command's padding, cut down to the canvas plus that padding. Ink
/// further out can never reach a canvas pixel.
pub fn paint_commands(canvas: &mut RgbaImage, face: &dyn GlyphFace, commands: &[PaintCommand]) {
    let (cw, ch) = canvas.dimensions();
    for cmd in commands {
        let pad = cmd.padding() as i64;
        let (rect, font_px, text) = match cmd {
            PaintCommand::StrokeText { rect, font_px, text, .. } => (rect, *font_px, text),
            PaintCommand::FillText { rect, font_px, text, .. } => (rect, *font_px, text),
        };
        log::trace!("paint {:?} at ({}, {}) pad {}", text, rect.x, rect.y, pad);

        let ink = face.ink_bounds(text, font_px);
        let left = (rect.x + ink.left - pad).max(-pad);
        let top = (rect.y + ink.top - pad).max(-pad);
        let right = (rect.x + ink.right + pad).min(cw as i64 + pad);
        let bottom = (rect.y + ink.bottom + pad).min(ch as i64 + pad);
        if right <= left || bottom <= top {
            continue;
        }

        let mut glyphs = Coverage::new((right - left) as u32, (bottom - top) as u32);
        face.rasterize(text, font_px, &mut glyphs, rect.x - left, rect.y - top);

        let (coverage, color) = match cmd {
            PaintCommand::StrokeText { radius, hollow, color, .. } => {
                let mut outline = glyphs.dilate(*radius);
                if *hollow {
                    outline.subtract(&glyphs);
                }
                (outline, *color)
            }
            PaintCommand::FillText { color, .. } => (glyphs, *color),
        };
        blend_coverage(canvas, &coverage, left, top, color);
    }
}
